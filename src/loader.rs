use crate::error::{PipelineError, Result};
use crate::types::{DropRecord, ProjectRow, RateRecord, TableFile};
use crate::util;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

fn read_table<T>(path: impl AsRef<Path>) -> Result<Vec<T>>
where
    T: serde::de::DeserializeOwned,
{
    let text = fs::read_to_string(path)?;
    let file: TableFile<T> = serde_json::from_str(&text)?;
    Ok(file.data.by_project)
}

/// Build the base table: one row per project with its fractional success
/// rate and canonical code attached.
///
/// Every project in the export must have a `projectMap` entry; an unmapped
/// project means the config is stale and the run aborts.
pub fn load_base_table(
    path: impl AsRef<Path>,
    project_map: &BTreeMap<String, String>,
) -> Result<Vec<ProjectRow>> {
    let records: Vec<RateRecord> = read_table(path)?;
    records
        .into_iter()
        .map(|rec| {
            let rate = util::percent_to_float(&rec.rate)?;
            let code = project_map
                .get(&rec.project)
                .cloned()
                .ok_or_else(|| PipelineError::ProjectLookup(rec.project.clone()))?;
            Ok(ProjectRow {
                project: rec.project,
                code,
                rate,
                stats: BTreeMap::new(),
            })
        })
        .collect()
}

/// Load one blueprint/drop-stat table. Filtering against the item map
/// happens later, in the merge step.
pub fn load_drop_table(path: impl AsRef<Path>) -> Result<Vec<DropRecord>> {
    read_table(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE_JSON: &str = r#"{"data":{"ByProject":[
        {"project":"proj-a","rate":"25%","item":"ignored","pt":3},
        {"project":"proj-b","rate":"2.5%"}
    ]}}"#;

    fn project_map() -> BTreeMap<String, String> {
        [("proj-a", "Q05"), ("proj-b", "E5A")]
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn base_table_converts_rates_and_attaches_codes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("projects.json");
        fs::write(&path, BASE_JSON).unwrap();

        let rows = load_base_table(&path, &project_map()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].project, "proj-a");
        assert_eq!(rows[0].code, "Q05");
        assert_eq!(rows[0].rate, 0.25);
        assert_eq!(rows[1].code, "E5A");
        assert_eq!(rows[1].rate, 0.025);
    }

    #[test]
    fn unmapped_project_aborts_the_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("projects.json");
        fs::write(
            &path,
            r#"{"data":{"ByProject":[{"project":"mystery","rate":"5%"}]}}"#,
        )
        .unwrap();

        let err = load_base_table(&path, &project_map()).unwrap_err();
        match err {
            PipelineError::ProjectLookup(p) => assert_eq!(p, "mystery"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn drop_table_round_trips_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blueprints.json");
        fs::write(
            &path,
            r#"{"data":{"ByProject":[{"project":"proj-a","item":"bp_x","average":8.0}]}}"#,
        )
        .unwrap();

        let drops = load_drop_table(&path).unwrap();
        assert_eq!(drops.len(), 1);
        assert_eq!(drops[0].item, "bp_x");
        assert_eq!(drops[0].average, 8.0);
    }
}
