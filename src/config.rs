// Configuration document: which tables to merge, how to name the
// statistics they contribute, and what the final table looks like.
use crate::error::{PipelineError, Result};
use crate::util;
use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;

/// One merge step: the drop-stat table `{name}.json` and the mapping from
/// raw item ids to the statistic names they become.
#[derive(Debug, Clone, Deserialize)]
pub struct MergeSpec {
    pub name: String,
    pub item_map: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub durations: Vec<f64>,
    #[serde(rename = "projectMap")]
    pub project_map: BTreeMap<String, String>,
    pub merge: Vec<MergeSpec>,
    #[serde(rename = "costMap")]
    pub cost_map: BTreeMap<String, BTreeMap<String, f64>>,
    #[serde(rename = "resultColumns")]
    pub result_columns: Vec<String>,
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Config> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        Self::parse(&text)
            .map_err(|e| match e {
                PipelineError::Config(msg) => {
                    PipelineError::Config(format!("{}: {}", path.display(), msg))
                }
                other => other,
            })
    }

    /// Parse and validate a configuration document.
    ///
    /// Validation happens here, before any table is read, so a bad config
    /// never costs a partial run.
    pub fn parse(text: &str) -> Result<Config> {
        let conf: Config =
            serde_yaml::from_str(text).map_err(|e| PipelineError::Config(e.to_string()))?;
        conf.validate()?;
        Ok(conf)
    }

    fn validate(&self) -> Result<()> {
        if self.durations.is_empty() {
            return Err(PipelineError::Config("durations must not be empty".into()));
        }
        // A statistic name reused across merge specs would make the later
        // join overwrite the earlier one's columns; reject it outright.
        let mut seen: HashSet<&str> = HashSet::new();
        for spec in &self.merge {
            for stat in spec.item_map.values() {
                if !seen.insert(stat.as_str()) {
                    return Err(PipelineError::Config(format!(
                        "statistic name {:?} is produced by more than one merge spec",
                        stat
                    )));
                }
            }
        }
        Ok(())
    }

    /// Duration table keyed by the dot-stripped decimal form of each value.
    pub fn duration_table(&self) -> BTreeMap<String, f64> {
        self.durations
            .iter()
            .map(|d| (util::duration_key(*d), *d))
            .collect()
    }
}
