// The numeric core: widening joins, group-by-code summation, and
// weighted-mean restoration.
use crate::config::MergeSpec;
use crate::error::Result;
use crate::types::{CodeRow, DropRecord, ProjectRow, StatCell};
use crate::util;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Fold step: widen `table` with one merge spec's statistics.
///
/// Drop rows whose item has no mapping are skipped silently; the drop
/// tables cover far more items than any one report cares about. For each
/// mapped statistic `s`, every project row gains a `raw` average (missing
/// when the drop table has no row for that project) and a `weighted`
/// value `rate * raw` with missingness propagated.
///
/// Takes and returns the table by value so the pipeline reads as an
/// explicit reduction over the merge specs.
pub fn merge_drop_stats(
    mut table: Vec<ProjectRow>,
    spec: &MergeSpec,
    drops: &[DropRecord],
) -> Vec<ProjectRow> {
    // statistic name -> project -> average
    let mut by_stat: BTreeMap<&str, HashMap<&str, f64>> = BTreeMap::new();
    for rec in drops {
        let Some(stat) = spec.item_map.get(&rec.item) else {
            continue;
        };
        by_stat
            .entry(stat.as_str())
            .or_default()
            .insert(rec.project.as_str(), rec.average);
    }

    for (stat, averages) in by_stat {
        for row in &mut table {
            let raw = averages.get(row.project.as_str()).copied();
            row.stats.insert(
                stat.to_string(),
                StatCell {
                    raw,
                    weighted: raw.map(|v| row.rate * v),
                },
            );
        }
    }
    table
}

/// Group the project rows by canonical code and sum every numeric column,
/// treating missing values as zero. Attaches `duration` (fatal if the
/// code matches no configured duration) and one `cost-{suffix}` column per
/// cost table (missing when the table has no entry for the code).
pub fn aggregate(
    table: &[ProjectRow],
    durations: &BTreeMap<String, f64>,
    cost_map: &BTreeMap<String, BTreeMap<String, f64>>,
) -> Result<Vec<CodeRow>> {
    let mut groups: BTreeMap<&str, Vec<&ProjectRow>> = BTreeMap::new();
    for row in table {
        groups.entry(row.code.as_str()).or_default().push(row);
    }

    let mut out = Vec::with_capacity(groups.len());
    for (code, rows) in groups {
        let mut values: BTreeMap<String, Option<f64>> = BTreeMap::new();
        values.insert("rate".into(), Some(rows.iter().map(|r| r.rate).sum()));

        let stat_names: BTreeSet<&str> = rows
            .iter()
            .flat_map(|r| r.stats.keys().map(|s| s.as_str()))
            .collect();
        for stat in stat_names {
            let cells = || rows.iter().filter_map(|r| r.stats.get(stat));
            let raw_sum: f64 = cells().filter_map(|c| c.raw).sum();
            let weighted_sum: f64 = cells().filter_map(|c| c.weighted).sum();
            values.insert(format!("gain-{stat}_raw"), Some(raw_sum));
            values.insert(format!("gain-{stat}"), Some(weighted_sum));
        }

        values.insert(
            "duration".into(),
            Some(util::lookup_duration(durations, code)?),
        );
        for (suffix, costs) in cost_map {
            values.insert(format!("cost-{suffix}"), costs.get(code).copied());
        }

        out.push(CodeRow {
            code: code.to_string(),
            values,
        });
    }
    Ok(out)
}

/// Divide every `gain-*` column by the grouped rate, turning the
/// rate-weighted sums back into weighted means.
///
/// A group whose rates sum to zero has no defined mean; its gain columns
/// become missing values rather than NaN/Infinity, and the output writer's
/// fill-zero step renders them as 0.
pub fn restore_means(mut rows: Vec<CodeRow>) -> Vec<CodeRow> {
    for row in &mut rows {
        let rate = row.values.get("rate").copied().flatten().unwrap_or(0.0);
        for (name, value) in row.values.iter_mut() {
            if name.starts_with("gain-") {
                *value = match *value {
                    Some(v) if rate != 0.0 => Some(v / rate),
                    _ => None,
                };
            }
        }
    }
    rows
}
