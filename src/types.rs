use serde::Deserialize;
use std::collections::BTreeMap;

/// JSON envelope shared by all raw stat exports: `{"data": {"ByProject": [...]}}`.
#[derive(Debug, Deserialize)]
pub struct TableFile<T> {
    pub data: TableData<T>,
}

#[derive(Debug, Deserialize)]
pub struct TableData<T> {
    #[serde(rename = "ByProject")]
    pub by_project: Vec<T>,
}

/// One row of the base project table. The export carries extra fields
/// (item breakdowns, counts); only the id and the percentage rate matter.
#[derive(Debug, Deserialize)]
pub struct RateRecord {
    pub project: String,
    pub rate: String,
}

/// One row of a blueprint/drop-stat table.
#[derive(Debug, Clone, Deserialize)]
pub struct DropRecord {
    pub project: String,
    pub item: String,
    pub average: f64,
}

/// Joined cell for one statistic on one project row.
///
/// `raw` is the left-joined average (`None` when the drop table had no row
/// for the project); `weighted` is `rate * raw`, with missingness
/// propagated rather than zero-filled. Zero-fill happens only at output.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatCell {
    pub raw: Option<f64>,
    pub weighted: Option<f64>,
}

/// One working row of the accumulating base table (one per project).
#[derive(Debug, Clone)]
pub struct ProjectRow {
    pub project: String,
    pub code: String,
    pub rate: f64,
    /// Statistic name -> joined cell. Every row carries an entry for every
    /// statistic introduced so far, so columns stay rectangular.
    pub stats: BTreeMap<String, StatCell>,
}

/// One aggregated row (one per canonical code).
///
/// All numeric columns live in `values` keyed by their output column name
/// (`rate`, `gain-x`, `gain-x_raw`, `duration`, `cost-Coins`, ...);
/// `None` marks a missing value until the output writer fills zeros.
#[derive(Debug, Clone)]
pub struct CodeRow {
    pub code: String,
    pub values: BTreeMap<String, Option<f64>>,
}
