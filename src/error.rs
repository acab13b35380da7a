use thiserror::Error;

/// Everything that can abort a pipeline run.
///
/// All variants are fatal: the run stops at the first one and no output
/// file is written. Rows that are merely irrelevant (drop items without a
/// statistic mapping, codes absent from a cost table) are not errors and
/// never reach this type.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("project {0:?} has no entry in projectMap")]
    ProjectLookup(String),

    #[error("code {code:?} (duration key {key:?}) matches no configured duration")]
    DurationLookup { code: String, key: String },

    #[error("bad rate value {0:?}: expected a percentage like \"2.5%\"")]
    Rate(String),

    #[error("result column {0:?} does not exist in the aggregated table")]
    UnknownColumn(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
