use thiserror::Error;

/// Load-level failures. Only `SourceUnavailable` halts the dashboard.
#[derive(Error, Debug)]
pub enum DealError {
    #[error("Source Unavailable: remote failed ({remote}); local failed ({local})")]
    SourceUnavailable { remote: String, local: String },
    #[error("Empty Dataset: no usable trade rows after load")]
    EmptyDataset,
    #[error("Schema Mismatch: missing required column(s) {0:?}")]
    SchemaMismatch(Vec<&'static str>),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("HTTP error: {0}")]
    Http(String),
    #[error("CSV error: {0}")]
    Csv(String),
}

/// Row-level problems. Each one drops its row and the load carries on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordIssue {
    #[error("Malformed Record (line {line}): {field} = {value:?}")]
    MalformedRecord {
        line: usize,
        field: &'static str,
        value: String,
    },
    #[error("Unrecognized Side (line {line}): {value:?}")]
    UnrecognizedSide { line: usize, value: String },
}

impl RecordIssue {
    pub fn line(&self) -> usize {
        match self {
            Self::MalformedRecord { line, .. } => *line,
            Self::UnrecognizedSide { line, .. } => *line,
        }
    }
}
