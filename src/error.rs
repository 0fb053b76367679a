//! Error types for log analysis

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while classifying, loading or rendering simulation logs
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("unknown log file type: {0}")]
    UnknownLogType(String),

    #[error("log file name has no run id (expected `<prefix>_<run>_...`): {0}")]
    MissingRunId(String),

    #[error("{path}:{line}: expected {expected} fields, found {found}")]
    RowArity {
        path: PathBuf,
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("{path}: a log schema needs turn and player columns, got {found} columns")]
    SchemaTooShort { path: PathBuf, found: usize },

    #[error("{path}:{line}: column `{column}` has invalid value `{value}`")]
    InvalidField {
        path: PathBuf,
        line: u64,
        column: String,
        value: String,
    },

    #[error("no rows for player {player} in {path}")]
    EmptySelection { path: PathBuf, player: u32 },

    #[error("failed to read {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("invalid input pattern: {0}")]
    InvalidPattern(#[from] glob::PatternError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("failed to render chart {path}: {message}")]
    Render { path: PathBuf, message: String },
}

pub type Result<T> = std::result::Result<T, AnalysisError>;

impl AnalysisError {
    /// Errors that stem from the file name alone, before any content is read
    pub fn is_unrecognized(&self) -> bool {
        matches!(self, Self::UnknownLogType(_) | Self::MissingRunId(_))
    }
}
