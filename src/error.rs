use std::path::PathBuf;

use thiserror::Error;

/// Failures raised while reading a project's result exports or computing
/// efficiency figures from them.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("invalid format in {}: {reason}", .path.display())]
    InvalidFormat { path: PathBuf, reason: String },

    #[error("{}: header declares {declared} records but {found} were parsed", .path.display())]
    CountMismatch {
        path: PathBuf,
        declared: usize,
        found: usize,
    },

    #[error("malformed record #{index} in {}: {reason}", .path.display())]
    MalformedRecord {
        path: PathBuf,
        index: usize,
        reason: String,
    },

    #[error("{}:{line}: cannot parse '{token}' as a number", .path.display())]
    NumericParse {
        path: PathBuf,
        line: usize,
        token: String,
    },

    #[error("{}:{line}: unsupported column layout ({columns} columns, expected 2 or 3)", .path.display())]
    UnsupportedColumnLayout {
        path: PathBuf,
        line: usize,
        columns: usize,
    },

    #[error("curve '{0}' has no samples")]
    EmptyCurve(String),

    #[error("no loaded curve named '{0}'")]
    UnknownCurve(String),

    #[error("export error: {0}")]
    Export(#[from] csv::Error),

    #[error("settings error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ExtractError {
    pub(crate) fn invalid(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        ExtractError::InvalidFormat {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ExtractError>;
