use thiserror::Error;

/// Fatal failures that abort a reconciliation run or a storage operation.
///
/// Row-level anomalies are never reported through this type; they are collected as
/// [`RunWarning`](crate::core::report::RunWarning)s so a run always completes.
#[derive(Debug, Error)]
pub enum ReconError {
    #[error("Sheet not found: {0}")]
    MissingSheet(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Invalid layout: {0}")]
    InvalidLayout(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, ReconError>;
