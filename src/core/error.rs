//! Error type for loading the dataset and topology

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("required column '{0}' not found")]
    MissingColumn(String),

    #[error("input is empty")]
    Empty,

    #[error("topology has no object named '{0}'")]
    MissingObject(String),

    #[error("invalid topology: {0}")]
    InvalidTopology(String),

    #[error("fetch failed: {0}")]
    Fetch(String),
}
