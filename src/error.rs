//! Error types shared by ingestion, aggregation and report rendering

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while comparing two benchmark runs
#[derive(Error, Debug)]
pub enum CompareError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error near line {line}: {source}")]
    Csv {
        line: u64,
        #[source]
        source: csv::Error,
    },

    #[error("Malformed row in {source_name} at line {line}: {reason}")]
    MalformedRow {
        source_name: String,
        line: u64,
        reason: String,
    },

    #[error("Invalid trace pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("No samples for trace '{key}'")]
    EmptySeries { key: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Column '{column}' not found (missing header?)")]
    MissingColumn { column: String },

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for comparison operations
pub type Result<T> = std::result::Result<T, CompareError>;
