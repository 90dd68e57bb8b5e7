//! Error types for loading, summarizing and charting a dataset.

use std::path::PathBuf;

use thiserror::Error;

/// Failures while reading a dataset file into memory.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("dataset file not found: {}", path.display())]
    NotFound { path: PathBuf },
    #[error("failed to read {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed header in {}: {reason}", path.display())]
    MalformedHeader { path: PathBuf, reason: String },
    #[error("malformed record {record} in {}: {reason}", path.display())]
    MalformedRecord {
        path: PathBuf,
        record: usize,
        reason: String,
    },
    #[error("malformed dataset {}: {reason}", path.display())]
    Malformed { path: PathBuf, reason: String },
    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),
}

/// Errors surfaced by the dashboard pipeline.
#[derive(Error, Debug)]
pub enum EdaError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error("dataset has no rows")]
    EmptyDataset,
    #[error("missing column '{0}'")]
    MissingColumn(String),
    #[error("column '{column}' is not numeric: row {row} holds '{value}'")]
    NonNumericColumn {
        column: String,
        row: usize,
        value: String,
    },
    #[error("configuration error: {0}")]
    Config(String),
}

/// A specialized Result type for the dashboard pipeline.
pub type Result<T> = std::result::Result<T, EdaError>;
