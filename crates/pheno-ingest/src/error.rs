//! Error types for phenotype data ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading or storing pipeline inputs.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Required source file is absent. Fatal: the batch cannot proceed
    /// without its inputs.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read or create a file or directory.
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse a CSV file.
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    /// Failed to parse a JSON encoding dictionary.
    #[error("failed to parse JSON {path}: {source}")]
    JsonParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Required column not found in a tabular input.
    #[error("required column '{column}' not found in {path}")]
    MissingColumn { column: String, path: PathBuf },

    /// A cell held a value the pipeline cannot interpret.
    #[error("invalid {field} value '{value}' in {path}")]
    InvalidValue {
        field: String,
        value: String,
        path: PathBuf,
    },
}

pub type Result<T> = std::result::Result<T, IngestError>;
