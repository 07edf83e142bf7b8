//! Error types for meta table assembly.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MetaError {
    /// A required column is missing from a binarized table.
    #[error("required column '{name}' not found in binarized table")]
    MissingColumn { name: String },

    /// Two fields produced the same renamed column. The manifest most
    /// likely lists a field id twice.
    #[error("duplicate meta column '{name}'")]
    DuplicateColumn { name: String },

    /// Underlying dataframe operation failed.
    #[error(transparent)]
    Polars(#[from] polars::error::PolarsError),
}

pub type Result<T> = std::result::Result<T, MetaError>;
