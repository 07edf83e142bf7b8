//! Error types for the binarization engine.

use thiserror::Error;

/// Errors that can occur while binarizing a field table.
///
/// Data-dependent conditions (empty tables, malformed encodings, weak
/// bins) are not errors; they surface as diagnostics on the outcome so a
/// bad field can never abort the batch.
#[derive(Debug, Error)]
pub enum BinarizeError {
    /// A required column is missing from the field table.
    #[error("required column '{name}' not found in field table")]
    MissingColumn { name: String },

    /// A numerical field was dispatched without a binarization strategy.
    #[error("numerical field requires a binarization strategy")]
    MissingStrategy,

    /// Unknown strategy name.
    #[error("unknown binarization strategy: {0}")]
    UnknownStrategy(String),

    /// Quantile bounds outside [0, 1] or inverted.
    #[error("invalid quantile bounds: low={low}, high={high}")]
    InvalidQuantileBounds { low: f64, high: f64 },

    /// Underlying dataframe operation failed.
    #[error(transparent)]
    Polars(#[from] polars::error::PolarsError),
}

pub type Result<T> = std::result::Result<T, BinarizeError>;
