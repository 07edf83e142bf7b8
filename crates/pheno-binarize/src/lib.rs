//! Binarization engine for repeated-measurement phenotype tables.
//!
//! The per-field chain runs value filtering, measurement merging, and
//! type-driven binarization, then restricts the result to the cohort of
//! interest:
//!
//! - **filter**: drop rows holding only negative sentinel values
//! - **merge**: consensus (single-choice) or mean (numerical) merging
//! - **numerical**: median/quantile thresholding into low/high indicators
//! - **bins** / **categorical**: adaptive bin search, direct two-way
//!   splits, and one-hot expansion
//! - **dispatch**: the closed [`FieldKind`] set tying it all together
//! - **cohort**: restriction to the cohort sample set

pub mod bins;
pub mod categorical;
pub mod cohort;
pub mod dispatch;
pub mod error;
pub mod filter;
pub mod frame_utils;
pub mod merge;
pub mod numerical;

pub use bins::{BinSelection, MIN_BIN_SUPPORT, select_bins};
pub use categorical::{binarize_one_hot_merged, binarize_one_hot_rows, binarize_ordinal_bins};
pub use cohort::restrict_to_cohort;
pub use dispatch::{BinarizeOutcome, EncodingSet, FieldKind, NumericalOptions, binarize_field};
pub use error::{BinarizeError, Result};
pub use frame_utils::{
    BINARIZED_PREFIX, MERGED, SAMPLE_ID, any_to_f64, any_to_i64, binarized_columns,
    column_values_f64, format_threshold, indicator_series, measurement_columns, numeric_cell,
};
pub use filter::filter_invalid_rows;
pub use merge::{merge_consensus, merge_mean};
pub use numerical::{QuantileBounds, Strategy, binarize_numerical};
