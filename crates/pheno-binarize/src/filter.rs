//! Row-level filtering of semantically invalid measurements.

use polars::prelude::{BooleanChunked, DataFrame, NewChunkedArray};

use pheno_model::NONE_OF_THE_ABOVE;

use crate::error::Result;
use crate::frame_utils::{measurement_columns, numeric_cell};

/// Drops rows whose every measurement is a negative sentinel.
///
/// A row survives when any cell is non-negative. Multi-choice fields
/// (`keep_none_of_the_above`) additionally keep rows answering `-7`,
/// "none of the above", which would otherwise look invalid. Cells are
/// never removed, so negative leftovers in surviving rows stay visible to
/// the merge step.
pub fn filter_invalid_rows(df: &DataFrame, keep_none_of_the_above: bool) -> Result<DataFrame> {
    let measurements = measurement_columns(df);
    let mut keep = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        let mut keep_row = false;
        for name in &measurements {
            let Some(value) = numeric_cell(df, name, idx) else {
                continue;
            };
            if value >= 0.0 || (keep_none_of_the_above && value == NONE_OF_THE_ABOVE as f64) {
                keep_row = true;
                break;
            }
        }
        keep.push(keep_row);
    }
    let mask = BooleanChunked::from_slice("keep".into(), &keep);
    Ok(df.filter(&mask)?)
}
