//! Reducing repeated measurements to one merged value per sample.

use polars::prelude::{BooleanChunked, DataFrame, NamedFrom, NewChunkedArray, Series};

use crate::error::Result;
use crate::frame_utils::{MERGED, measurement_columns, numeric_cell};

/// Merges single-choice categorical measurements by consensus.
///
/// The candidate value is the first non-null cell left to right. A row
/// survives only when every non-null cell agrees (exactly one distinct
/// value); disagreeing rows are dropped. Negative sentinels left in a row
/// by the filter count as distinct values, so a row like `[-3, 2]` fails
/// consensus.
pub fn merge_consensus(df: &DataFrame) -> Result<DataFrame> {
    let measurements = measurement_columns(df);
    let mut merged: Vec<Option<f64>> = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        let mut candidate = None;
        let mut distinct: Vec<f64> = Vec::new();
        for name in &measurements {
            let Some(value) = numeric_cell(df, name, idx) else {
                continue;
            };
            if candidate.is_none() {
                candidate = Some(value);
            }
            if !distinct.contains(&value) {
                distinct.push(value);
            }
        }
        merged.push(if distinct.len() == 1 { candidate } else { None });
    }

    let keep: Vec<bool> = merged.iter().map(Option::is_some).collect();
    let mut out = df.clone();
    out.with_column(Series::new(MERGED.into(), merged))?;
    let mask = BooleanChunked::from_slice("consensus".into(), &keep);
    Ok(out.filter(&mask)?)
}

/// Merges numerical measurements by arithmetic mean over non-null cells.
///
/// No rows are dropped; negative leftovers from the filter participate in
/// the mean.
pub fn merge_mean(df: &DataFrame) -> Result<DataFrame> {
    let measurements = measurement_columns(df);
    let mut merged: Vec<Option<f64>> = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        let mut sum = 0.0;
        let mut count = 0usize;
        for name in &measurements {
            if let Some(value) = numeric_cell(df, name, idx) {
                sum += value;
                count += 1;
            }
        }
        merged.push(if count > 0 { Some(sum / count as f64) } else { None });
    }
    let mut out = df.clone();
    out.with_column(Series::new(MERGED.into(), merged))?;
    Ok(out)
}
