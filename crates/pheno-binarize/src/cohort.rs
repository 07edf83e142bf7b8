//! Restricting a field table to the cohort of interest.

use std::collections::HashSet;

use polars::prelude::{AnyValue, BooleanChunked, DataFrame, NewChunkedArray};

use crate::error::{BinarizeError, Result};
use crate::frame_utils::{SAMPLE_ID, any_to_i64};

/// Keeps only rows whose sample id appears in the cohort set.
///
/// Pure row filter; column layout is untouched and an empty result is
/// valid.
pub fn restrict_to_cohort(df: &DataFrame, cohort: &HashSet<i64>) -> Result<DataFrame> {
    let ids = df
        .column(SAMPLE_ID)
        .map_err(|_| BinarizeError::MissingColumn {
            name: SAMPLE_ID.to_string(),
        })?;
    let mut keep = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        let id = any_to_i64(ids.get(idx).unwrap_or(AnyValue::Null));
        keep.push(id.is_some_and(|id| cohort.contains(&id)));
    }
    let mask = BooleanChunked::from_slice("cohort".into(), &keep);
    Ok(df.filter(&mask)?)
}
