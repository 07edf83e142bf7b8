//! Aligning a field's binarized columns onto the shared cohort index.

use std::collections::BTreeMap;

use polars::prelude::{AnyValue, Column, DataFrame, IntoColumn, NamedFrom, Series};

use pheno_binarize::{SAMPLE_ID, any_to_i64};

use crate::error::{MetaError, Result};
use crate::rename::RenamePair;

/// Builds a new frame with one row per cohort sample, in cohort order,
/// carrying the field's renamed indicator columns.
///
/// Samples absent from the field's table get nulls in every column; they
/// are not dropped here — the final inner join across all fields does
/// that.
pub fn reindex_renamed(
    df: &DataFrame,
    pairs: &[RenamePair],
    index: &[i64],
) -> Result<DataFrame> {
    let ids = df
        .column(SAMPLE_ID)
        .map_err(|_| MetaError::MissingColumn {
            name: SAMPLE_ID.to_string(),
        })?;
    let mut row_of: BTreeMap<i64, usize> = BTreeMap::new();
    for idx in 0..df.height() {
        if let Some(id) = any_to_i64(ids.get(idx).unwrap_or(AnyValue::Null)) {
            row_of.insert(id, idx);
        }
    }

    let mut columns: Vec<Column> =
        vec![Series::new(SAMPLE_ID.into(), index.to_vec()).into_column()];
    for (old, new) in pairs {
        let source = df.column(old).map_err(|_| MetaError::MissingColumn {
            name: old.clone(),
        })?;
        let values: Vec<Option<i32>> = index
            .iter()
            .map(|id| {
                row_of.get(id).and_then(|row| {
                    any_to_i64(source.get(*row).unwrap_or(AnyValue::Null))
                        .map(|v| v as i32)
                })
            })
            .collect();
        columns.push(Series::new(new.as_str().into(), values).into_column());
    }
    Ok(DataFrame::new(columns)?)
}
