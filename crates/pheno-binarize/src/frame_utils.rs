//! Conventions and cell accessors for field tables.
//!
//! A field table carries the sample id in an `eid` column; every other
//! column is one repeated-measurement instance, until the pipeline appends
//! a `merged` consensus column and `binarized_*` indicator columns.

use polars::prelude::{AnyValue, DataFrame, NamedFrom, Series};

use crate::error::{BinarizeError, Result};

/// Sample id column name.
pub const SAMPLE_ID: &str = "eid";

/// Name of the merged consensus/mean column.
pub const MERGED: &str = "merged";

/// Prefix shared by every indicator column.
pub const BINARIZED_PREFIX: &str = "binarized_";

pub fn any_to_f64(value: AnyValue<'_>) -> Option<f64> {
    match value {
        AnyValue::Null => None,
        AnyValue::Int8(v) => Some(f64::from(v)),
        AnyValue::Int16(v) => Some(f64::from(v)),
        AnyValue::Int32(v) => Some(f64::from(v)),
        AnyValue::Int64(v) => Some(v as f64),
        AnyValue::UInt8(v) => Some(f64::from(v)),
        AnyValue::UInt16(v) => Some(f64::from(v)),
        AnyValue::UInt32(v) => Some(f64::from(v)),
        AnyValue::UInt64(v) => Some(v as f64),
        AnyValue::Float32(v) => Some(f64::from(v)),
        AnyValue::Float64(v) => Some(v),
        AnyValue::Boolean(v) => Some(if v { 1.0 } else { 0.0 }),
        AnyValue::String(s) => parse_f64(s),
        AnyValue::StringOwned(s) => parse_f64(&s),
        _ => None,
    }
}

pub fn any_to_i64(value: AnyValue<'_>) -> Option<i64> {
    match value {
        AnyValue::Null => None,
        AnyValue::Int8(v) => Some(i64::from(v)),
        AnyValue::Int16(v) => Some(i64::from(v)),
        AnyValue::Int32(v) => Some(i64::from(v)),
        AnyValue::Int64(v) => Some(v),
        AnyValue::UInt8(v) => Some(i64::from(v)),
        AnyValue::UInt16(v) => Some(i64::from(v)),
        AnyValue::UInt32(v) => Some(i64::from(v)),
        AnyValue::UInt64(v) => i64::try_from(v).ok(),
        AnyValue::Float32(v) => Some(v as i64),
        AnyValue::Float64(v) => Some(v as i64),
        AnyValue::String(s) => s.trim().parse::<i64>().ok(),
        AnyValue::StringOwned(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

fn parse_f64(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

/// Formats a threshold for embedding in a column name, without trailing
/// zeros: `3.50` becomes `"3.5"`, `4.0` becomes `"4"`.
pub fn format_threshold(value: f64) -> String {
    let rendered = format!("{value}");
    let trimmed = if rendered.contains('.') {
        rendered.trim_end_matches('0').trim_end_matches('.')
    } else {
        rendered.as_str()
    };
    if trimmed.is_empty() {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Numeric value of one cell, `None` for nulls and non-numeric content.
pub fn numeric_cell(df: &DataFrame, name: &str, idx: usize) -> Option<f64> {
    let column = df.column(name).ok()?;
    any_to_f64(column.get(idx).unwrap_or(AnyValue::Null))
}

/// All numeric values of one column, in row order.
pub fn column_values_f64(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    let column = df.column(name).map_err(|_| BinarizeError::MissingColumn {
        name: name.to_string(),
    })?;
    Ok((0..df.height())
        .map(|idx| any_to_f64(column.get(idx).unwrap_or(AnyValue::Null)))
        .collect())
}

/// The repeated-measurement columns: everything except the sample id, the
/// merged column, and previously appended indicator columns.
pub fn measurement_columns(df: &DataFrame) -> Vec<String> {
    df.get_column_names()
        .iter()
        .map(|name| name.to_string())
        .filter(|name| {
            name != SAMPLE_ID && name != MERGED && !name.starts_with(BINARIZED_PREFIX)
        })
        .collect()
}

/// The indicator columns appended by binarization, in frame order.
pub fn binarized_columns(df: &DataFrame) -> Vec<String> {
    df.get_column_names()
        .iter()
        .map(|name| name.to_string())
        .filter(|name| name.starts_with(BINARIZED_PREFIX))
        .collect()
}

/// Builds a 0/1 indicator series from a boolean row mask.
pub fn indicator_series(name: &str, mask: &[bool]) -> Series {
    let values: Vec<i32> = mask.iter().map(|flag| i32::from(*flag)).collect();
    Series::new(name.into(), values)
}

#[cfg(test)]
mod tests {
    use polars::prelude::{Column, DataFrame, IntoColumn};

    use super::*;

    fn sample_df() -> DataFrame {
        let cols: Vec<Column> = vec![
            Series::new(SAMPLE_ID.into(), vec![1i64, 2, 3]).into_column(),
            Series::new("x0".into(), vec![Some(1.0), None, Some(3.0)]).into_column(),
            Series::new("x1".into(), vec![Some(2.0), Some(2.0), None]).into_column(),
        ];
        DataFrame::new(cols).unwrap()
    }

    #[test]
    fn measurement_columns_skip_id_merged_and_indicators() {
        let mut df = sample_df();
        df.with_column(Series::new(MERGED.into(), vec![1.0, 2.0, 3.0]))
            .unwrap();
        df.with_column(indicator_series("binarized_a", &[true, false, true]))
            .unwrap();
        assert_eq!(measurement_columns(&df), vec!["x0", "x1"]);
        assert_eq!(binarized_columns(&df), vec!["binarized_a"]);
    }

    #[test]
    fn numeric_cell_handles_nulls() {
        let df = sample_df();
        assert_eq!(numeric_cell(&df, "x0", 0), Some(1.0));
        assert_eq!(numeric_cell(&df, "x0", 1), None);
        assert_eq!(numeric_cell(&df, "missing", 0), None);
    }

    #[test]
    fn threshold_formatting() {
        assert_eq!(format_threshold(3.5), "3.5");
        assert_eq!(format_threshold(4.0), "4");
        assert_eq!(format_threshold(0.0), "0");
        assert_eq!(format_threshold(172.25), "172.25");
    }
}
