//! Thresholding merged numeric values into low/high indicators.

use std::fmt;
use std::str::FromStr;

use polars::prelude::DataFrame;

use crate::error::{BinarizeError, Result};
use crate::frame_utils::{MERGED, column_values_f64, format_threshold, indicator_series};

/// Binarization strategy for integer and continuous fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// One threshold at the median; low/high partition every sample.
    Median,
    /// Two thresholds at outer quantiles; samples strictly between them
    /// land in neither column, building extreme-phenotype contrasts.
    Quantile,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Median => "median",
            Strategy::Quantile => "quantile",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = BinarizeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "median" => Ok(Strategy::Median),
            "quantile" => Ok(Strategy::Quantile),
            other => Err(BinarizeError::UnknownStrategy(other.to_string())),
        }
    }
}

/// Quantile pair for the [`Strategy::Quantile`] strategy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuantileBounds {
    pub low: f64,
    pub high: f64,
}

impl QuantileBounds {
    pub fn new(low: f64, high: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&low) || !(0.0..=1.0).contains(&high) || low > high {
            return Err(BinarizeError::InvalidQuantileBounds { low, high });
        }
        Ok(Self { low, high })
    }
}

impl Default for QuantileBounds {
    fn default() -> Self {
        Self {
            low: 0.25,
            high: 0.75,
        }
    }
}

/// Linear-interpolation quantile over sorted values, matching the
/// original pipeline's conventions.
fn quantile_linear(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let position = q * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    if lower == upper {
        return Some(sorted[lower]);
    }
    let weight = position - lower as f64;
    Some(sorted[lower] * (1.0 - weight) + sorted[upper] * weight)
}

/// Appends low/high indicator columns for the `merged` numeric column.
///
/// Median: `low = merged <= median`, `high = merged > median`; the two
/// columns partition the full population. Quantile: `low = merged <=
/// q(low)`, `high = merged >= q(high)`; values strictly between the
/// thresholds get 0 in both columns. Threshold values are embedded in the
/// column names for traceability.
pub fn binarize_numerical(
    df: DataFrame,
    strategy: Strategy,
    bounds: QuantileBounds,
) -> Result<DataFrame> {
    let values = column_values_f64(&df, MERGED)?;
    let mut defined: Vec<f64> = values.iter().flatten().copied().collect();
    defined.sort_by(|a, b| a.total_cmp(b));

    let mut out = df;
    match strategy {
        Strategy::Median => {
            let Some(threshold) = quantile_linear(&defined, 0.5) else {
                return Ok(out);
            };
            let low: Vec<bool> = values
                .iter()
                .map(|v| v.is_some_and(|v| v <= threshold))
                .collect();
            let high: Vec<bool> = values
                .iter()
                .map(|v| v.is_some_and(|v| v > threshold))
                .collect();
            let rendered = format_threshold(threshold);
            out.with_column(indicator_series(
                &format!("binarized_{rendered}_low"),
                &low,
            ))?;
            out.with_column(indicator_series(
                &format!("binarized_{rendered}_high"),
                &high,
            ))?;
        }
        Strategy::Quantile => {
            let (Some(q_low), Some(q_high)) = (
                quantile_linear(&defined, bounds.low),
                quantile_linear(&defined, bounds.high),
            ) else {
                return Ok(out);
            };
            let low: Vec<bool> = values
                .iter()
                .map(|v| v.is_some_and(|v| v <= q_low))
                .collect();
            let high: Vec<bool> = values
                .iter()
                .map(|v| v.is_some_and(|v| v >= q_high))
                .collect();
            out.with_column(indicator_series(
                &format!("binarized_{}_low", format_threshold(q_low)),
                &low,
            ))?;
            out.with_column(indicator_series(
                &format!("binarized_{}_high", format_threshold(q_high)),
                &high,
            ))?;
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use polars::prelude::{Column, IntoColumn, NamedFrom, Series};

    use crate::frame_utils::SAMPLE_ID;

    use super::*;

    fn merged_table(values: Vec<f64>) -> DataFrame {
        let ids: Vec<i64> = (1..=values.len() as i64).collect();
        let cols: Vec<Column> = vec![
            Series::new(SAMPLE_ID.into(), ids).into_column(),
            Series::new(MERGED.into(), values).into_column(),
        ];
        DataFrame::new(cols).unwrap()
    }

    fn column_sum(df: &DataFrame, name: &str) -> i64 {
        let col = df.column(name).unwrap();
        (0..df.height())
            .map(|idx| {
                crate::frame_utils::any_to_i64(
                    col.get(idx).unwrap_or(polars::prelude::AnyValue::Null),
                )
                .unwrap_or(0)
            })
            .sum()
    }

    #[test]
    fn median_partitions_every_sample() {
        let df = merged_table(vec![1.0, 2.0, 3.0, 4.0, 5.0]);
        let out = binarize_numerical(df, Strategy::Median, QuantileBounds::default()).unwrap();
        let low = column_sum(&out, "binarized_3_low");
        let high = column_sum(&out, "binarized_3_high");
        assert_eq!(low, 3);
        assert_eq!(high, 2);
        assert_eq!(low + high, out.height() as i64);
    }

    #[test]
    fn quantile_leaves_an_excluded_middle() {
        let values: Vec<f64> = (1..=100).map(f64::from).collect();
        let df = merged_table(values);
        let out = binarize_numerical(
            df,
            Strategy::Quantile,
            QuantileBounds::new(0.05, 0.95).unwrap(),
        )
        .unwrap();
        let names = crate::frame_utils::binarized_columns(&out);
        assert_eq!(names.len(), 2);
        let low = column_sum(&out, &names[0]);
        let high = column_sum(&out, &names[1]);
        assert!(low + high < out.height() as i64);
        assert!(low > 0 && high > 0);
    }

    #[test]
    fn quantile_interpolation_is_linear() {
        let sorted = vec![1.0, 2.0, 3.0, 4.0];
        assert_eq!(quantile_linear(&sorted, 0.5), Some(2.5));
        assert_eq!(quantile_linear(&sorted, 0.0), Some(1.0));
        assert_eq!(quantile_linear(&sorted, 1.0), Some(4.0));
        assert_eq!(quantile_linear(&[], 0.5), None);
    }

    #[test]
    fn strategy_parsing() {
        assert_eq!("median".parse::<Strategy>().unwrap(), Strategy::Median);
        assert_eq!("Quantile".parse::<Strategy>().unwrap(), Strategy::Quantile);
        assert!("mode".parse::<Strategy>().is_err());
    }

    #[test]
    fn quantile_bounds_validation() {
        assert!(QuantileBounds::new(0.05, 0.95).is_ok());
        assert!(QuantileBounds::new(0.95, 0.05).is_err());
        assert!(QuantileBounds::new(-0.1, 0.5).is_err());
    }
}
