//! Categorical indicator construction: ordinal low/high bins and one-hot
//! expansion.

use polars::prelude::DataFrame;

use pheno_model::{Diagnostic, DiagnosticKind, FieldEncoding, FieldId};

use crate::bins::{MIN_BIN_SUPPORT, select_bins};
use crate::error::Result;
use crate::frame_utils::{MERGED, column_values_f64, indicator_series, measurement_columns, numeric_cell};

fn membership_mask(values: &[Option<f64>], codes: &[i64]) -> Vec<bool> {
    values
        .iter()
        .map(|value| value.is_some_and(|v| codes.iter().any(|code| v == *code as f64)))
        .collect()
}

fn count_set(mask: &[bool]) -> usize {
    mask.iter().filter(|flag| **flag).count()
}

/// Appends low/high bin indicators for an ordinal single-choice field.
///
/// With exactly two relevant codes the split is direct: the lower code is
/// the low column, the higher the high column. With more, the adaptive
/// search picks the smallest prefix/suffix holding more than 10% of
/// samples. Either way a bin that ends up under 10% support raises an
/// advisory diagnostic carrying the achieved count. Fewer than two
/// relevant codes leaves the table unbinarized; the dispatcher's column
/// count check flags it.
pub fn binarize_ordinal_bins(
    df: DataFrame,
    field_id: FieldId,
    encoding: &FieldEncoding,
) -> Result<(DataFrame, Vec<Diagnostic>)> {
    let codes = encoding.relevant_codes();
    if codes.len() < 2 {
        return Ok((df, Vec::new()));
    }

    let values = column_values_f64(&df, MERGED)?;
    let rows = values.len();
    if rows == 0 {
        return Ok((df, Vec::new()));
    }

    let (low_mask, high_mask, low_label, high_label) = if codes.len() == 2 {
        let low_label = encoding.two_way_label(codes[0]).unwrap_or_default();
        let high_label = encoding.two_way_label(codes[1]).unwrap_or_default();
        (
            membership_mask(&values, &codes[..1]),
            membership_mask(&values, &codes[1..]),
            low_label,
            high_label,
        )
    } else {
        let support = |subset: &[i64]| count_set(&membership_mask(&values, subset)) as f64 / rows as f64;
        let selection = select_bins(&codes, support, MIN_BIN_SUPPORT);
        let low_label = encoding.bin_label(&selection.low_codes);
        let high_label = encoding.bin_label(&selection.high_codes);
        (
            membership_mask(&values, &selection.low_codes),
            membership_mask(&values, &selection.high_codes),
            low_label,
            high_label,
        )
    };

    let mut diagnostics = Vec::new();
    let low_count = count_set(&low_mask);
    let high_count = count_set(&high_mask);
    if (low_count as f64 / rows as f64) < MIN_BIN_SUPPORT {
        diagnostics.push(Diagnostic::new(
            field_id,
            DiagnosticKind::LowSupportLowBin,
            format!("low bin '{low_label}' holds {low_count} of {rows} samples"),
        ));
    }
    if (high_count as f64 / rows as f64) < MIN_BIN_SUPPORT {
        diagnostics.push(Diagnostic::new(
            field_id,
            DiagnosticKind::LowSupportHighBin,
            format!("high bin '{high_label}' holds {high_count} of {rows} samples"),
        ));
    }

    let mut out = df;
    out.with_column(indicator_series(
        &format!("binarized_{low_label}_low"),
        &low_mask,
    ))?;
    out.with_column(indicator_series(
        &format!("binarized_{high_label}_high"),
        &high_mask,
    ))?;
    Ok((out, diagnostics))
}

/// Appends one indicator column per code, matched against the merged
/// consensus value of a single-choice field.
pub fn binarize_one_hot_merged(df: DataFrame, encoding: &FieldEncoding) -> Result<DataFrame> {
    let values = column_values_f64(&df, MERGED)?;
    let mut out = df;
    for code in encoding.one_hot_codes() {
        let Some(label) = encoding.one_hot_label(code) else {
            continue;
        };
        let mask = membership_mask(&values, &[code]);
        out.with_column(indicator_series(&format!("binarized_{label}"), &mask))?;
    }
    Ok(out)
}

/// Appends one indicator column per code for a multi-choice field: the
/// indicator is 1 when any measurement cell of the row holds the code.
///
/// Every indicator is computed against the measurement columns captured
/// before any column is appended, so previously built indicators can
/// never feed later ones.
pub fn binarize_one_hot_rows(df: DataFrame, encoding: &FieldEncoding) -> Result<DataFrame> {
    let measurements = measurement_columns(&df);
    let codes = encoding.one_hot_codes();
    let mut masks: Vec<(String, Vec<bool>)> = Vec::with_capacity(codes.len());
    for code in codes {
        let Some(label) = encoding.one_hot_label(code) else {
            continue;
        };
        let mut mask = Vec::with_capacity(df.height());
        for idx in 0..df.height() {
            let hit = measurements
                .iter()
                .any(|name| numeric_cell(&df, name, idx).is_some_and(|v| v == code as f64));
            mask.push(hit);
        }
        masks.push((format!("binarized_{label}"), mask));
    }
    let mut out = df;
    for (name, mask) in masks {
        out.with_column(indicator_series(&name, &mask))?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use polars::prelude::{Column, IntoColumn, NamedFrom, Series};

    use crate::frame_utils::{SAMPLE_ID, binarized_columns};

    use super::*;

    fn merged_table(values: Vec<f64>) -> DataFrame {
        let ids: Vec<i64> = (1..=values.len() as i64).collect();
        let cols: Vec<Column> = vec![
            Series::new(SAMPLE_ID.into(), ids).into_column(),
            Series::new(MERGED.into(), values).into_column(),
        ];
        DataFrame::new(cols).unwrap()
    }

    fn column_sum(df: &DataFrame, name: &str) -> usize {
        let col = df.column(name).unwrap();
        (0..df.height())
            .filter(|idx| {
                crate::frame_utils::any_to_i64(
                    col.get(*idx).unwrap_or(polars::prelude::AnyValue::Null),
                ) == Some(1)
            })
            .count()
    }

    #[test]
    fn two_way_split_is_direct() {
        let encoding = FieldEncoding::from_pairs([(0, "No"), (1, "Yes")]);
        let df = merged_table(vec![0.0, 1.0, 1.0, 0.0, 1.0]);
        let (out, diagnostics) = binarize_ordinal_bins(df, 1747, &encoding).unwrap();
        assert_eq!(
            binarized_columns(&out),
            vec!["binarized_No_low", "binarized_Yes_high"]
        );
        assert_eq!(column_sum(&out, "binarized_No_low"), 2);
        assert_eq!(column_sum(&out, "binarized_Yes_high"), 3);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn two_way_sums_cover_all_merged_samples() {
        let encoding = FieldEncoding::from_pairs([(0, "No"), (1, "Yes")]);
        let df = merged_table(vec![0.0, 1.0, 0.0, 1.0, 1.0, 0.0]);
        let (out, _) = binarize_ordinal_bins(df, 1747, &encoding).unwrap();
        let total = column_sum(&out, "binarized_No_low") + column_sum(&out, "binarized_Yes_high");
        assert_eq!(total, out.height());
    }

    #[test]
    fn adaptive_search_grows_low_bin() {
        let encoding = FieldEncoding::from_pairs([
            (0, "none"),
            (1, "mild"),
            (2, "moderate"),
            (3, "severe"),
            (4, "extreme"),
        ]);
        // Code 0 alone is 5% of samples; {0, 1} is 20%.
        let mut values = vec![0.0];
        values.extend(std::iter::repeat_n(1.0, 3));
        values.extend(std::iter::repeat_n(2.0, 10));
        values.extend(std::iter::repeat_n(3.0, 3));
        values.extend(std::iter::repeat_n(4.0, 3));
        let (out, diagnostics) =
            binarize_ordinal_bins(merged_table(values), 2000, &encoding).unwrap();
        assert_eq!(
            binarized_columns(&out),
            vec!["binarized_none|mild_low", "binarized_extreme_high"]
        );
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn weak_two_way_bin_raises_advisory() {
        let encoding = FieldEncoding::from_pairs([(0, "No"), (1, "Yes")]);
        let mut values = vec![0.0];
        values.extend(std::iter::repeat_n(1.0, 19));
        let (_, diagnostics) = binarize_ordinal_bins(merged_table(values), 1747, &encoding).unwrap();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].kind, DiagnosticKind::LowSupportLowBin);
        assert!(diagnostics[0].detail.contains("1 of 20"));
    }

    #[test]
    fn single_relevant_code_leaves_table_unbinarized() {
        let encoding = FieldEncoding::from_pairs([(1, "Yes"), (-1, "Do not know")]);
        let (out, diagnostics) =
            binarize_ordinal_bins(merged_table(vec![1.0, 1.0]), 1747, &encoding).unwrap();
        assert!(binarized_columns(&out).is_empty());
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn one_hot_rows_expand_every_code_including_none_of_the_above() {
        let encoding =
            FieldEncoding::from_pairs([(1, "A"), (2, "B"), (-7, "None of the above")]);
        let cols: Vec<Column> = vec![
            Series::new(SAMPLE_ID.into(), vec![10i64, 11, 12]).into_column(),
            Series::new("x0".into(), vec![Some(1.0), Some(-7.0), Some(2.0)]).into_column(),
            Series::new("x1".into(), vec![Some(2.0), None, None]).into_column(),
        ];
        let df = DataFrame::new(cols).unwrap();
        let out = binarize_one_hot_rows(df, &encoding).unwrap();
        assert_eq!(
            binarized_columns(&out),
            vec!["binarized_A", "binarized_B", "binarized_None-of-the-above"]
        );
        assert_eq!(column_sum(&out, "binarized_A"), 1);
        assert_eq!(column_sum(&out, "binarized_B"), 2);
        assert_eq!(column_sum(&out, "binarized_None-of-the-above"), 1);
    }

    #[test]
    fn one_hot_indicators_never_read_earlier_indicators() {
        // Codes 0 and 1 overlap indicator values; each column must be
        // computed from the raw measurements alone.
        let encoding = FieldEncoding::from_pairs([(0, "zero"), (1, "one")]);
        let cols: Vec<Column> = vec![
            Series::new(SAMPLE_ID.into(), vec![1i64, 2]).into_column(),
            Series::new("x0".into(), vec![Some(0.0), Some(1.0)]).into_column(),
        ];
        let df = DataFrame::new(cols).unwrap();
        let out = binarize_one_hot_rows(df, &encoding).unwrap();
        assert_eq!(column_sum(&out, "binarized_zero"), 1);
        assert_eq!(column_sum(&out, "binarized_one"), 1);
    }

    #[test]
    fn one_hot_merged_matches_consensus_value() {
        let encoding = FieldEncoding::from_pairs([(1, "Day shift"), (2, "Night shift")]);
        let out = binarize_one_hot_merged(merged_table(vec![1.0, 2.0, 2.0]), &encoding).unwrap();
        assert_eq!(column_sum(&out, "binarized_Day-shift"), 1);
        assert_eq!(column_sum(&out, "binarized_Night-shift"), 2);
    }
}
