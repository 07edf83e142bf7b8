//! End-to-end tests for the per-field binarization chain.

use polars::prelude::{AnyValue, Column, DataFrame, IntoColumn, NamedFrom, Series};

use pheno_binarize::{
    BinarizeOutcome, EncodingSet, FieldKind, NumericalOptions, QuantileBounds, Strategy,
    any_to_i64, binarize_field,
};
use pheno_model::{DiagnosticKind, FieldEncoding};

fn field_table(columns: Vec<(&str, Vec<Option<f64>>)>) -> DataFrame {
    let height = columns[0].1.len();
    let ids: Vec<i64> = (1..=height as i64).collect();
    let mut cols: Vec<Column> = vec![Series::new("eid".into(), ids).into_column()];
    for (name, values) in columns {
        cols.push(Series::new(name.into(), values).into_column());
    }
    DataFrame::new(cols).unwrap()
}

fn indicator_values(outcome: &BinarizeOutcome, name: &str) -> Vec<i64> {
    let col = outcome.data.column(name).unwrap();
    (0..outcome.data.height())
        .map(|idx| any_to_i64(col.get(idx).unwrap_or(AnyValue::Null)).unwrap())
        .collect()
}

#[test]
fn numerical_median_chain_partitions_population() {
    let df = field_table(vec![
        ("x0", vec![Some(1.0), Some(2.0), Some(3.0), Some(4.0), Some(-1.0)]),
        ("x1", vec![Some(3.0), None, Some(5.0), Some(4.0), Some(-3.0)]),
    ]);
    let outcome = binarize_field(
        &df,
        50,
        FieldKind::Numerical,
        &EncodingSet::none(),
        Some(NumericalOptions::new(Strategy::Median)),
    )
    .unwrap();

    // The all-negative row is filtered; four samples remain and every one
    // lands in exactly one of the two columns.
    assert_eq!(outcome.data.height(), 4);
    let columns = outcome.binarized_columns();
    assert_eq!(columns.len(), 2);
    assert!(columns[0].ends_with("_low"));
    assert!(columns[1].ends_with("_high"));
    let low = indicator_values(&outcome, &columns[0]);
    let high = indicator_values(&outcome, &columns[1]);
    for (l, h) in low.iter().zip(&high) {
        assert_eq!(l + h, 1);
    }
    assert!(outcome.is_meta_eligible());
}

#[test]
fn numerical_quantile_chain_embeds_thresholds() {
    let values: Vec<Option<f64>> = (1..=40).map(|v| Some(f64::from(v))).collect();
    let df = field_table(vec![("x0", values)]);
    let outcome = binarize_field(
        &df,
        21,
        FieldKind::Numerical,
        &EncodingSet::none(),
        Some(
            NumericalOptions::new(Strategy::Quantile)
                .with_bounds(QuantileBounds::new(0.05, 0.95).unwrap()),
        ),
    )
    .unwrap();

    let columns = outcome.binarized_columns();
    assert_eq!(columns.len(), 2);
    let low: i64 = indicator_values(&outcome, &columns[0]).iter().sum();
    let high: i64 = indicator_values(&outcome, &columns[1]).iter().sum();
    // The excluded middle is intentional under the quantile strategy.
    assert!(low + high < outcome.data.height() as i64);
}

#[test]
fn numerical_without_strategy_is_an_error() {
    let df = field_table(vec![("x0", vec![Some(1.0)])]);
    let result = binarize_field(&df, 50, FieldKind::Numerical, &EncodingSet::none(), None);
    assert!(result.is_err());
}

#[test]
fn single_ordinal_chain_merges_then_bins() {
    // Sample 3 has disagreeing repeats and drops out at the merge step.
    let df = field_table(vec![
        ("x0", vec![Some(0.0), Some(1.0), Some(0.0), Some(1.0)]),
        ("x1", vec![Some(0.0), None, Some(1.0), Some(1.0)]),
    ]);
    let encoding = FieldEncoding::from_pairs([(0, "No"), (1, "Yes")]);
    let outcome = binarize_field(
        &df,
        1747,
        FieldKind::SingleOrdinal,
        &EncodingSet::primary(encoding),
        None,
    )
    .unwrap();

    assert_eq!(outcome.data.height(), 3);
    let low: i64 = indicator_values(&outcome, "binarized_No_low").iter().sum();
    let high: i64 = indicator_values(&outcome, "binarized_Yes_high").iter().sum();
    // Exhaustive two-way codes: the bins cover every merged sample.
    assert_eq!(low + high, 3);
}

#[test]
fn multiple_chain_keeps_none_of_the_above_rows() {
    let df = field_table(vec![
        ("x0", vec![Some(1.0), Some(-7.0), Some(-1.0)]),
        ("x1", vec![Some(2.0), None, Some(-3.0)]),
    ]);
    let encoding = FieldEncoding::from_pairs([(1, "A"), (2, "B"), (-7, "None of the above")]);
    let outcome = binarize_field(
        &df,
        6145,
        FieldKind::Multiple,
        &EncodingSet::primary(encoding),
        None,
    )
    .unwrap();

    // Row 3 is all ordinary negatives and is dropped; the -7 row stays.
    assert_eq!(outcome.data.height(), 2);
    assert_eq!(
        outcome.binarized_columns(),
        vec!["binarized_A", "binarized_B", "binarized_None-of-the-above"]
    );
    assert_eq!(
        indicator_values(&outcome, "binarized_None-of-the-above"),
        vec![0, 1]
    );
}

#[test]
fn mixed_chain_unions_both_views() {
    let df = field_table(vec![(
        "x0",
        vec![Some(1.0), Some(2.0), Some(3.0), Some(1.0), Some(3.0)],
    )]);
    let one_hot = FieldEncoding::from_pairs([(1, "Happy"), (2, "Neutral"), (3, "Unhappy")]);
    let ordinal = FieldEncoding::from_pairs([(1, "Happy"), (2, "Neutral"), (3, "Unhappy")]);
    let outcome = binarize_field(
        &df,
        4537,
        FieldKind::SingleMixed,
        &EncodingSet::mixed(Some(one_hot), Some(ordinal)),
        None,
    )
    .unwrap();

    let columns = outcome.binarized_columns();
    // One-hot columns first, then the ordinal low/high bins.
    assert_eq!(columns[0], "binarized_Happy");
    assert_eq!(columns[1], "binarized_Neutral");
    assert_eq!(columns[2], "binarized_Unhappy");
    assert!(columns[3].ends_with("_low"));
    assert!(columns[4].ends_with("_high"));

    // A sample answering 1 is flagged in both the one-hot and the ordinal
    // low view; the overlap is preserved, not deduplicated.
    let one_hot_happy = indicator_values(&outcome, "binarized_Happy");
    let ordinal_low = indicator_values(&outcome, &columns[3]);
    assert_eq!(one_hot_happy[0], 1);
    assert_eq!(ordinal_low[0], 1);
}

#[test]
fn malformed_encoding_skips_field_without_error() {
    let df = field_table(vec![("x0", vec![Some(1.0), Some(2.0)])]);
    let outcome = binarize_field(
        &df,
        777,
        FieldKind::Multiple,
        &EncodingSet::none(),
        None,
    )
    .unwrap();

    assert!(outcome.binarized_columns().is_empty());
    assert!(!outcome.is_meta_eligible());
    assert_eq!(outcome.diagnostics.len(), 1);
    assert_eq!(outcome.diagnostics[0].kind, DiagnosticKind::MalformedEncoding);
    // The table itself passes through unbinarized.
    assert_eq!(outcome.data.height(), 2);
}

#[test]
fn empty_after_filter_flags_the_field() {
    let df = field_table(vec![("x0", vec![Some(-1.0), Some(-3.0)])]);
    let encoding = FieldEncoding::from_pairs([(0, "No"), (1, "Yes")]);
    let outcome = binarize_field(
        &df,
        123,
        FieldKind::SingleOrdinal,
        &EncodingSet::primary(encoding),
        None,
    )
    .unwrap();

    assert_eq!(outcome.data.height(), 0);
    assert!(!outcome.is_meta_eligible());
    assert_eq!(outcome.diagnostics[0].kind, DiagnosticKind::EmptyTable);
}
