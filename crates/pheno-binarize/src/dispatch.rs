//! Type-driven dispatch: one closed set of field kinds selects the
//! filter, merge, and binarization procedure up front.

use polars::prelude::DataFrame;
use tracing::debug;

use pheno_model::{Diagnostic, DiagnosticKind, FieldEncoding, FieldId, FieldType, Ordinality};

use crate::categorical::{binarize_one_hot_merged, binarize_one_hot_rows, binarize_ordinal_bins};
use crate::error::{BinarizeError, Result};
use crate::filter::filter_invalid_rows;
use crate::frame_utils::binarized_columns;
use crate::merge::{merge_consensus, merge_mean};
use crate::numerical::{QuantileBounds, Strategy, binarize_numerical};

/// The binarization procedure a field resolves to.
///
/// Selected once from the manifest's type and ordinality columns; no
/// string comparison happens past this point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Integer/continuous: mean merge, threshold into low/high.
    Numerical,
    /// Single-choice with ordered codes: consensus merge, low/high bins.
    SingleOrdinal,
    /// Single-choice nominal ("O"): consensus merge, one-hot expansion.
    SingleOneHot,
    /// Single-choice mixed ("B"): one-hot and ordinal views combined.
    SingleMixed,
    /// Multi-choice: no merge, one-hot across all measurement columns.
    Multiple,
}

impl FieldKind {
    /// Resolve the procedure from manifest columns. Ordinality only
    /// matters for single-choice categorical fields.
    pub fn classify(field_type: FieldType, ordinality: Ordinality) -> Self {
        match field_type {
            FieldType::Integer | FieldType::Continuous => FieldKind::Numerical,
            FieldType::CategoricalMultiple => FieldKind::Multiple,
            FieldType::CategoricalSingle => match ordinality {
                Ordinality::Ordinal => FieldKind::SingleOrdinal,
                Ordinality::OneHot => FieldKind::SingleOneHot,
                Ordinality::Mixed => FieldKind::SingleMixed,
            },
        }
    }

    /// Whether the value filter keeps `-7` ("none of the above") rows.
    pub fn keeps_none_of_the_above(&self) -> bool {
        matches!(self, FieldKind::Multiple)
    }

    /// Whether this kind needs a numerical strategy to run.
    pub fn is_numerical(&self) -> bool {
        matches!(self, FieldKind::Numerical)
    }
}

/// Encoding dictionaries available to one field.
///
/// Plain categorical fields use `primary`; mixed ("B") fields instead
/// carry the two separately prepared dictionaries. A `None` where a
/// dictionary is required marks the encoding as malformed, which is
/// field-skippable, never fatal.
#[derive(Debug, Clone, Default)]
pub struct EncodingSet {
    pub primary: Option<FieldEncoding>,
    pub one_hot: Option<FieldEncoding>,
    pub ordinal: Option<FieldEncoding>,
}

impl EncodingSet {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn primary(encoding: FieldEncoding) -> Self {
        Self {
            primary: Some(encoding),
            ..Self::default()
        }
    }

    pub fn mixed(one_hot: Option<FieldEncoding>, ordinal: Option<FieldEncoding>) -> Self {
        Self {
            primary: None,
            one_hot,
            ordinal,
        }
    }
}

/// Options for numerical binarization.
#[derive(Debug, Clone, Copy)]
pub struct NumericalOptions {
    pub strategy: Strategy,
    pub bounds: QuantileBounds,
}

impl NumericalOptions {
    pub fn new(strategy: Strategy) -> Self {
        Self {
            strategy,
            bounds: QuantileBounds::default(),
        }
    }

    pub fn with_bounds(mut self, bounds: QuantileBounds) -> Self {
        self.bounds = bounds;
        self
    }
}

/// Result of running one field through filter, merge, and binarization.
#[derive(Debug, Clone)]
pub struct BinarizeOutcome {
    /// The field table with indicator columns appended (or unchanged when
    /// the field was skippable).
    pub data: DataFrame,
    /// Structured events collected along the way.
    pub diagnostics: Vec<Diagnostic>,
}

impl BinarizeOutcome {
    /// Names of the indicator columns, in frame order.
    pub fn binarized_columns(&self) -> Vec<String> {
        binarized_columns(&self.data)
    }

    /// Whether the field may enter the meta table: at least two indicator
    /// columns and no field-skippable diagnostic.
    pub fn is_meta_eligible(&self) -> bool {
        self.diagnostics.iter().all(Diagnostic::is_advisory)
            && self.binarized_columns().len() >= 2
    }
}

/// Runs one field table through the full per-field chain:
/// value filter, measurement merge, and kind-specific binarization.
///
/// Data-dependent failures (empty result, malformed encoding, too few
/// indicator columns) come back as diagnostics on the outcome with the
/// table passed through unbinarized; errors are reserved for genuine
/// dataframe failures.
pub fn binarize_field(
    df: &DataFrame,
    field_id: FieldId,
    kind: FieldKind,
    encodings: &EncodingSet,
    numerical: Option<NumericalOptions>,
) -> Result<BinarizeOutcome> {
    let filtered = filter_invalid_rows(df, kind.keeps_none_of_the_above())?;
    let merged = match kind {
        FieldKind::Numerical => merge_mean(&filtered)?,
        FieldKind::SingleOrdinal | FieldKind::SingleOneHot | FieldKind::SingleMixed => {
            merge_consensus(&filtered)?
        }
        FieldKind::Multiple => filtered,
    };

    if merged.height() == 0 {
        return Ok(BinarizeOutcome {
            data: merged,
            diagnostics: vec![Diagnostic::new(
                field_id,
                DiagnosticKind::EmptyTable,
                "no rows survived value filtering and merging",
            )],
        });
    }

    let mut diagnostics = Vec::new();
    let data = match kind {
        FieldKind::Numerical => {
            let options = numerical.ok_or(BinarizeError::MissingStrategy)?;
            binarize_numerical(merged, options.strategy, options.bounds)?
        }
        FieldKind::SingleOrdinal => match encodings.primary.as_ref() {
            Some(encoding) => {
                let (data, bin_diagnostics) = binarize_ordinal_bins(merged, field_id, encoding)?;
                diagnostics.extend(bin_diagnostics);
                data
            }
            None => {
                diagnostics.push(malformed_encoding(field_id));
                merged
            }
        },
        FieldKind::SingleOneHot => match encodings.primary.as_ref() {
            Some(encoding) => binarize_one_hot_merged(merged, encoding)?,
            None => {
                diagnostics.push(malformed_encoding(field_id));
                merged
            }
        },
        FieldKind::SingleMixed => {
            match (encodings.one_hot.as_ref(), encodings.ordinal.as_ref()) {
                (Some(one_hot), Some(ordinal)) => {
                    // One-hot columns first, then the ordinal low/high
                    // bins; overlapping 1s between the two views are
                    // preserved as observed.
                    let data = binarize_one_hot_merged(merged, one_hot)?;
                    let (data, bin_diagnostics) = binarize_ordinal_bins(data, field_id, ordinal)?;
                    diagnostics.extend(bin_diagnostics);
                    data
                }
                _ => {
                    diagnostics.push(malformed_encoding(field_id));
                    merged
                }
            }
        }
        FieldKind::Multiple => match encodings.primary.as_ref() {
            Some(encoding) => binarize_one_hot_rows(merged, encoding)?,
            None => {
                diagnostics.push(malformed_encoding(field_id));
                merged
            }
        },
    };

    let indicator_count = binarized_columns(&data).len();
    let skippable = diagnostics.iter().any(|d| !d.is_advisory());
    if !skippable && indicator_count < 2 {
        diagnostics.push(Diagnostic::new(
            field_id,
            DiagnosticKind::TooFewBinarizedColumns,
            format!("produced {indicator_count} indicator columns"),
        ));
    }
    debug!(
        field_id,
        rows = data.height(),
        indicators = indicator_count,
        "field binarized"
    );

    Ok(BinarizeOutcome { data, diagnostics })
}

fn malformed_encoding(field_id: FieldId) -> Diagnostic {
    Diagnostic::new(
        field_id,
        DiagnosticKind::MalformedEncoding,
        "encoding is missing or not a code-to-label mapping; field left unbinarized",
    )
}
