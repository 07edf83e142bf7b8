//! Assembling per-field binarized tables into one meta table.

use std::collections::HashSet;

use polars::prelude::{AnyValue, BooleanChunked, Column, DataFrame, IntoColumn, NamedFrom, NewChunkedArray, Series};
use tracing::debug;

use pheno_binarize::{EncodingSet, SAMPLE_ID, binarized_columns};
use pheno_model::{Diagnostic, DiagnosticKind, FieldId, FieldRecord};

use crate::error::{MetaError, Result};
use crate::provenance::ProvenanceTable;
use crate::reindex::reindex_renamed;
use crate::rename::{
    RenamePair, RenameStrategy, rename_by_encoding, rename_mixed, rename_plain_suffix,
};

/// One field's table, renamed and aligned to the cohort index, ready for
/// the final join.
#[derive(Debug, Clone)]
pub struct PreparedField {
    pub field_id: FieldId,
    /// `eid` plus the renamed indicator columns, one row per cohort
    /// sample in cohort order.
    pub data: DataFrame,
    /// The renames applied, in meta column order.
    pub pairs: Vec<RenamePair>,
}

/// Result of preparing one field for assembly.
#[derive(Debug, Clone)]
pub struct PrepareOutcome {
    /// `None` when the field is excluded from the meta table.
    pub prepared: Option<PreparedField>,
    pub diagnostics: Vec<Diagnostic>,
}

impl PrepareOutcome {
    fn excluded(diagnostic: Diagnostic) -> Self {
        Self {
            prepared: None,
            diagnostics: vec![diagnostic],
        }
    }
}

/// Renames and reindexes one field's stored binarized table.
///
/// Empty or under-binarized tables, missing dictionaries, and
/// unresolvable labels exclude the field with a diagnostic; the batch
/// never fails over one field.
pub fn prepare_field_table(
    df: &DataFrame,
    record: &FieldRecord,
    encodings: &EncodingSet,
    index: &[i64],
) -> Result<PrepareOutcome> {
    let field_id = record.field_id;
    if df.height() == 0 {
        return Ok(PrepareOutcome::excluded(Diagnostic::new(
            field_id,
            DiagnosticKind::EmptyTable,
            "stored binarized table has no rows",
        )));
    }
    let binarized = binarized_columns(df);
    if binarized.len() < 2 {
        return Ok(PrepareOutcome::excluded(Diagnostic::new(
            field_id,
            DiagnosticKind::TooFewBinarizedColumns,
            format!("stored table has {} indicator columns", binarized.len()),
        )));
    }

    let strategy = RenameStrategy::for_field(record.field_type, record.ordinality);
    let pairs = match strategy {
        RenameStrategy::PlainSuffix => rename_plain_suffix(field_id, &binarized),
        RenameStrategy::EncodingLookup => match encodings.primary.as_ref() {
            Some(encoding) => match rename_by_encoding(field_id, &binarized, encoding) {
                Ok(pairs) => pairs,
                Err(label) => {
                    return Ok(PrepareOutcome::excluded(Diagnostic::new(
                        field_id,
                        DiagnosticKind::UnresolvedLabel,
                        format!("column label '{label}' not present in encoding"),
                    )));
                }
            },
            None => {
                return Ok(PrepareOutcome::excluded(malformed_encoding(field_id)));
            }
        },
        RenameStrategy::MixedSplit => match encodings.one_hot.as_ref() {
            Some(encoding) => match rename_mixed(field_id, &binarized, encoding) {
                Ok(pairs) => pairs,
                Err(label) => {
                    return Ok(PrepareOutcome::excluded(Diagnostic::new(
                        field_id,
                        DiagnosticKind::UnresolvedLabel,
                        format!("column label '{label}' not present in ohe encoding"),
                    )));
                }
            },
            None => {
                return Ok(PrepareOutcome::excluded(malformed_encoding(field_id)));
            }
        },
    };

    let data = reindex_renamed(df, &pairs, index)?;
    debug!(field_id, columns = pairs.len(), "field prepared for meta");
    Ok(PrepareOutcome {
        prepared: Some(PreparedField {
            field_id,
            data,
            pairs,
        }),
        diagnostics: Vec::new(),
    })
}

fn malformed_encoding(field_id: FieldId) -> Diagnostic {
    Diagnostic::new(
        field_id,
        DiagnosticKind::MalformedEncoding,
        "encoding is missing or not a code-to-label mapping; field excluded from meta table",
    )
}

/// The assembled meta table and its provenance record.
#[derive(Debug, Clone)]
pub struct MetaAssembly {
    /// `eid` plus every field's renamed columns; rows are the samples
    /// present in every field's table.
    pub table: DataFrame,
    /// Old-to-new rename rows in field processing order.
    pub provenance: ProvenanceTable,
}

/// Joins prepared fields into the meta table.
///
/// Fields are stacked in the order given (manifest order, regardless of
/// worker completion order). Every prepared frame is already aligned to
/// the cohort index, so stacking columns is exact; dropping the rows
/// that picked up a null anywhere yields inner-join semantics — a sample
/// missing any field's indicator is dropped entirely.
pub fn assemble_meta(fields: &[PreparedField], index: &[i64]) -> Result<MetaAssembly> {
    let mut table = DataFrame::new(vec![
        Series::new(SAMPLE_ID.into(), index.to_vec()).into_column(),
    ])?;
    let mut provenance = ProvenanceTable::new();
    let mut seen: HashSet<String> = HashSet::new();

    for field in fields {
        for (_, new) in &field.pairs {
            if !seen.insert(new.clone()) {
                return Err(MetaError::DuplicateColumn { name: new.clone() });
            }
            let column: Column = field
                .data
                .column(new)
                .map_err(|_| MetaError::MissingColumn { name: new.clone() })?
                .clone();
            table.with_column(column)?;
        }
        provenance.extend_from_pairs(&field.pairs);
    }

    let mut keep = vec![true; table.height()];
    for column in table.get_columns() {
        for (idx, flag) in keep.iter_mut().enumerate() {
            if matches!(column.get(idx).unwrap_or(AnyValue::Null), AnyValue::Null) {
                *flag = false;
            }
        }
    }
    let mask = BooleanChunked::from_slice("complete".into(), &keep);
    let table = table.filter(&mask)?;
    debug!(
        fields = fields.len(),
        rows = table.height(),
        columns = table.width(),
        "meta table assembled"
    );

    Ok(MetaAssembly { table, provenance })
}
