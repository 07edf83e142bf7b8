//! Loading the phenotypes-of-interest manifest.
//!
//! The manifest is a hand-maintained CSV with one row per candidate
//! field. Only shortlisted rows (`shortlist == "X"`) with enough cohort
//! samples participate in a run.

use std::path::Path;
use std::str::FromStr;

use tracing::debug;

use pheno_model::{FieldRecord, FieldType, Ordinality};

use crate::error::{IngestError, Result};

const COLUMN_TYPE: &str = "Type";
const COLUMN_GROUP: &str = "Phenotype_group";
const COLUMN_FIELD_ID: &str = "Phenotype_ID";
const COLUMN_ORDINALITY: &str = "not_ordinal";
const COLUMN_SHORTLIST: &str = "shortlist";
const COLUMN_SAMPLE_COUNT: &str = "Num_exome_samples_with_phenotype";

/// Manifest loading options.
#[derive(Debug, Clone, Copy)]
pub struct ManifestOptions {
    /// Minimum cohort samples a field must have to participate.
    pub min_samples: u64,
}

impl Default for ManifestOptions {
    fn default() -> Self {
        Self { min_samples: 2000 }
    }
}

fn column_index(headers: &csv::StringRecord, name: &str, path: &Path) -> Result<usize> {
    headers
        .iter()
        .position(|header| header.trim() == name)
        .ok_or_else(|| IngestError::MissingColumn {
            column: name.to_string(),
            path: path.to_path_buf(),
        })
}

/// Reads the manifest and returns the shortlisted records in file order.
pub fn read_manifest(path: &Path, options: ManifestOptions) -> Result<Vec<FieldRecord>> {
    if !path.exists() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    let headers = reader
        .headers()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .clone();

    let type_idx = column_index(&headers, COLUMN_TYPE, path)?;
    let group_idx = column_index(&headers, COLUMN_GROUP, path)?;
    let id_idx = column_index(&headers, COLUMN_FIELD_ID, path)?;
    let ordinality_idx = column_index(&headers, COLUMN_ORDINALITY, path)?;
    let shortlist_idx = column_index(&headers, COLUMN_SHORTLIST, path)?;
    let samples_idx = column_index(&headers, COLUMN_SAMPLE_COUNT, path)?;

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let cell = |idx: usize| row.get(idx).unwrap_or("").trim();

        if cell(shortlist_idx) != "X" {
            continue;
        }
        let samples = cell(samples_idx).parse::<f64>().unwrap_or(0.0);
        if samples < options.min_samples as f64 {
            continue;
        }

        let field_type =
            FieldType::from_str(cell(type_idx)).map_err(|_| IngestError::InvalidValue {
                field: COLUMN_TYPE.to_string(),
                value: cell(type_idx).to_string(),
                path: path.to_path_buf(),
            })?;
        let field_id = parse_field_id(cell(id_idx)).ok_or_else(|| IngestError::InvalidValue {
            field: COLUMN_FIELD_ID.to_string(),
            value: cell(id_idx).to_string(),
            path: path.to_path_buf(),
        })?;
        let ordinality = Ordinality::from_manifest(cell(ordinality_idx)).map_err(|_| {
            IngestError::InvalidValue {
                field: COLUMN_ORDINALITY.to_string(),
                value: cell(ordinality_idx).to_string(),
                path: path.to_path_buf(),
            }
        })?;

        records.push(FieldRecord::new(
            field_type,
            cell(group_idx),
            field_id,
            ordinality,
        ));
    }
    debug!(
        path = %path.display(),
        fields = records.len(),
        "manifest loaded"
    );
    Ok(records)
}

/// Field ids sometimes arrive as floats from spreadsheet exports.
fn parse_field_id(raw: &str) -> Option<u32> {
    if let Ok(id) = raw.parse::<u32>() {
        return Some(id);
    }
    let value = raw.parse::<f64>().ok()?;
    if value.fract() == 0.0 && value >= 0.0 {
        Some(value as u32)
    } else {
        None
    }
}
