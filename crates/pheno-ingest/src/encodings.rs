//! Loading code-to-label encoding dictionaries.
//!
//! One JSON file per type/group holds the dictionaries of every field in
//! that group, keyed by field id, each mapping string-encoded integer
//! codes to labels:
//!
//! ```json
//! { "1747": { "0": "No", "1": "Yes", "-1": "Do not know" } }
//! ```
//!
//! A field whose entry is missing or not a code-to-label object yields
//! `None` from [`EncodingFile::encoding_for`]; the caller skips the
//! field with a diagnostic rather than failing the batch.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde_json::Value;
use tracing::debug;

use pheno_model::{FieldEncoding, FieldId};

use crate::error::{IngestError, Result};

/// A parsed per-group encoding dictionary file.
#[derive(Debug, Clone, Default)]
pub struct EncodingFile {
    entries: serde_json::Map<String, Value>,
}

impl EncodingFile {
    /// The dictionary for one field, or `None` when the entry is absent
    /// or malformed (not an object, non-integer code keys, non-string
    /// labels).
    pub fn encoding_for(&self, field_id: FieldId) -> Option<FieldEncoding> {
        let entry = self.entries.get(&field_id.to_string())?;
        let Value::Object(codes) = entry else {
            return None;
        };
        let mut labels = BTreeMap::new();
        for (raw_code, label) in codes {
            let code = raw_code.trim().parse::<i64>().ok()?;
            let Value::String(label) = label else {
                return None;
            };
            labels.insert(code, label.clone());
        }
        Some(FieldEncoding::new(labels))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Reads an encoding dictionary file. The file itself must exist and be
/// a JSON object; per-field malformations surface later as `None` from
/// [`EncodingFile::encoding_for`].
pub fn read_encoding_file(path: &Path) -> Result<EncodingFile> {
    if !path.exists() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let content = fs::read_to_string(path).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let value: Value =
        serde_json::from_str(&content).map_err(|source| IngestError::JsonParse {
            path: path.to_path_buf(),
            source,
        })?;
    let entries = match value {
        Value::Object(entries) => entries,
        _ => serde_json::Map::new(),
    };
    debug!(path = %path.display(), fields = entries.len(), "encoding file loaded");
    Ok(EncodingFile { entries })
}
