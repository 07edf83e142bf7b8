//! Loading the cohort-of-interest sample index.
//!
//! The cohort file maps sample ids to their sequencing artifacts (one
//! row per sample, `eid` first). A sample belongs to the cohort when at
//! least one artifact cell is populated.

use std::collections::HashSet;
use std::path::Path;

use tracing::debug;

use crate::error::{IngestError, Result};

/// Ordered cohort sample index with constant-time membership checks.
#[derive(Debug, Clone, Default)]
pub struct CohortIndex {
    ids: Vec<i64>,
    set: HashSet<i64>,
}

impl CohortIndex {
    /// Builds the index from ids in order, dropping duplicates.
    pub fn new(ids: impl IntoIterator<Item = i64>) -> Self {
        let mut unique = Vec::new();
        let mut set = HashSet::new();
        for id in ids {
            if set.insert(id) {
                unique.push(id);
            }
        }
        Self { ids: unique, set }
    }

    /// Sample ids in cohort order.
    pub fn ids(&self) -> &[i64] {
        &self.ids
    }

    /// Membership set for row filtering.
    pub fn id_set(&self) -> &HashSet<i64> {
        &self.set
    }

    pub fn contains(&self, id: i64) -> bool {
        self.set.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Reads the cohort file, keeping samples with at least one populated
/// artifact cell.
pub fn read_cohort_index(path: &Path) -> Result<CohortIndex> {
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

    let mut ids = Vec::new();
    for row in reader.records() {
        let row = row.map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let Some(raw_id) = row.get(0) else {
            continue;
        };
        let Ok(id) = raw_id.trim().parse::<i64>() else {
            continue;
        };
        let has_artifact = row.len() <= 1
            || row.iter().skip(1).any(|cell| !cell.trim().is_empty());
        if has_artifact {
            ids.push(id);
        }
    }
    let index = CohortIndex::new(ids);
    debug!(path = %path.display(), samples = index.len(), "cohort index loaded");
    Ok(index)
}
