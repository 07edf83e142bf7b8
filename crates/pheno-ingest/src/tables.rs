//! Reading and writing sample-id-indexed phenotype tables.

use std::fs;
use std::path::Path;

use polars::prelude::{CsvReadOptions, CsvWriter, DataFrame, SerReader, SerWriter};
use tracing::debug;

use crate::error::{IngestError, Result};

/// Sample id column expected in every table.
const SAMPLE_ID: &str = "eid";

/// Reads a field table (raw or binarized) into a dataframe.
///
/// The first column must be the `eid` sample id; measurement columns are
/// inferred numeric.
pub fn read_table(path: &Path) -> Result<DataFrame> {
    if !path.exists() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(100))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .finish()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    if df.column(SAMPLE_ID).is_err() {
        return Err(IngestError::MissingColumn {
            column: SAMPLE_ID.to_string(),
            path: path.to_path_buf(),
        });
    }
    debug!(path = %path.display(), rows = df.height(), columns = df.width(), "table loaded");
    Ok(df)
}

/// Writes a table as CSV, creating parent directories as needed.
pub fn write_table(df: &mut DataFrame, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| IngestError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let file = fs::File::create(path).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    CsvWriter::new(file)
        .include_header(true)
        .finish(df)
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    debug!(path = %path.display(), rows = df.height(), "table written");
    Ok(())
}
