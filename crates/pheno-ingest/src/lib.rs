//! Phenotype data ingestion.
//!
//! Everything the pipeline reads or writes on disk lives here: the
//! type/group directory layout, the phenotypes-of-interest manifest, the
//! cohort sample index, per-group encoding dictionaries, and the CSV
//! tables themselves. The binarize and meta crates stay free of I/O.

pub mod cohort;
pub mod encodings;
pub mod error;
pub mod layout;
pub mod manifest;
pub mod tables;

pub use cohort::{CohortIndex, read_cohort_index};
pub use encodings::{EncodingFile, read_encoding_file};
pub use error::{IngestError, Result};
pub use layout::{
    binarized_table_path, encoding_path, field_table_path, meta_columns_path, meta_table_path,
    modified_encoding_path,
};
pub use manifest::{ManifestOptions, read_manifest};
pub use tables::{read_table, write_table};
