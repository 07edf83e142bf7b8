//! Meta table assembly for binarized phenotype tables.
//!
//! Takes one binarized table per field, renames its columns
//! deterministically, aligns every table onto the shared cohort sample
//! index, records old-to-new column provenance, and inner-joins all
//! fields into one matrix.

pub mod assemble;
pub mod error;
pub mod provenance;
pub mod reindex;
pub mod rename;

pub use assemble::{MetaAssembly, PrepareOutcome, PreparedField, assemble_meta, prepare_field_table};
pub use error::{MetaError, Result};
pub use provenance::{ColumnRename, ProvenanceTable};
pub use reindex::reindex_renamed;
pub use rename::{
    RenamePair, RenameStrategy, rename_by_encoding, rename_mixed, rename_plain_suffix,
};
