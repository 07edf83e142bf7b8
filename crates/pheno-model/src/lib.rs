//! Data model for the phenome binarizer.
//!
//! This crate defines the vocabulary shared by every stage of the pipeline:
//!
//! - **field**: field types, ordinality flags, and manifest records
//! - **encoding**: code-to-label dictionaries and bin label construction
//! - **diagnostics**: structured per-field warning events
//! - **error**: model-level error type
//!
//! No I/O and no dataframe types live here; the crate is the dependency
//! floor for the ingest, binarize, and meta crates.

pub mod diagnostics;
pub mod encoding;
pub mod error;
pub mod field;

pub use diagnostics::{Diagnostic, DiagnosticKind};
pub use encoding::{FieldEncoding, NONE_OF_THE_ABOVE, collapse_whitespace, sanitize_label};
pub use error::{ModelError, Result};
pub use field::{FieldId, FieldRecord, FieldType, Ordinality};
