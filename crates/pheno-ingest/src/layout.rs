//! Directory layout of phenotype inputs and binarized outputs.
//!
//! Raw tables and encodings live under the info root in a
//! `<type>/<group>` hierarchy; binarized tables mirror that hierarchy
//! under the storage root. Numerical outputs carry the strategy in the
//! file name so median and quantile runs can coexist.

use std::path::{Path, PathBuf};

use pheno_model::{FieldId, FieldType};

/// `<root>/<type>/<group>/tables/<field_id>.csv`
pub fn field_table_path(
    root: &Path,
    field_type: FieldType,
    group: &str,
    field_id: FieldId,
) -> PathBuf {
    root.join(field_type.as_str())
        .join(group)
        .join("tables")
        .join(format!("{field_id}.csv"))
}

/// `<root>/<type>/<group>/fields_data_coding.json`
pub fn encoding_path(root: &Path, field_type: FieldType, group: &str) -> PathBuf {
    root.join(field_type.as_str())
        .join(group)
        .join("fields_data_coding.json")
}

/// `<storage>/modified_encodings/fields_data_coding_<kind>.json`
///
/// Mixed ("B") fields carry two separately prepared dictionaries, kind
/// `"ohe"` or `"ordinal"`, stored beside the binarized outputs.
pub fn modified_encoding_path(storage_root: &Path, kind: &str) -> PathBuf {
    storage_root
        .join("modified_encodings")
        .join(format!("fields_data_coding_{kind}.json"))
}

/// `<storage>/<type>/<group>/tables/<field_id>[_<strategy>].csv`
pub fn binarized_table_path(
    storage_root: &Path,
    field_type: FieldType,
    group: &str,
    field_id: FieldId,
    strategy: Option<&str>,
) -> PathBuf {
    let basename = match strategy {
        Some(strategy) => format!("{field_id}_{strategy}.csv"),
        None => format!("{field_id}.csv"),
    };
    storage_root
        .join(field_type.as_str())
        .join(group)
        .join("tables")
        .join(basename)
}

/// `<storage>/meta_pheno_table.csv`
pub fn meta_table_path(storage_root: &Path) -> PathBuf {
    storage_root.join("meta_pheno_table.csv")
}

/// `<storage>/meta_pheno_table_cols.csv`
pub fn meta_columns_path(storage_root: &Path) -> PathBuf {
    storage_root.join("meta_pheno_table_cols.csv")
}
