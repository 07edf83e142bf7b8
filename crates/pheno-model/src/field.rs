//! Field types, ordinality flags, and manifest records.
//!
//! A *field* is one phenotype question or measurement in the biobank
//! catalogue, identified by a numeric id. The manifest declares for each
//! field a storage type (`Type` column), a category (`Phenotype_group`),
//! and an ordinality flag (`not_ordinal`), which together select the
//! binarization procedure.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// Numeric field identifier as used in the biobank catalogue.
pub type FieldId = u32;

/// Declared storage type of a phenotype field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldType {
    /// Whole-number measurements (e.g. number of cigarettes per day).
    Integer,
    /// Real-valued measurements (e.g. standing height).
    Continuous,
    /// One answer per visit; repeated visits must agree.
    CategoricalSingle,
    /// Several answers may be ticked at one visit.
    CategoricalMultiple,
}

impl FieldType {
    /// Returns the manifest spelling of the type.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Integer => "integer",
            FieldType::Continuous => "continuous",
            FieldType::CategoricalSingle => "categorical_single",
            FieldType::CategoricalMultiple => "categorical_multiple",
        }
    }

    /// True for integer and continuous fields.
    pub fn is_numerical(&self) -> bool {
        matches!(self, FieldType::Integer | FieldType::Continuous)
    }

    /// True for single- and multi-choice categorical fields.
    pub fn is_categorical(&self) -> bool {
        matches!(
            self,
            FieldType::CategoricalSingle | FieldType::CategoricalMultiple
        )
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "integer" => Ok(FieldType::Integer),
            "continuous" => Ok(FieldType::Continuous),
            "categorical_single" => Ok(FieldType::CategoricalSingle),
            "categorical_multiple" => Ok(FieldType::CategoricalMultiple),
            _ => Err(ModelError::UnknownFieldType(s.to_string())),
        }
    }
}

/// Ordinality flag from the manifest's `not_ordinal` column.
///
/// The column is blank for fields whose codes have a natural order, `"O"`
/// for nominal fields that must be one-hot expanded, and `"B"` for fields
/// that carry both an ordinal and a one-hot view through two separate
/// encoding dictionaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Ordinality {
    /// Codes are ordered; binarize into low/high bins.
    #[default]
    Ordinal,
    /// Codes are nominal ("O"); binarize one column per code.
    OneHot,
    /// Both views ("B"): low/high bins plus one-hot columns.
    Mixed,
}

impl Ordinality {
    /// Parse the manifest cell. Blank means ordinal.
    pub fn from_manifest(s: &str) -> Result<Self, ModelError> {
        match s.trim() {
            "" => Ok(Ordinality::Ordinal),
            "O" => Ok(Ordinality::OneHot),
            "B" => Ok(Ordinality::Mixed),
            other => Err(ModelError::UnknownOrdinality(other.to_string())),
        }
    }

    /// Returns the manifest spelling of the flag (blank for ordinal).
    pub fn as_str(&self) -> &'static str {
        match self {
            Ordinality::Ordinal => "",
            Ordinality::OneHot => "O",
            Ordinality::Mixed => "B",
        }
    }
}

/// One shortlisted row of the phenotypes-of-interest manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRecord {
    /// Declared storage type (`Type` column).
    pub field_type: FieldType,
    /// Category the field is filed under (`Phenotype_group` column).
    pub group: String,
    /// Numeric field id (`Phenotype_ID` column).
    pub field_id: FieldId,
    /// Ordinality flag (`not_ordinal` column).
    pub ordinality: Ordinality,
}

impl FieldRecord {
    pub fn new(
        field_type: FieldType,
        group: impl Into<String>,
        field_id: FieldId,
        ordinality: Ordinality,
    ) -> Self {
        Self {
            field_type,
            group: group.into(),
            field_id,
            ordinality,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_type_from_str() {
        assert_eq!(
            "categorical_single".parse::<FieldType>().unwrap(),
            FieldType::CategoricalSingle
        );
        assert_eq!(
            "Continuous".parse::<FieldType>().unwrap(),
            FieldType::Continuous
        );
        assert!("ordinal".parse::<FieldType>().is_err());
    }

    #[test]
    fn field_type_predicates() {
        assert!(FieldType::Integer.is_numerical());
        assert!(!FieldType::Integer.is_categorical());
        assert!(FieldType::CategoricalMultiple.is_categorical());
    }

    #[test]
    fn ordinality_from_manifest() {
        assert_eq!(Ordinality::from_manifest("").unwrap(), Ordinality::Ordinal);
        assert_eq!(
            Ordinality::from_manifest("  ").unwrap(),
            Ordinality::Ordinal
        );
        assert_eq!(Ordinality::from_manifest("O").unwrap(), Ordinality::OneHot);
        assert_eq!(Ordinality::from_manifest("B").unwrap(), Ordinality::Mixed);
        assert!(Ordinality::from_manifest("X").is_err());
    }
}
