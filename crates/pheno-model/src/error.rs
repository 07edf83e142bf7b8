use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("unknown phenotype type: {0}")]
    UnknownFieldType(String),
    #[error("unknown ordinality flag: {0}")]
    UnknownOrdinality(String),
    #[error("invalid field id: {0}")]
    InvalidFieldId(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
