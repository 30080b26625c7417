use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("unknown tax field: {0}")]
    UnknownField(String),
    #[error("invalid field mapping '{0}', expected FIELD=HEADER")]
    InvalidMappingSpec(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
