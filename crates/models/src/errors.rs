use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("unknown type: {0}")]
    UnknownType(String),
    #[error("malformed record: {0}")]
    MalformedRecord(String),
}
