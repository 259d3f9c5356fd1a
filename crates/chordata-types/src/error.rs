use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("unknown attribute type tag: {0}")]
    UnknownAttributeType(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}
