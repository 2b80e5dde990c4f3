//! Errors raised while constructing or parsing core types.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypesError {
    #[error("invalid fingerprint: {0}")]
    InvalidFingerprint(String),

    #[error("empty identifier")]
    EmptyId,
}
