//! # Store Errors

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// JSON document store errors
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(String),

    #[error("Malformed store file: {0}")]
    Malformed(String),

    #[error("Serialization error: {0}")]
    Serialize(String),
}
