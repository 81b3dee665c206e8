//! Domain-level error types.

use thiserror::Error;

/// Domain errors - business logic failures.
#[derive(Debug, Error)]
pub enum DomainError {
    /// Required fields were absent or empty on create, in schema order.
    #[error("Missing required fields: {}", .missing.join(", "))]
    Validation { missing: Vec<String> },

    #[error("No post found with id {id}.")]
    NotFound { id: u64 },

    #[error("Invalid {parameter} '{value}'. Expected one of: {expected}")]
    InvalidQueryParameter {
        parameter: &'static str,
        value: String,
        expected: String,
    },

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Persistence adapter errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage I/O failed: {0}")]
    Io(String),

    #[error("Serialization failed: {0}")]
    Serialization(String),

    #[error("Stored collection is corrupt: {0}")]
    Corrupt(String),
}
