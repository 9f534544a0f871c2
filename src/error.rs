//! Error types for record construction, mutation, and encoding.

use thiserror::Error;

/// Main error type for record operations.
#[derive(Debug, Error)]
pub enum BlobError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Payload too large: {size} bytes (limit {limit})")]
    PayloadTooLarge { size: usize, limit: usize },

    #[error("Invalid metadata field {0:?}")]
    UnknownMetadataKey(String),

    #[error("Bad value {value} for {key:?} attribute (expected string)")]
    InvalidMetadataValueType { key: String, value: String },

    #[error("Encode error: {0}")]
    Encode(String),
}

impl BlobError {
    /// Wrap a decoder failure.
    pub(crate) fn parse(e: impl std::fmt::Display) -> Self {
        BlobError::Parse(e.to_string())
    }

    /// Wrap an encoder failure.
    pub(crate) fn encode(e: impl std::fmt::Display) -> Self {
        BlobError::Encode(e.to_string())
    }
}

/// Result type for record operations.
pub type Result<T> = std::result::Result<T, BlobError>;
