//! Error types for the Bloom filter

use thiserror::Error;

/// Errors that can occur while building, filling or decoding a filter
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FilterError {
    #[error("Invalid filter configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Bloom filter is at maximum capacity ({capacity})")]
    CapacityExceeded { capacity: usize },

    #[error("Malformed filter record: {0}")]
    Deserialization(String),

    #[error("Failed to encode filter record: {0}")]
    Serialization(String),
}
