//! # RSA-PSI Errors

use psi_bloom_filter::FilterError;
use thiserror::Error;

/// Errors raised by the RSA-PSI primitives and roles.
///
/// All of these are usage or protocol errors; none are retried.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RsaError {
    /// An element is not in `[0, n)`
    #[error("Element out of range: must be in [0, n) for a {modulus_bits}-bit modulus")]
    OutOfRange { modulus_bits: u64 },

    /// Positional inputs have different lengths
    #[error("Length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// Modular inverse requested for a value sharing a factor with `n`
    #[error("Value is not invertible modulo n")]
    NotInvertible,

    /// Key material is malformed or inconsistent
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// Key generation could not produce a key
    #[error("Key generation failed: {0}")]
    KeyGeneration(String),

    /// Bloom filter failure on the setup or intersect path
    #[error(transparent)]
    Filter(#[from] FilterError),
}
