//! Serialized transport record of a Bloom filter
//!
//! JSON shape:
//!
//! ```text
//! { "num_hash_functions": <int>, "bits": <base64 of little-endian-packed bit array> }
//! ```
//!
//! `size` is not transmitted; the receiver recovers it as `8 * bytes.len()`.

use base64::engine::general_purpose::STANDARD as B64;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::error::FilterError;

/// Transport-ready form of a Bloom filter
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BloomFilterRecord {
    /// Number of hash probes per element (k)
    pub num_hash_functions: usize,
    /// Standard base64 of the packed bit array
    pub bits: String,
}

impl BloomFilterRecord {
    /// Build a record from the raw packed bit array
    pub fn from_raw(num_hash_functions: usize, bytes: &[u8]) -> Self {
        Self {
            num_hash_functions,
            bits: B64.encode(bytes),
        }
    }

    /// Decode the packed bit array
    pub fn decode_bits(&self) -> Result<Vec<u8>, FilterError> {
        B64.decode(self.bits.as_bytes())
            .map_err(|e| FilterError::Deserialization(format!("invalid base64 bits: {e}")))
    }

    /// Encode the record as a JSON string
    pub fn to_json(&self) -> Result<String, FilterError> {
        serde_json::to_string(self).map_err(|e| FilterError::Serialization(e.to_string()))
    }

    /// Parse a record from a JSON string
    pub fn from_json(json: &str) -> Result<Self, FilterError> {
        serde_json::from_str(json).map_err(|e| FilterError::Deserialization(e.to_string()))
    }
}
