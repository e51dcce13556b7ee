//! Domain Layer - Pure filter logic
//!
//! This layer contains:
//! - Core Bloom filter implementation
//! - Double hashing over SHA-256
//! - Parameter calculations
//! - The serialized transport record
//!
//! RULES:
//! - No I/O operations
//! - No async code
//! - Pure functions where possible

pub mod bloom_filter;
pub mod hash_functions;
pub mod parameters;
pub mod record;

pub use bloom_filter::BloomFilter;
pub use parameters::{calculate_fpr, FilterParams};
pub use record::BloomFilterRecord;
