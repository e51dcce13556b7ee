//! # PSI Bloom Filter
//!
//! Probabilistic membership structure used as the oblivious intersection
//! test of the RSA blind-signature PSI protocol.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): Pure logic, no I/O
//!   - `BloomFilter`: Bit array with capacity tracking and all-or-nothing inserts
//!   - `FilterParams`: Sizing from `(capacity, fp_prob)`
//!   - `hash_functions`: SHA-256 double hashing (Kirsch–Mitzenmacher)
//!   - `BloomFilterRecord`: Transport record `{num_hash_functions, bits}`
//!
//! ## Wire Contract
//!
//! The hashing scheme and the bit packing are part of the protocol: a filter
//! exported by one party must answer identically after the other party
//! rebuilds it.
//!
//! - `h1 = SHA256(0x01 || x) mod size`, `h2 = SHA256(0x02 || x) mod size`
//! - probe `i` is `(h1 + i * h2) mod size` for `i` in `0..k`
//! - bit `j` lives in byte `j / 8` at position `j % 8` (little-endian bit order)
//!
//! ## Invariants
//!
//! - No false negatives: if `add(x)` succeeded, `check(x)` returns true
//! - `len() <= capacity()`; a failed `add` leaves the filter untouched
//!
//! ## Usage Example
//!
//! ```ignore
//! use psi_bloom_filter::{BloomFilter, BloomFilterRecord};
//!
//! let mut filter = BloomFilter::new(100, 0.01)?;
//! filter.add(b"Element 0")?;
//!
//! let record = filter.export();
//! let restored = BloomFilter::from_record(&record)?;
//! assert!(restored.check(b"Element 0"));
//! ```

pub mod domain;
pub mod error;

pub use domain::{calculate_fpr, BloomFilter, BloomFilterRecord, FilterParams};
pub use error::FilterError;
