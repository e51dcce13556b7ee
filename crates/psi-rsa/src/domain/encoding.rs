//! # Canonical Element Encoding
//!
//! Integers enter the Bloom filter as the UTF-8 bytes of their base-10
//! representation: no sign, no leading zeros, `0` encodes as `b"0"`.
//!
//! Both parties MUST use this function. A different encoding on either side
//! makes every membership test fail without raising an error.

use num_bigint::BigUint;
use rayon::prelude::*;

/// Encode one protocol integer
pub fn encode_element(x: &BigUint) -> Vec<u8> {
    x.to_str_radix(10).into_bytes()
}

/// Encode a batch of protocol integers in parallel, preserving order
pub fn encode_elements(xs: &[BigUint]) -> Vec<Vec<u8>> {
    xs.par_iter().map(encode_element).collect()
}
