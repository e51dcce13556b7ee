//! Hash functions for the Bloom filter
//!
//! Two SHA-256 digests with domain-separating prefixes feed a double hashing
//! scheme: h(i) = h1 + i * h2 (mod m). This avoids k independent hashes while
//! keeping probe positions close to independent.

use sha2::{Digest, Sha256};

/// Domain separation prefix for the first base hash
pub const H1_PREFIX: u8 = 0x01;
/// Domain separation prefix for the second base hash
pub const H2_PREFIX: u8 = 0x02;

/// SHA-256 of `prefix || element`, read as a big-endian integer, reduced mod `m`
///
/// `m` must be nonzero.
pub(crate) fn prefixed_hash_mod(prefix: u8, element: &[u8], m: usize) -> usize {
    let mut hasher = Sha256::new();
    hasher.update([prefix]);
    hasher.update(element);
    let digest = hasher.finalize();

    reduce_be(&digest, m)
}

/// Reduce a big-endian byte string modulo `m` without a big-integer type
fn reduce_be(bytes: &[u8], m: usize) -> usize {
    let m = m as u128;
    let acc = bytes
        .iter()
        .fold(0u128, |acc, &b| ((acc << 8) | b as u128) % m);
    acc as usize
}

/// Lazily yield the k probe positions for an element
///
/// Positions are `p_0 = h1`, `p_{i+1} = (p_i + h2) mod m`, which equals
/// `(h1 + i * h2) mod m` without risking overflow. An empty bit array
/// (`m == 0`) has no positions.
pub(crate) fn compute_hash_positions(
    element: &[u8],
    k: usize,
    m: usize,
) -> impl Iterator<Item = usize> {
    let (h1, h2, k) = if m == 0 {
        (0, 0, 0)
    } else {
        (
            prefixed_hash_mod(H1_PREFIX, element, m),
            prefixed_hash_mod(H2_PREFIX, element, m),
            k,
        )
    };

    std::iter::successors(Some(h1), move |&pos| {
        Some(((pos as u128 + h2 as u128) % m as u128) as usize)
    })
    .take(k)
}
