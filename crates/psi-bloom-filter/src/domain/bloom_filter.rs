//! Core Bloom Filter implementation
//!
//! INVARIANTS:
//! - No false negatives: if `add(x)` succeeded, `check(x)` MUST return true
//! - `count <= capacity`, and a rejected `add` modifies nothing
//! - Every set bit index is `< size_bits`

use bitvec::prelude::*;
use rayon::prelude::*;
use tracing::debug;

use super::hash_functions::compute_hash_positions;
use super::parameters::{calculate_fpr, FilterParams};
use super::record::BloomFilterRecord;
use crate::error::FilterError;

/// Bloom filter for probabilistic membership testing
///
/// A Bloom filter is a space-efficient probabilistic data structure that
/// can test whether an element is a member of a set. False positives are
/// possible, but false negatives are not.
///
/// A filter rebuilt with [`BloomFilter::from_record`] is a read-only
/// membership checker: its capacity is zero and every `add` is rejected.
#[derive(Clone, Debug, PartialEq)]
pub struct BloomFilter {
    /// Bit array storing the filter state
    bits: BitVec<u8, Lsb0>,
    /// Number of hash functions (k)
    k: usize,
    /// Size in bits (m)
    m: usize,
    /// Number of successful adds
    count: usize,
    /// Maximum number of adds
    capacity: usize,
}

impl BloomFilter {
    /// Create an empty filter sized for `capacity` elements at `fp_prob`
    ///
    /// # Errors
    /// `InvalidConfiguration` if `capacity == 0` or `fp_prob` is not in (0, 1).
    pub fn new(capacity: usize, fp_prob: f64) -> Result<Self, FilterError> {
        let params = FilterParams::for_capacity(capacity, fp_prob)?;
        debug!(
            capacity,
            fp_prob,
            size_bits = params.size_bits,
            hash_count = params.hash_count,
            "Creating bloom filter"
        );

        Ok(Self {
            bits: bitvec![u8, Lsb0; 0; params.size_bits],
            k: params.hash_count,
            m: params.size_bits,
            count: 0,
            capacity,
        })
    }

    /// Create a filter sized to `elements.len()` and add every element
    pub fn build_from<B>(elements: &[B], fp_prob: f64) -> Result<Self, FilterError>
    where
        B: AsRef<[u8]> + Sync,
    {
        let mut filter = Self::new(elements.len(), fp_prob)?;
        filter.add_batch(elements)?;
        Ok(filter)
    }

    /// Add an element
    ///
    /// # Errors
    /// `CapacityExceeded` when the filter already holds `capacity` elements.
    /// The filter is left unchanged in that case.
    pub fn add(&mut self, element: &[u8]) -> Result<(), FilterError> {
        self.ensure_room(1)?;
        self.set_positions(compute_hash_positions(element, self.k, self.m));
        self.count += 1;
        Ok(())
    }

    /// Add a batch of elements, all or nothing
    ///
    /// Probe positions are computed in parallel; bits are written by the
    /// calling thread only.
    pub fn add_batch<B>(&mut self, elements: &[B]) -> Result<(), FilterError>
    where
        B: AsRef<[u8]> + Sync,
    {
        self.ensure_room(elements.len())?;

        let (k, m) = (self.k, self.m);
        let positions: Vec<Vec<usize>> = elements
            .par_iter()
            .map(|e| compute_hash_positions(e.as_ref(), k, m).collect())
            .collect();

        for element_positions in positions {
            self.set_positions(element_positions);
        }
        self.count += elements.len();
        Ok(())
    }

    /// Test if an element might be in the filter
    ///
    /// Returns:
    /// - `true` if the element might be in the set (could be false positive)
    /// - `false` if the element is definitely NOT in the set (never false negative)
    pub fn check(&self, element: &[u8]) -> bool {
        compute_hash_positions(element, self.k, self.m).all(|pos| self.bits[pos])
    }

    /// Check a batch of elements in parallel, results in input order
    pub fn check_batch<B>(&self, elements: &[B]) -> Vec<bool>
    where
        B: AsRef<[u8]> + Sync,
    {
        elements.par_iter().map(|e| self.check(e.as_ref())).collect()
    }

    /// Export to the transport record
    pub fn export(&self) -> BloomFilterRecord {
        BloomFilterRecord::from_raw(self.k, self.bits.as_raw_slice())
    }

    /// Rebuild a read-only checker from a transport record
    ///
    /// `size_bits` is recovered as `8 * decoded_bytes.len()` and the hash
    /// count is taken verbatim. Count and capacity are zero.
    ///
    /// # Errors
    /// `Deserialization` if the bits are not valid base64, decode to zero
    /// bytes, or the hash count is zero or larger than `size_bits`.
    pub fn from_record(record: &BloomFilterRecord) -> Result<Self, FilterError> {
        if record.num_hash_functions == 0 {
            return Err(FilterError::Deserialization(
                "num_hash_functions must be >= 1".to_string(),
            ));
        }
        let bytes = record.decode_bits()?;
        if bytes.is_empty() {
            return Err(FilterError::Deserialization(
                "bit array must not be empty".to_string(),
            ));
        }

        let bits = BitVec::<u8, Lsb0>::from_vec(bytes);
        let m = bits.len();
        if record.num_hash_functions > m {
            return Err(FilterError::Deserialization(format!(
                "num_hash_functions {} exceeds size_bits {m}",
                record.num_hash_functions
            )));
        }
        debug!(size_bits = m, hash_count = record.num_hash_functions, "Restored bloom filter");

        Ok(Self {
            bits,
            k: record.num_hash_functions,
            m,
            count: 0,
            capacity: 0,
        })
    }

    /// Number of successful adds
    pub fn len(&self) -> usize {
        self.count
    }

    /// Whether nothing has been added
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Whether further adds will be rejected
    pub fn is_full(&self) -> bool {
        self.count >= self.capacity
    }

    /// Maximum number of adds (zero for a restored filter)
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Get the filter size in bits
    pub fn size_bits(&self) -> usize {
        self.m
    }

    /// Get the number of hash functions
    pub fn hash_count(&self) -> usize {
        self.k
    }

    /// Get the number of bits set in the filter
    pub fn bits_set(&self) -> usize {
        self.bits.count_ones()
    }

    /// Packed bit array, little-endian bit order
    pub fn as_bytes(&self) -> &[u8] {
        self.bits.as_raw_slice()
    }

    /// Estimated false positive rate at the current fill
    ///
    /// Formula: FPR = (1 - e^(-kn/m))^k
    pub fn false_positive_rate(&self) -> f64 {
        calculate_fpr(self.m, self.count, self.k)
    }

    fn ensure_room(&self, additional: usize) -> Result<(), FilterError> {
        if self.count.saturating_add(additional) > self.capacity {
            return Err(FilterError::CapacityExceeded {
                capacity: self.capacity,
            });
        }
        Ok(())
    }

    fn set_positions<I>(&mut self, positions: I)
    where
        I: IntoIterator<Item = usize>,
    {
        for pos in positions {
            self.bits.set(pos, true);
        }
    }
}
