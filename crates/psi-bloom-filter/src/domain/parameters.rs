//! Bloom filter parameter calculation
//!
//! Formulas:
//! - size = ceil(-capacity * log2(fp_prob) / ln(2)), rounded up to a multiple of 8
//! - k    = ceil(-log2(fp_prob))
//!
//! The multiple-of-8 rounding lets the bit array pack into whole bytes, which
//! is what allows `size` to be recovered from the serialized record.

use std::f64::consts::LN_2;

use crate::error::FilterError;

/// Sizing of a Bloom filter
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FilterParams {
    /// Number of bits in the filter (m), always a positive multiple of 8
    pub size_bits: usize,
    /// Number of hash probes per element (k)
    pub hash_count: usize,
}

impl FilterParams {
    /// Derive parameters for a target capacity and false positive probability
    ///
    /// # Errors
    /// `InvalidConfiguration` if `capacity == 0` or `fp_prob` is not in (0, 1).
    pub fn for_capacity(capacity: usize, fp_prob: f64) -> Result<Self, FilterError> {
        if capacity == 0 {
            return Err(FilterError::InvalidConfiguration(
                "capacity must be an integer > 0".to_string(),
            ));
        }
        // NaN fails both comparisons
        if !(fp_prob > 0.0 && fp_prob < 1.0) {
            return Err(FilterError::InvalidConfiguration(format!(
                "fp_prob must be in the range (0,1), got {fp_prob}"
            )));
        }

        let raw_size = (-(capacity as f64) * fp_prob.log2() / LN_2).ceil();
        if !raw_size.is_finite() || raw_size > (usize::MAX / 2) as f64 {
            return Err(FilterError::InvalidConfiguration(format!(
                "filter for capacity {capacity} at fp_prob {fp_prob} is too large"
            )));
        }

        let size_bits = round_up_to_byte(raw_size.max(1.0) as usize);
        let hash_count = ((-fp_prob.log2()).ceil() as usize).max(1);

        Ok(Self {
            size_bits,
            hash_count,
        })
    }

    /// Size of the packed bit array in bytes
    pub fn size_bytes(&self) -> usize {
        self.size_bits / 8
    }
}

fn round_up_to_byte(bits: usize) -> usize {
    bits.div_ceil(8) * 8
}

/// Estimate the false positive rate for given parameters
///
/// Formula: FPR = (1 - e^(-kn/m))^k
pub fn calculate_fpr(m: usize, n: usize, k: usize) -> f64 {
    if m == 0 {
        return 1.0;
    }
    let exponent = -(k as f64) * (n as f64) / (m as f64);
    (1.0 - exponent.exp()).powi(k as i32)
}
