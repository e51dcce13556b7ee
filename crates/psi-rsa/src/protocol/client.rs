//! # RSA-PSI Client
//!
//! Blinds its elements with fresh random factors, unblinds the server's
//! signatures and tests them against the server's filter.
//!
//! Factor `i` is positionally bound to element `i`: the same factor list must
//! be used for blinding and for unblinding, in the same order.

use num_bigint::{BigUint, RandBigInt};
use psi_bloom_filter::BloomFilter;
use rand::{CryptoRng, RngCore};
use rayon::prelude::*;
use tracing::debug;

use crate::domain::encoding::encode_element;
use crate::domain::entities::BlindingFactor;
use crate::domain::errors::RsaError;
use crate::domain::field::{ensure_in_range, invert, mulmod, powmod};
use crate::domain::keys::RsaPublicKey;

/// Client role of the RSA-PSI protocol.
#[derive(Clone, Debug)]
pub struct RsaClient {
    public_key: RsaPublicKey,
}

impl RsaClient {
    /// Create a client for the server's public key
    pub fn new(public_key: RsaPublicKey) -> Self {
        Self { public_key }
    }

    /// Server public key this client blinds against
    pub fn public_key(&self) -> &RsaPublicKey {
        &self.public_key
    }

    /// Draw `count` independent blinding factors, `r` uniform in `[0, n)`
    ///
    /// Draws are sequential on `rng`, so a seeded generator yields the same
    /// factors on every run.
    ///
    /// # Errors
    /// `NotInvertible` if a drawn `r` shares a factor with `n`. The run must
    /// then be discarded.
    pub fn random_factors<R>(&self, count: usize, rng: &mut R) -> Result<Vec<BlindingFactor>, RsaError>
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        let n = self.public_key.n();
        let rs: Vec<BigUint> = (0..count).map(|_| rng.gen_biguint_below(n)).collect();

        debug!(count, "Generated blinding factors");
        rs.par_iter()
            .map(|r| -> Result<BlindingFactor, RsaError> {
                let r_inv = invert(r, n)?;
                let r_enc = powmod(r, self.public_key.e(), n);
                Ok(BlindingFactor::new(r_inv, r_enc))
            })
            .collect()
    }

    /// Blind one element: `x * r^e mod n`
    pub fn blind(&self, x: &BigUint, rf: &BlindingFactor) -> Result<BigUint, RsaError> {
        let n = self.public_key.n();
        ensure_in_range(x, n)?;
        Ok(mulmod(x, rf.r_enc(), n))
    }

    /// Unblind one signature: `x * r^-1 mod n`
    pub fn unblind(&self, x: &BigUint, rf: &BlindingFactor) -> Result<BigUint, RsaError> {
        let n = self.public_key.n();
        ensure_in_range(x, n)?;
        Ok(mulmod(x, rf.r_inv(), n))
    }

    /// Blind a set positionally
    ///
    /// # Errors
    /// `LengthMismatch` if there are more elements than factors.
    pub fn blind_set(&self, xs: &[BigUint], factors: &[BlindingFactor]) -> Result<Vec<BigUint>, RsaError> {
        ensure_enough_factors(xs.len(), factors.len())?;
        xs.par_iter()
            .zip(factors.par_iter())
            .map(|(x, rf)| self.blind(x, rf))
            .collect()
    }

    /// Unblind a set of signatures positionally
    ///
    /// # Errors
    /// `LengthMismatch` if there are more signatures than factors.
    pub fn unblind_set(&self, xs: &[BigUint], factors: &[BlindingFactor]) -> Result<Vec<BigUint>, RsaError> {
        ensure_enough_factors(xs.len(), factors.len())?;
        xs.par_iter()
            .zip(factors.par_iter())
            .map(|(x, rf)| self.unblind(x, rf))
            .collect()
    }

    /// INTERSECT: keep every client element whose unblinded signature is in
    /// the filter
    ///
    /// Input order and duplicates are preserved. Elements may be of any type;
    /// only their position links them to `signed` and `factors`.
    ///
    /// # Errors
    /// `LengthMismatch` unless `client_set`, `signed` and `factors` all have
    /// the same length.
    pub fn intersect<T>(
        &self,
        client_set: &[T],
        signed: &[BigUint],
        factors: &[BlindingFactor],
        filter: &BloomFilter,
    ) -> Result<Vec<T>, RsaError>
    where
        T: Clone + Sync,
    {
        ensure_same_len(client_set.len(), signed.len())?;
        ensure_same_len(client_set.len(), factors.len())?;

        let hits: Vec<bool> = signed
            .par_iter()
            .zip(factors.par_iter())
            .map(|(b, rf)| -> Result<bool, RsaError> {
                let unblinded = self.unblind(b, rf)?;
                Ok(filter.check(&encode_element(&unblinded)))
            })
            .collect::<Result<_, RsaError>>()?;

        let result: Vec<T> = client_set
            .iter()
            .zip(hits)
            .filter_map(|(y, hit)| hit.then(|| y.clone()))
            .collect();

        debug!(
            checked = client_set.len(),
            matched = result.len(),
            "Evaluated intersection"
        );
        Ok(result)
    }
}

fn ensure_enough_factors(elements: usize, factors: usize) -> Result<(), RsaError> {
    if elements > factors {
        return Err(RsaError::LengthMismatch {
            expected: factors,
            actual: elements,
        });
    }
    Ok(())
}

fn ensure_same_len(expected: usize, actual: usize) -> Result<(), RsaError> {
    if expected != actual {
        return Err(RsaError::LengthMismatch { expected, actual });
    }
    Ok(())
}
