//! # RSA-PSI Server
//!
//! Holds the private key. Signs its own set during SETUP and signs whatever
//! blinded values the client sends during ONLINE; blinded values are
//! indistinguishable from random elements of `[0, n)`.

use num_bigint::BigUint;
use psi_bloom_filter::{BloomFilter, BloomFilterRecord};
use rand::{CryptoRng, RngCore};
use rayon::prelude::*;
use tracing::debug;

use crate::domain::encoding::encode_elements;
use crate::domain::errors::RsaError;
use crate::domain::keys::{from_private, keygen, RsaPrivateKey, RsaPublicKey};

/// Server role of the RSA-PSI protocol.
pub struct RsaServer {
    public_key: RsaPublicKey,
    private_key: RsaPrivateKey,
}

impl RsaServer {
    /// Create a server with a freshly generated key
    pub fn generate<R>(key_size_bits: usize, e: u64, rng: &mut R) -> Result<Self, RsaError>
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        let (public_key, private_key) = keygen(key_size_bits, e, rng)?;
        Ok(Self {
            public_key,
            private_key,
        })
    }

    /// Create a server from an existing private key
    pub fn from_private_key(private_key: RsaPrivateKey) -> Self {
        let (public_key, private_key) = from_private(private_key);
        Self {
            public_key,
            private_key,
        }
    }

    /// Public and private key
    pub fn keys(&self) -> (&RsaPublicKey, &RsaPrivateKey) {
        (&self.public_key, &self.private_key)
    }

    /// Public key to send to the client
    pub fn public_key(&self) -> &RsaPublicKey {
        &self.public_key
    }

    /// Sign one element: `x^d mod n`
    ///
    /// # Errors
    /// `OutOfRange` unless `x < n`.
    pub fn sign(&self, x: &BigUint) -> Result<BigUint, RsaError> {
        self.private_key.decrypt(x)
    }

    /// Sign every element, preserving order
    pub fn sign_set(&self, xs: &[BigUint]) -> Result<Vec<BigUint>, RsaError> {
        debug!(count = xs.len(), "Signing batch");
        xs.par_iter().map(|x| self.sign(x)).collect()
    }

    /// SETUP: sign the server set and build the filter over the encoded
    /// signatures
    ///
    /// The filter is sized to the set's cardinality (at least one, so an
    /// empty set yields an empty filter that matches nothing).
    pub fn build_filter(&self, server_set: &[BigUint], fp_prob: f64) -> Result<BloomFilter, RsaError> {
        let signatures = self.sign_set(server_set)?;
        let encoded = encode_elements(&signatures);

        let mut filter = BloomFilter::new(encoded.len().max(1), fp_prob)?;
        filter.add_batch(&encoded)?;

        debug!(
            elements = filter.len(),
            size_bits = filter.size_bits(),
            hash_count = filter.hash_count(),
            "Built signed-set filter"
        );
        Ok(filter)
    }

    /// SETUP, export step: the serialized filter to send to the client
    pub fn setup(&self, server_set: &[BigUint], fp_prob: f64) -> Result<BloomFilterRecord, RsaError> {
        Ok(self.build_filter(server_set, fp_prob)?.export())
    }
}
