//! Inbound Ports (Driving Ports)
//!
//! The capability interface of a PSI protocol, split by role. The two
//! parties run on different hosts, so each side only carries the half it
//! needs. Variants are a closed set selected by [`ProtocolVariant`].

use num_bigint::BigUint;
use psi_bloom_filter::BloomFilter;
use psi_rsa::BlindingFactor;
use rand::{CryptoRng, RngCore};

use crate::domain::config::ProtocolVariant;
use crate::error::PsiError;
use crate::events::{BlindedBatch, FilterMessage, PublicKeyMessage, SignedBatch};

/// Common to both roles
pub trait PsiProtocol {
    /// Variant this implementation speaks
    fn variant(&self) -> ProtocolVariant;
}

/// Server side: holds the private key and the server set.
pub trait PsiServerApi: PsiProtocol + Send + Sync {
    /// Public key to hand to the client
    fn public_key_message(&self) -> PublicKeyMessage;

    /// SETUP: sign the server set and export the filter over the signatures
    ///
    /// # Errors
    /// - `Rsa(OutOfRange)` if an element is not below the modulus
    /// - `Filter(InvalidConfiguration)` if `fp_prob` is out of bounds
    fn setup(&self, server_set: &[BigUint], fp_prob: f64) -> Result<FilterMessage, PsiError>;

    /// ONLINE: sign whatever blinded values the client sent, in order
    fn sign_batch(&self, batch: &BlindedBatch) -> Result<SignedBatch, PsiError>;
}

/// Client side: holds the client set and the blinding factors of one run.
pub trait PsiClientApi: PsiProtocol + Send + Sync {
    /// Draw one blinding factor per client element
    fn random_factors<R>(&self, count: usize, rng: &mut R) -> Result<Vec<BlindingFactor>, PsiError>
    where
        R: RngCore + CryptoRng + ?Sized;

    /// ONLINE: blind the client set positionally
    fn blind_batch(
        &self,
        client_set: &[BigUint],
        factors: &[BlindingFactor],
    ) -> Result<BlindedBatch, PsiError>;

    /// INTERSECT: keep the client elements whose unblinded signature is in
    /// the filter, preserving order and duplicates
    fn intersect<T>(
        &self,
        client_set: &[T],
        signed: &SignedBatch,
        factors: &[BlindingFactor],
        filter: &BloomFilter,
    ) -> Result<Vec<T>, PsiError>
    where
        T: Clone + Sync;
}
