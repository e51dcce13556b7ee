//! Client role, dispatched over the variant announced by the server

use num_bigint::BigUint;
use psi_bloom_filter::BloomFilter;
use psi_rsa::{BlindingFactor, RsaClient};
use rand::{CryptoRng, RngCore};

use crate::domain::config::ProtocolVariant;
use crate::error::PsiError;
use crate::events::{BlindedBatch, PublicKeyMessage, SignedBatch};
use crate::ports::{PsiClientApi, PsiProtocol};

/// Client of one of the supported protocol variants
#[derive(Clone, Debug)]
pub enum PsiClient {
    Rsa(RsaClient),
}

impl PsiClient {
    /// Build the client matching the server's announced key
    ///
    /// # Errors
    /// `Rsa(InvalidKey)` if the announced key is malformed.
    pub fn from_public_key_message(msg: &PublicKeyMessage) -> Result<Self, PsiError> {
        match msg.variant {
            ProtocolVariant::Rsa => Ok(PsiClient::Rsa(RsaClient::new(msg.to_key()?))),
        }
    }
}

impl PsiProtocol for PsiClient {
    fn variant(&self) -> ProtocolVariant {
        match self {
            PsiClient::Rsa(_) => ProtocolVariant::Rsa,
        }
    }
}

impl PsiClientApi for PsiClient {
    fn random_factors<R>(&self, count: usize, rng: &mut R) -> Result<Vec<BlindingFactor>, PsiError>
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        match self {
            PsiClient::Rsa(client) => Ok(client.random_factors(count, rng)?),
        }
    }

    fn blind_batch(
        &self,
        client_set: &[BigUint],
        factors: &[BlindingFactor],
    ) -> Result<BlindedBatch, PsiError> {
        match self {
            PsiClient::Rsa(client) => Ok(BlindedBatch {
                elements: client.blind_set(client_set, factors)?,
            }),
        }
    }

    fn intersect<T>(
        &self,
        client_set: &[T],
        signed: &SignedBatch,
        factors: &[BlindingFactor],
        filter: &BloomFilter,
    ) -> Result<Vec<T>, PsiError>
    where
        T: Clone + Sync,
    {
        match self {
            PsiClient::Rsa(client) => {
                Ok(client.intersect(client_set, &signed.signatures, factors, filter)?)
            }
        }
    }
}
