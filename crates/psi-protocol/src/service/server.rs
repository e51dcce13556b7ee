//! Server role, dispatched over the configured variant

use num_bigint::BigUint;
use psi_rsa::{RsaPrivateKey, RsaServer};
use rand::{CryptoRng, RngCore};
use tracing::debug;

use crate::domain::config::{ProtocolVariant, PsiConfig};
use crate::error::PsiError;
use crate::events::{BlindedBatch, FilterMessage, PublicKeyMessage, SignedBatch};
use crate::ports::{PsiProtocol, PsiServerApi};

/// Server of one of the supported protocol variants
pub enum PsiServer {
    Rsa(RsaServer),
}

impl PsiServer {
    /// Generate fresh key material for `config.variant`
    ///
    /// # Errors
    /// `InvalidConfig` if the configuration does not validate.
    pub fn generate<R>(config: &PsiConfig, rng: &mut R) -> Result<Self, PsiError>
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        config.validate()?;
        match config.variant {
            ProtocolVariant::Rsa => {
                let server = RsaServer::generate(config.key_size_bits, config.public_exponent, rng)?;
                debug!(
                    key_size_bits = config.key_size_bits,
                    "Generated RSA server key"
                );
                Ok(PsiServer::Rsa(server))
            }
        }
    }

    /// Import an existing RSA private key
    pub fn from_rsa_key(private_key: RsaPrivateKey) -> Self {
        PsiServer::Rsa(RsaServer::from_private_key(private_key))
    }
}

impl PsiProtocol for PsiServer {
    fn variant(&self) -> ProtocolVariant {
        match self {
            PsiServer::Rsa(_) => ProtocolVariant::Rsa,
        }
    }
}

impl PsiServerApi for PsiServer {
    fn public_key_message(&self) -> PublicKeyMessage {
        match self {
            PsiServer::Rsa(server) => {
                PublicKeyMessage::from_key(ProtocolVariant::Rsa, server.public_key())
            }
        }
    }

    fn setup(&self, server_set: &[BigUint], fp_prob: f64) -> Result<FilterMessage, PsiError> {
        match self {
            PsiServer::Rsa(server) => Ok(FilterMessage {
                variant: ProtocolVariant::Rsa,
                filter: server.setup(server_set, fp_prob)?,
            }),
        }
    }

    fn sign_batch(&self, batch: &BlindedBatch) -> Result<SignedBatch, PsiError> {
        match self {
            PsiServer::Rsa(server) => Ok(SignedBatch {
                signatures: server.sign_set(&batch.elements)?,
            }),
        }
    }
}
