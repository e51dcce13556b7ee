//! Wire payloads
//!
//! | Direction | Message | Phase |
//! |---|---|---|
//! | Server → Client | `PublicKeyMessage` | before SETUP |
//! | Server → Client | `FilterMessage` | SETUP |
//! | Client → Server | `BlindedBatch` | ONLINE |
//! | Server → Client | `SignedBatch` | ONLINE |
//!
//! Big integers travel as decimal strings.

use num_bigint::BigUint;
use psi_bloom_filter::{BloomFilter, BloomFilterRecord};
use psi_rsa::RsaPublicKey;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr};

use crate::domain::config::ProtocolVariant;
use crate::error::PsiError;

/// JSON encoding shared by every protocol message
pub trait WireMessage: Serialize + DeserializeOwned {
    fn to_json(&self) -> Result<String, PsiError> {
        serde_json::to_string(self).map_err(|e| PsiError::Serialization(e.to_string()))
    }

    fn from_json(json: &str) -> Result<Self, PsiError> {
        serde_json::from_str(json).map_err(|e| PsiError::Serialization(e.to_string()))
    }
}

/// Server public key `{n, e}`
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicKeyMessage {
    pub variant: ProtocolVariant,
    #[serde_as(as = "DisplayFromStr")]
    pub n: BigUint,
    #[serde_as(as = "DisplayFromStr")]
    pub e: BigUint,
}

impl PublicKeyMessage {
    pub fn from_key(variant: ProtocolVariant, key: &RsaPublicKey) -> Self {
        Self {
            variant,
            n: key.n().clone(),
            e: key.e().clone(),
        }
    }

    /// Validate and rebuild the public key
    pub fn to_key(&self) -> Result<RsaPublicKey, PsiError> {
        Ok(RsaPublicKey::new(self.n.clone(), self.e.clone())?)
    }
}

/// Serialized filter over the server's signed set
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterMessage {
    pub variant: ProtocolVariant,
    pub filter: BloomFilterRecord,
}

impl FilterMessage {
    /// Rebuild the read-only membership checker
    pub fn to_filter(&self) -> Result<BloomFilter, PsiError> {
        Ok(BloomFilter::from_record(&self.filter)?)
    }
}

/// Client's blinded elements, in client order
#[serde_as]
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlindedBatch {
    #[serde_as(as = "Vec<DisplayFromStr>")]
    pub elements: Vec<BigUint>,
}

/// Server signatures, positionally aligned with the blinded batch
#[serde_as]
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedBatch {
    #[serde_as(as = "Vec<DisplayFromStr>")]
    pub signatures: Vec<BigUint>,
}

impl BlindedBatch {
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl SignedBatch {
    pub fn len(&self) -> usize {
        self.signatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signatures.is_empty()
    }
}

impl WireMessage for PublicKeyMessage {}
impl WireMessage for FilterMessage {}
impl WireMessage for BlindedBatch {}
impl WireMessage for SignedBatch {}
