//! # RSA Blind-Signature PSI
//!
//! Cryptographic core of the RSA-PSI protocol: the server signs elements with
//! its private exponent, the client blinds its elements so the server cannot
//! see them, unblinds the returned signatures and tests them against the
//! server's Bloom filter.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): Pure arithmetic, no I/O
//!   - `field`: `mulmod`, `powmod`, `invert` over the RSA modulus
//!   - `keys`: key generation and import
//!   - `encoding`: canonical byte encoding of protocol integers
//!   - `entities`: blinding factors
//! - **Protocol Layer** (`protocol/`): The two roles
//!   - `RsaServer`: signs sets, builds and exports the signed-set filter
//!   - `RsaClient`: blinds, unblinds and intersects
//!
//! ## Blinding
//!
//! For a random `r`, the client sends `x * r^e mod n`. The server returns
//! `(x * r^e)^d = x^d * r mod n`, and multiplying by `r^-1` leaves `x^d`,
//! the plain signature, without the server ever seeing `x`.
//!
//! ## Security Notes
//!
//! - Semi-honest model only; peers are not authenticated
//! - Blinding factors are drawn from an injected `CryptoRng`

pub mod domain;
pub mod protocol;

pub use domain::encoding::{encode_element, encode_elements};
pub use domain::entities::BlindingFactor;
pub use domain::errors::RsaError;
pub use domain::field::{ensure_in_range, invert, mulmod, powmod};
pub use domain::keys::{
    from_private, keygen, RsaPrivateKey, RsaPublicKey, DEFAULT_PUBLIC_EXPONENT,
    MIN_KEY_SIZE_BITS,
};
pub use protocol::{RsaClient, RsaServer};
