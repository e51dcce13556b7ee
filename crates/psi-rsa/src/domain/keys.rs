//! # RSA Key Material
//!
//! Public key `(n, e)`, private key `(n, e, d)`.
//!
//! INVARIANT: `e * d ≡ 1 (mod λ(n))` for generated keys.
//!
//! Generated keys also keep their CRT parameters so signing costs two
//! half-size exponentiations instead of one full-size one. Imported keys
//! without primes fall back to `x^d mod n`; both give the same result.

use std::fmt;

use num_bigint::{BigUint, RandBigInt};
use num_integer::Integer;
use num_prime::nt_funcs::is_prime;
use num_traits::{One, Zero};
use rand::{CryptoRng, RngCore};
use tracing::debug;

use super::errors::RsaError;
use super::field::{ensure_in_range, invert, mulmod, powmod};

/// Default RSA public exponent (F4)
pub const DEFAULT_PUBLIC_EXPONENT: u64 = 65_537;

/// Smallest modulus accepted by [`keygen`]
pub const MIN_KEY_SIZE_BITS: usize = 128;

/// Public half of the server key, sent to the client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RsaPublicKey {
    n: BigUint,
    e: BigUint,
}

impl RsaPublicKey {
    /// Create a public key, checking that `n > 2` is odd and `e >= 3` is odd
    pub fn new(n: BigUint, e: BigUint) -> Result<Self, RsaError> {
        if n <= BigUint::from(2u8) || n.is_even() {
            return Err(RsaError::InvalidKey("modulus must be an odd integer > 2".to_string()));
        }
        if e < BigUint::from(3u8) || e.is_even() {
            return Err(RsaError::InvalidKey(
                "public exponent must be an odd integer >= 3".to_string(),
            ));
        }
        Ok(Self { n, e })
    }

    /// Modulus `n`
    pub fn n(&self) -> &BigUint {
        &self.n
    }

    /// Public exponent `e`
    pub fn e(&self) -> &BigUint {
        &self.e
    }

    /// Bit length of the modulus
    pub fn size_bits(&self) -> u64 {
        self.n.bits()
    }

    /// `x^e mod n`
    pub fn encrypt(&self, x: &BigUint) -> Result<BigUint, RsaError> {
        ensure_in_range(x, &self.n)?;
        Ok(powmod(x, &self.e, &self.n))
    }
}

/// CRT parameters of a key whose primes are known
#[derive(Clone, PartialEq, Eq)]
struct CrtParams {
    p: BigUint,
    q: BigUint,
    dp: BigUint,
    dq: BigUint,
    qinv: BigUint,
}

impl CrtParams {
    fn new(p: BigUint, q: BigUint, d: &BigUint) -> Result<Self, RsaError> {
        let one = BigUint::one();
        let dp = d % (&p - &one);
        let dq = d % (&q - &one);
        let qinv = invert(&q, &p)?;
        Ok(Self { p, q, dp, dq, qinv })
    }

    /// `c^d mod pq` via Garner's recombination
    fn decrypt(&self, c: &BigUint) -> BigUint {
        let m1 = powmod(c, &self.dp, &self.p);
        let m2 = powmod(c, &self.dq, &self.q);
        // m1 - m2 mod p, kept non-negative
        let diff = (&m1 + &self.p - (&m2 % &self.p)) % &self.p;
        let h = mulmod(&self.qinv, &diff, &self.p);
        m2 + h * &self.q
    }
}

/// Private server key. Never leaves the server.
#[derive(Clone, PartialEq, Eq)]
pub struct RsaPrivateKey {
    n: BigUint,
    e: BigUint,
    d: BigUint,
    crt: Option<CrtParams>,
}

impl RsaPrivateKey {
    /// Import a private key from its components
    pub fn new(n: BigUint, e: BigUint, d: BigUint) -> Result<Self, RsaError> {
        RsaPublicKey::new(n.clone(), e.clone())?;
        if d.is_zero() || d >= n {
            return Err(RsaError::InvalidKey(
                "private exponent must be in (0, n)".to_string(),
            ));
        }
        Ok(Self { n, e, d, crt: None })
    }

    /// Build a private key from two distinct primes and a public exponent
    ///
    /// `d = e^-1 mod lcm(p - 1, q - 1)`.
    pub fn from_primes(p: BigUint, q: BigUint, e: BigUint) -> Result<Self, RsaError> {
        if p == q {
            return Err(RsaError::InvalidKey("primes must be distinct".to_string()));
        }
        let one = BigUint::one();
        let lambda = (&p - &one).lcm(&(&q - &one));
        let d = e.modinv(&lambda).ok_or_else(|| {
            RsaError::InvalidKey("public exponent is not invertible mod λ(n)".to_string())
        })?;
        let n = &p * &q;
        RsaPublicKey::new(n.clone(), e.clone())?;
        let crt = CrtParams::new(p, q, &d)?;

        Ok(Self {
            n,
            e,
            d,
            crt: Some(crt),
        })
    }

    /// Modulus `n`
    pub fn n(&self) -> &BigUint {
        &self.n
    }

    /// Public exponent `e`
    pub fn e(&self) -> &BigUint {
        &self.e
    }

    /// Private exponent `d`
    pub fn d(&self) -> &BigUint {
        &self.d
    }

    /// Prime factors, when the key was generated or built from primes
    pub fn primes(&self) -> Option<(&BigUint, &BigUint)> {
        self.crt.as_ref().map(|crt| (&crt.p, &crt.q))
    }

    /// Derive the public key `(n, e)`
    pub fn to_public_key(&self) -> RsaPublicKey {
        RsaPublicKey {
            n: self.n.clone(),
            e: self.e.clone(),
        }
    }

    /// `c^d mod n`
    pub fn decrypt(&self, c: &BigUint) -> Result<BigUint, RsaError> {
        ensure_in_range(c, &self.n)?;
        Ok(match &self.crt {
            Some(crt) => crt.decrypt(c),
            None => powmod(c, &self.d, &self.n),
        })
    }
}

impl fmt::Debug for RsaPrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RsaPrivateKey")
            .field("n", &self.n)
            .field("e", &self.e)
            .field("d", &"<redacted>")
            .field("crt", &self.crt.is_some())
            .finish()
    }
}

/// Generate an RSA key pair with a modulus of exactly `key_size_bits` bits
///
/// # Errors
/// `KeyGeneration` if the size is below [`MIN_KEY_SIZE_BITS`] or odd, or if
/// `e` is even or smaller than 3.
pub fn keygen<R>(
    key_size_bits: usize,
    e: u64,
    rng: &mut R,
) -> Result<(RsaPublicKey, RsaPrivateKey), RsaError>
where
    R: RngCore + CryptoRng + ?Sized,
{
    if key_size_bits < MIN_KEY_SIZE_BITS || key_size_bits % 2 != 0 {
        return Err(RsaError::KeyGeneration(format!(
            "key size must be an even number of bits >= {MIN_KEY_SIZE_BITS}, got {key_size_bits}"
        )));
    }
    if e < 3 || e % 2 == 0 {
        return Err(RsaError::KeyGeneration(format!(
            "public exponent must be odd and >= 3, got {e}"
        )));
    }

    let e = BigUint::from(e);
    let prime_bits = (key_size_bits / 2) as u64;

    let p = generate_prime(prime_bits, &e, rng);
    let q = loop {
        let candidate = generate_prime(prime_bits, &e, rng);
        if candidate != p {
            break candidate;
        }
    };

    let private_key = RsaPrivateKey::from_primes(p, q, e)?;
    debug_assert_eq!(private_key.n().bits(), key_size_bits as u64);
    debug!(key_size_bits, "Generated RSA key pair");

    Ok(from_private(private_key))
}

/// Derive the public key from an existing private key
pub fn from_private(private_key: RsaPrivateKey) -> (RsaPublicKey, RsaPrivateKey) {
    (private_key.to_public_key(), private_key)
}

/// Random prime of exactly `bits` bits with `gcd(p - 1, e) = 1`
///
/// The two top bits are forced so that the product of two such primes has
/// exactly `2 * bits` bits.
fn generate_prime<R>(bits: u64, e: &BigUint, rng: &mut R) -> BigUint
where
    R: RngCore + ?Sized,
{
    let one = BigUint::one();
    let top = (&one << (bits - 1)) | (&one << (bits - 2));
    loop {
        let candidate = rng.gen_biguint(bits) | &top | &one;
        if !(&candidate - &one).gcd(e).is_one() {
            continue;
        }
        if is_prime(&candidate, None).probably() {
            return candidate;
        }
    }
}
