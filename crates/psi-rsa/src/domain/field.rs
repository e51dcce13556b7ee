//! # Modular Arithmetic
//!
//! Primitives over an RSA modulus. Every element operation in the protocol
//! goes through these.

use num_bigint::BigUint;

use super::errors::RsaError;

/// `a * b mod n`
pub fn mulmod(a: &BigUint, b: &BigUint, n: &BigUint) -> BigUint {
    (a * b) % n
}

/// `base^exp mod n`
pub fn powmod(base: &BigUint, exp: &BigUint, n: &BigUint) -> BigUint {
    base.modpow(exp, n)
}

/// `a^-1 mod n`
///
/// # Errors
/// `NotInvertible` if `gcd(a, n) != 1`.
pub fn invert(a: &BigUint, n: &BigUint) -> Result<BigUint, RsaError> {
    a.modinv(n).ok_or(RsaError::NotInvertible)
}

/// Fail with `OutOfRange` unless `x < n`
pub fn ensure_in_range(x: &BigUint, n: &BigUint) -> Result<(), RsaError> {
    if x >= n {
        return Err(RsaError::OutOfRange {
            modulus_bits: n.bits(),
        });
    }
    Ok(())
}
