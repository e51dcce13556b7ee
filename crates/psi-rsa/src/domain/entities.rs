//! # Domain Entities

use num_bigint::BigUint;

/// Ephemeral blinding factor for one client element.
///
/// Holds `r^-1 mod n` (for unblinding) and `r^e mod n` (for blinding); `r`
/// itself is dropped once both are computed. Factor `i` is bound to client
/// element `i` for the whole run and must not be reused in another run.
#[derive(Clone, PartialEq, Eq)]
pub struct BlindingFactor {
    r_inv: BigUint,
    r_enc: BigUint,
}

impl BlindingFactor {
    pub(crate) fn new(r_inv: BigUint, r_enc: BigUint) -> Self {
        Self { r_inv, r_enc }
    }

    /// `r^-1 mod n`
    pub fn r_inv(&self) -> &BigUint {
        &self.r_inv
    }

    /// `r^e mod n`
    pub fn r_enc(&self) -> &BigUint {
        &self.r_enc
    }
}

impl std::fmt::Debug for BlindingFactor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("BlindingFactor(<redacted>)")
    }
}
