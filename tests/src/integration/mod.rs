//! Cross-crate integration tests

pub mod e2e_psi;
pub mod properties;
