//! Error types for the PSI protocol layer

use psi_bloom_filter::FilterError;
use psi_rsa::RsaError;
use thiserror::Error;

use crate::domain::phase::Phase;

/// Errors that can occur while configuring or running a PSI protocol
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PsiError {
    #[error(transparent)]
    Rsa(RsaError),

    #[error(transparent)]
    Filter(#[from] FilterError),

    #[error("Invalid phase: expected {expected}, run is at {actual}")]
    InvalidPhase { expected: Phase, actual: Phase },

    #[error("Protocol run was aborted; start a new run")]
    RunAborted,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<RsaError> for PsiError {
    /// Filter failures surface as [`PsiError::Filter`] whichever layer raised them
    fn from(err: RsaError) -> Self {
        match err {
            RsaError::Filter(inner) => PsiError::Filter(inner),
            other => PsiError::Rsa(other),
        }
    }
}
