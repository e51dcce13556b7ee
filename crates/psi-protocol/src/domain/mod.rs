//! Domain layer: configuration, run phases and element helpers

pub mod config;
pub mod elements;
pub mod phase;

pub use config::{ProtocolVariant, PsiConfig, PsiConfigBuilder};
pub use elements::to_elements;
pub use phase::Phase;
