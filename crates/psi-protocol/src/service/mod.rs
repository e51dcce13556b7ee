//! Service Layer
//!
//! Variant enums implementing the role ports, and the orchestrator that
//! sequences a full run.

pub mod client;
pub mod orchestrator;
pub mod server;

pub use client::PsiClient;
pub use orchestrator::ProtocolOrchestrator;
pub use server::PsiServer;
