//! # PSI Protocol
//!
//! Configuration, wire messages and phase sequencing for Private Set
//! Intersection over RSA blind signatures.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): `PsiConfig`, `ProtocolVariant`, `Phase`
//! - **Events** (`events/`): payloads exchanged between the parties
//! - **Ports** (`ports/`): `PsiServerApi` / `PsiClientApi` capability traits
//! - **Service** (`service/`): variant enums and the `ProtocolOrchestrator`
//! - **Metrics** (`metrics.rs`): run counters behind `MetricsRecorder`
//!
//! ## Run Lifecycle
//!
//! ```text
//! INIT ──setup──► SETUP_DONE ──online──► ONLINE_DONE ──intersect──► INTERSECTED
//!   └──────────────────┴─────────────────────┴──── on error ──► ABORTED
//! ```
//!
//! ## Usage Example
//!
//! ```ignore
//! use psi_protocol::{to_elements, ProtocolOrchestrator, PsiConfig};
//! use rand::rngs::OsRng;
//!
//! let mut run = ProtocolOrchestrator::generate(
//!     PsiConfig::from_env(),
//!     to_elements(0u64..1024),
//!     to_elements((0u64..1024).step_by(5)),
//!     &mut OsRng,
//! )?;
//! let intersection = run.run(&mut OsRng)?;
//! ```

pub mod domain;
pub mod error;
pub mod events;
pub mod metrics;
pub mod ports;
pub mod service;

pub use domain::{to_elements, Phase, ProtocolVariant, PsiConfig, PsiConfigBuilder};
pub use error::PsiError;
pub use events::{BlindedBatch, FilterMessage, PublicKeyMessage, SignedBatch, WireMessage};
pub use metrics::{MetricsRecorder, MetricsSnapshot, NoOpMetrics, ProtocolMetrics};
pub use ports::{PsiClientApi, PsiProtocol, PsiServerApi};
pub use service::{ProtocolOrchestrator, PsiClient, PsiServer};
