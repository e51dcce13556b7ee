//! # PSI Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── benchmarks/       # Criterion bench functions per crate
//! │   ├── bloom_filter.rs
//! │   └── rsa_psi.rs
//! │
//! ├── integration/      # Cross-crate protocol runs
//! │   ├── e2e_psi.rs
//! │   ├── wire_exchange.rs
//! │   ├── failure_modes.rs
//! │   └── properties.rs
//! │
//! └── support.rs        # Tracing setup and fixtures
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p psi-tests
//!
//! # By category
//! cargo test -p psi-tests integration::
//!
//! # With protocol logs
//! RUST_LOG=psi_protocol=info cargo test -p psi-tests -- --nocapture
//!
//! # Benchmarks
//! cargo bench -p psi-tests
//! ```

pub mod benchmarks;
pub mod integration;
pub mod support;
