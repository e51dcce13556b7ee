//! # PSI Benchmarks
//!
//! Criterion bench functions, grouped per crate and driven by
//! `benches/psi_benchmarks.rs`.

pub mod bloom_filter;
pub mod rsa_psi;
