//! Shared fixtures for the integration suite

use std::sync::Once;

use psi_protocol::{PsiConfig, PsiConfigBuilder};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

static TRACING: Once = Once::new();

/// Install a test-writer subscriber once per process; `RUST_LOG` overrides
/// the default `warn` level
pub fn init_tracing() {
    TRACING.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}

/// Deterministic generator for reproducible runs
pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// 512-bit keys keep key generation fast in tests
pub fn test_config() -> PsiConfig {
    PsiConfigBuilder::new()
        .key_size_bits(512)
        .fp_prob(0.001)
        .build()
        .expect("512-bit test config is valid")
}
