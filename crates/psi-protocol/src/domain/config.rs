//! PSI run configuration and validation
//!
//! # Example
//!
//! ```ignore
//! use psi_protocol::domain::PsiConfigBuilder;
//!
//! let config = PsiConfigBuilder::new()
//!     .key_size_bits(3072)
//!     .fp_prob(0.0001)
//!     .worker_threads(4)
//!     .build()
//!     .expect("Valid config");
//! ```

use std::fmt;
use std::str::FromStr;

use psi_rsa::{DEFAULT_PUBLIC_EXPONENT, MIN_KEY_SIZE_BITS};
use rayon::{ThreadPool, ThreadPoolBuilder};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::PsiError;

/// Environment variable names read by [`PsiConfig::from_env`]
pub const ENV_KEY_SIZE_BITS: &str = "PSI_KEY_SIZE_BITS";
pub const ENV_PUBLIC_EXPONENT: &str = "PSI_PUBLIC_EXPONENT";
pub const ENV_FP_PROB: &str = "PSI_FP_PROB";
pub const ENV_WORKER_THREADS: &str = "PSI_WORKER_THREADS";

/// Closed set of protocol variants.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProtocolVariant {
    /// RSA blind signatures with a Bloom filter intersection test
    #[default]
    Rsa,
}

impl ProtocolVariant {
    pub fn as_str(self) -> &'static str {
        match self {
            ProtocolVariant::Rsa => "rsa",
        }
    }
}

impl fmt::Display for ProtocolVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProtocolVariant {
    type Err = PsiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rsa" => Ok(ProtocolVariant::Rsa),
            other => Err(PsiError::InvalidConfig(format!(
                "unknown protocol variant: {other}"
            ))),
        }
    }
}

/// Configuration of one PSI deployment
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PsiConfig {
    /// Protocol variant to construct
    pub variant: ProtocolVariant,
    /// RSA modulus size in bits
    pub key_size_bits: usize,
    /// RSA public exponent
    pub public_exponent: u64,
    /// Target false positive probability of the server's filter
    pub fp_prob: f64,
    /// Dedicated rayon pool size; `None` uses the global pool
    pub worker_threads: Option<usize>,
}

impl Default for PsiConfig {
    fn default() -> Self {
        Self {
            variant: ProtocolVariant::Rsa,
            key_size_bits: 2048,
            public_exponent: DEFAULT_PUBLIC_EXPONENT,
            fp_prob: 0.001,
            worker_threads: None,
        }
    }
}

impl PsiConfig {
    /// Validate parameter bounds
    pub fn validate(&self) -> Result<(), PsiError> {
        if self.key_size_bits < MIN_KEY_SIZE_BITS {
            return Err(PsiError::InvalidConfig(format!(
                "key_size_bits must be at least {MIN_KEY_SIZE_BITS}, got {}",
                self.key_size_bits
            )));
        }

        // Both primes get half the bits
        if self.key_size_bits % 2 != 0 {
            return Err(PsiError::InvalidConfig(format!(
                "key_size_bits must be even, got {}",
                self.key_size_bits
            )));
        }

        if self.public_exponent < 3 || self.public_exponent % 2 == 0 {
            return Err(PsiError::InvalidConfig(format!(
                "public_exponent must be odd and at least 3, got {}",
                self.public_exponent
            )));
        }

        if !(self.fp_prob > 0.0 && self.fp_prob < 1.0) {
            return Err(PsiError::InvalidConfig(format!(
                "fp_prob must be in (0, 1), got {}",
                self.fp_prob
            )));
        }

        if self.worker_threads == Some(0) {
            return Err(PsiError::InvalidConfig(
                "worker_threads cannot be 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Defaults overlaid with `PSI_*` environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `PSI_KEY_SIZE_BITS`: RSA modulus size (default: 2048)
    /// - `PSI_PUBLIC_EXPONENT`: RSA public exponent (default: 65537)
    /// - `PSI_FP_PROB`: filter false positive probability (default: 0.001)
    /// - `PSI_WORKER_THREADS`: dedicated worker pool size (default: global pool)
    ///
    /// Values that do not parse are ignored with a warning. The result is
    /// not validated.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`PsiConfig::from_env`] with an explicit variable source
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(bits) = parse_var(&lookup, ENV_KEY_SIZE_BITS) {
            config.key_size_bits = bits;
        }
        if let Some(e) = parse_var(&lookup, ENV_PUBLIC_EXPONENT) {
            config.public_exponent = e;
        }
        if let Some(p) = parse_var(&lookup, ENV_FP_PROB) {
            config.fp_prob = p;
        }
        if let Some(threads) = parse_var(&lookup, ENV_WORKER_THREADS) {
            config.worker_threads = Some(threads);
        }

        config
    }

    /// Build the dedicated worker pool, if one is configured
    pub fn build_pool(&self) -> Result<Option<ThreadPool>, PsiError> {
        let Some(threads) = self.worker_threads else {
            return Ok(None);
        };

        ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("psi-worker-{i}"))
            .build()
            .map(Some)
            .map_err(|e| PsiError::InvalidConfig(format!("worker pool: {e}")))
    }
}

fn parse_var<F, T>(lookup: &F, key: &str) -> Option<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(key, value = %raw, "Ignoring unparsable configuration value");
            None
        }
    }
}

/// Builder for PsiConfig with validation
#[derive(Default)]
pub struct PsiConfigBuilder {
    variant: Option<ProtocolVariant>,
    key_size_bits: Option<usize>,
    public_exponent: Option<u64>,
    fp_prob: Option<f64>,
    worker_threads: Option<usize>,
}

impl PsiConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn variant(mut self, variant: ProtocolVariant) -> Self {
        self.variant = Some(variant);
        self
    }

    pub fn key_size_bits(mut self, bits: usize) -> Self {
        self.key_size_bits = Some(bits);
        self
    }

    pub fn public_exponent(mut self, e: u64) -> Self {
        self.public_exponent = Some(e);
        self
    }

    pub fn fp_prob(mut self, fp_prob: f64) -> Self {
        self.fp_prob = Some(fp_prob);
        self
    }

    pub fn worker_threads(mut self, threads: usize) -> Self {
        self.worker_threads = Some(threads);
        self
    }

    /// Build and validate the configuration
    ///
    /// # Errors
    /// `InvalidConfig` if any parameter is out of bounds
    pub fn build(self) -> Result<PsiConfig, PsiError> {
        let defaults = PsiConfig::default();
        let config = PsiConfig {
            variant: self.variant.unwrap_or(defaults.variant),
            key_size_bits: self.key_size_bits.unwrap_or(defaults.key_size_bits),
            public_exponent: self.public_exponent.unwrap_or(defaults.public_exponent),
            fp_prob: self.fp_prob.unwrap_or(defaults.fp_prob),
            worker_threads: self.worker_threads.or(defaults.worker_threads),
        };
        config.validate()?;
        Ok(config)
    }
}
