//! Metrics hooks for protocol runs
//!
//! ## Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use psi_protocol::metrics::ProtocolMetrics;
//!
//! let metrics = Arc::new(ProtocolMetrics::new());
//! let mut run = ProtocolOrchestrator::new(config, server, server_set, client_set)?
//!     .with_metrics(Arc::clone(&metrics));
//! run.run(&mut rng)?;
//!
//! println!("{:?}", metrics.snapshot());
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Counters for PSI runs
///
/// Thread-safe; one instance may be shared by many runs.
#[derive(Default)]
pub struct ProtocolMetrics {
    /// Elements signed by the server (own set plus blinded batches)
    pub elements_signed: AtomicU64,
    /// Client elements blinded
    pub elements_blinded: AtomicU64,
    /// Unblinded signatures tested against a filter
    pub elements_checked: AtomicU64,
    /// Tests that hit the filter
    pub elements_matched: AtomicU64,
    /// Runs that reached INTERSECTED
    pub runs_completed: AtomicU64,
    /// Runs that were aborted
    pub runs_aborted: AtomicU64,
    /// Cumulative phase time in nanoseconds
    pub setup_time_ns: AtomicU64,
    pub online_time_ns: AtomicU64,
    pub intersect_time_ns: AtomicU64,
}

impl ProtocolMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a finished SETUP phase
    pub fn record_setup(&self, signed: usize, duration: Duration) {
        self.elements_signed.fetch_add(signed as u64, Ordering::Relaxed);
        self.setup_time_ns.fetch_add(duration.as_nanos() as u64, Ordering::Relaxed);
    }

    /// Record a finished ONLINE phase
    pub fn record_online(&self, blinded: usize, duration: Duration) {
        self.elements_blinded.fetch_add(blinded as u64, Ordering::Relaxed);
        self.elements_signed.fetch_add(blinded as u64, Ordering::Relaxed);
        self.online_time_ns.fetch_add(duration.as_nanos() as u64, Ordering::Relaxed);
    }

    /// Record a finished INTERSECT phase; this completes the run
    pub fn record_intersect(&self, checked: usize, matched: usize, duration: Duration) {
        self.elements_checked.fetch_add(checked as u64, Ordering::Relaxed);
        self.elements_matched.fetch_add(matched as u64, Ordering::Relaxed);
        self.intersect_time_ns.fetch_add(duration.as_nanos() as u64, Ordering::Relaxed);
        self.runs_completed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_run_aborted(&self) {
        self.runs_aborted.fetch_add(1, Ordering::Relaxed);
    }

    /// Get current metrics snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            elements_signed: self.elements_signed.load(Ordering::Relaxed),
            elements_blinded: self.elements_blinded.load(Ordering::Relaxed),
            elements_checked: self.elements_checked.load(Ordering::Relaxed),
            elements_matched: self.elements_matched.load(Ordering::Relaxed),
            runs_completed: self.runs_completed.load(Ordering::Relaxed),
            runs_aborted: self.runs_aborted.load(Ordering::Relaxed),
            setup_time_ns: self.setup_time_ns.load(Ordering::Relaxed),
            online_time_ns: self.online_time_ns.load(Ordering::Relaxed),
            intersect_time_ns: self.intersect_time_ns.load(Ordering::Relaxed),
        }
    }

    /// Share of checked elements that matched
    ///
    /// Includes true matches as well as filter false positives.
    pub fn observed_match_rate(&self) -> f64 {
        let checked = self.elements_checked.load(Ordering::Relaxed);
        let matched = self.elements_matched.load(Ordering::Relaxed);
        if checked > 0 {
            matched as f64 / checked as f64
        } else {
            0.0
        }
    }

    /// Reset all counters
    pub fn reset(&self) {
        for counter in [
            &self.elements_signed,
            &self.elements_blinded,
            &self.elements_checked,
            &self.elements_matched,
            &self.runs_completed,
            &self.runs_aborted,
            &self.setup_time_ns,
            &self.online_time_ns,
            &self.intersect_time_ns,
        ] {
            counter.store(0, Ordering::Relaxed);
        }
    }
}

/// Point-in-time metrics snapshot
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub elements_signed: u64,
    pub elements_blinded: u64,
    pub elements_checked: u64,
    pub elements_matched: u64,
    pub runs_completed: u64,
    pub runs_aborted: u64,
    pub setup_time_ns: u64,
    pub online_time_ns: u64,
    pub intersect_time_ns: u64,
}

/// Trait for custom metrics recording implementations
///
/// Implement this to forward run statistics to an external metrics system.
pub trait MetricsRecorder: Send + Sync {
    fn record_setup(&self, signed: usize, duration: Duration);

    fn record_online(&self, blinded: usize, duration: Duration);

    fn record_intersect(&self, checked: usize, matched: usize, duration: Duration);

    fn record_run_aborted(&self);
}

/// No-op metrics recorder for when metrics are disabled
#[derive(Default)]
pub struct NoOpMetrics;

impl MetricsRecorder for NoOpMetrics {
    fn record_setup(&self, _: usize, _: Duration) {}
    fn record_online(&self, _: usize, _: Duration) {}
    fn record_intersect(&self, _: usize, _: usize, _: Duration) {}
    fn record_run_aborted(&self) {}
}

impl MetricsRecorder for ProtocolMetrics {
    fn record_setup(&self, signed: usize, duration: Duration) {
        ProtocolMetrics::record_setup(self, signed, duration);
    }

    fn record_online(&self, blinded: usize, duration: Duration) {
        ProtocolMetrics::record_online(self, blinded, duration);
    }

    fn record_intersect(&self, checked: usize, matched: usize, duration: Duration) {
        ProtocolMetrics::record_intersect(self, checked, matched, duration);
    }

    fn record_run_aborted(&self) {
        ProtocolMetrics::record_run_aborted(self);
    }
}
