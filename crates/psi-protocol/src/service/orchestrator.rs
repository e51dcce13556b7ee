//! # Protocol Orchestrator
//!
//! Sequences SETUP, ONLINE and INTERSECT for one run between an in-process
//! server and client. Each step checks the current [`Phase`]; a step that
//! fails moves the run to `Aborted`, which discards the blinding factors
//! and refuses every further step.
//!
//! Blinding factors are bound to one element ordering. They live only from
//! ONLINE to INTERSECT and are dropped once the result is produced.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use num_bigint::BigUint;
use psi_rsa::BlindingFactor;
use rand::{CryptoRng, RngCore};
use rayon::ThreadPool;
use tracing::{debug, info, warn};

use crate::domain::config::PsiConfig;
use crate::domain::phase::Phase;
use crate::error::PsiError;
use crate::events::{FilterMessage, SignedBatch};
use crate::metrics::{MetricsRecorder, NoOpMetrics};
use crate::ports::{PsiClientApi, PsiProtocol, PsiServerApi};
use crate::service::client::PsiClient;
use crate::service::server::PsiServer;

/// One PSI run
pub struct ProtocolOrchestrator<M: MetricsRecorder = NoOpMetrics> {
    config: PsiConfig,
    server: PsiServer,
    client: PsiClient,
    server_set: Vec<BigUint>,
    client_set: Vec<BigUint>,
    phase: Phase,
    filter: Option<FilterMessage>,
    factors: Vec<BlindingFactor>,
    signed: Option<SignedBatch>,
    result: Option<Vec<BigUint>>,
    pool: Option<ThreadPool>,
    metrics: Arc<M>,
}

impl ProtocolOrchestrator<NoOpMetrics> {
    /// Start a run in `Init` with an existing server key
    ///
    /// # Errors
    /// - `InvalidConfig` if `config` does not validate, names a different
    ///   variant than `server`, or the worker pool cannot be built
    pub fn new(
        config: PsiConfig,
        server: PsiServer,
        server_set: Vec<BigUint>,
        client_set: Vec<BigUint>,
    ) -> Result<Self, PsiError> {
        config.validate()?;
        if server.variant() != config.variant {
            return Err(PsiError::InvalidConfig(format!(
                "server speaks {}, configuration asks for {}",
                server.variant(),
                config.variant
            )));
        }

        let pool = config.build_pool()?;
        let client = PsiClient::from_public_key_message(&server.public_key_message())?;

        info!(
            variant = %config.variant,
            server_elements = server_set.len(),
            client_elements = client_set.len(),
            worker_threads = ?config.worker_threads,
            "PSI run initialised"
        );

        Ok(Self {
            config,
            server,
            client,
            server_set,
            client_set,
            phase: Phase::Init,
            filter: None,
            factors: Vec::new(),
            signed: None,
            result: None,
            pool,
            metrics: Arc::new(NoOpMetrics),
        })
    }

    /// Start a run in `Init` with a freshly generated server key
    pub fn generate<R>(
        config: PsiConfig,
        server_set: Vec<BigUint>,
        client_set: Vec<BigUint>,
        rng: &mut R,
    ) -> Result<Self, PsiError>
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        let server = PsiServer::generate(&config, rng)?;
        Self::new(config, server, server_set, client_set)
    }
}

impl<M: MetricsRecorder> ProtocolOrchestrator<M> {
    /// Report this run to `metrics`
    pub fn with_metrics<N: MetricsRecorder>(self, metrics: Arc<N>) -> ProtocolOrchestrator<N> {
        ProtocolOrchestrator {
            config: self.config,
            server: self.server,
            client: self.client,
            server_set: self.server_set,
            client_set: self.client_set,
            phase: self.phase,
            filter: self.filter,
            factors: self.factors,
            signed: self.signed,
            result: self.result,
            pool: self.pool,
            metrics,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn config(&self) -> &PsiConfig {
        &self.config
    }

    pub fn server(&self) -> &PsiServer {
        &self.server
    }

    pub fn client(&self) -> &PsiClient {
        &self.client
    }

    /// Filter exported during SETUP, until the run ends
    pub fn filter_message(&self) -> Option<&FilterMessage> {
        self.filter.as_ref()
    }

    /// Number of blinding factors currently held
    pub fn pending_factors(&self) -> usize {
        self.factors.len()
    }

    /// Final intersection, once `Intersected`
    pub fn result(&self) -> Option<&[BigUint]> {
        self.result.as_deref()
    }

    /// SETUP: the server signs its set and exports its filter
    pub fn setup(&mut self) -> Result<(), PsiError> {
        self.expect_phase(Phase::Init)?;
        let started = Instant::now();

        let (server, server_set, fp_prob) = (&self.server, &self.server_set, self.config.fp_prob);
        let outcome = run_in(self.pool.as_ref(), || server.setup(server_set, fp_prob));
        let filter = self.abort_on_err(outcome)?;

        debug!(
            hash_functions = filter.filter.num_hash_functions,
            "Server filter exported"
        );
        self.metrics.record_setup(self.server_set.len(), started.elapsed());
        self.filter = Some(filter);
        self.advance(Phase::SetupDone);
        Ok(())
    }

    /// ONLINE: the client draws factors and blinds its set; the server
    /// signs the blinded batch
    pub fn online<R>(&mut self, rng: &mut R) -> Result<(), PsiError>
    where
        R: RngCore + CryptoRng + Send + ?Sized,
    {
        self.expect_phase(Phase::SetupDone)?;
        let started = Instant::now();

        let (client, server, client_set) = (&self.client, &self.server, &self.client_set);
        let outcome = run_in(self.pool.as_ref(), || -> Result<_, PsiError> {
            let factors = client.random_factors(client_set.len(), rng)?;
            let blinded = client.blind_batch(client_set, &factors)?;
            let signed = server.sign_batch(&blinded)?;
            Ok((factors, signed))
        });
        let (factors, signed) = self.abort_on_err(outcome)?;

        self.metrics.record_online(self.client_set.len(), started.elapsed());
        self.factors = factors;
        self.signed = Some(signed);
        self.advance(Phase::OnlineDone);
        Ok(())
    }

    /// INTERSECT: the client unblinds and tests each signature against the
    /// server's filter
    pub fn intersect(&mut self) -> Result<&[BigUint], PsiError> {
        self.expect_phase(Phase::OnlineDone)?;
        let started = Instant::now();

        let outcome = match (self.filter.as_ref(), self.signed.as_ref()) {
            (Some(filter_msg), Some(signed)) => {
                let (client, client_set, factors) = (&self.client, &self.client_set, &self.factors);
                run_in(self.pool.as_ref(), || {
                    let filter = filter_msg.to_filter()?;
                    client.intersect(client_set, signed, factors, &filter)
                })
            }
            _ => Err(PsiError::InvalidPhase {
                expected: Phase::OnlineDone,
                actual: self.phase,
            }),
        };
        let result = self.abort_on_err(outcome)?;

        self.metrics
            .record_intersect(self.client_set.len(), result.len(), started.elapsed());
        self.factors = Vec::new();
        self.signed = None;
        self.advance(Phase::Intersected);
        info!(matched = result.len(), "PSI run complete");

        Ok(self.result.insert(result).as_slice())
    }

    /// All three phases in order
    pub fn run<R>(&mut self, rng: &mut R) -> Result<Vec<BigUint>, PsiError>
    where
        R: RngCore + CryptoRng + Send + ?Sized,
    {
        self.setup()?;
        self.online(rng)?;
        Ok(self.intersect()?.to_vec())
    }

    /// Abandon the run and discard its blinding factors
    ///
    /// Terminal runs are left as they are.
    pub fn abort(&mut self) {
        if !self.phase.is_terminal() {
            self.discard("aborted by caller");
        }
    }

    fn expect_phase(&self, expected: Phase) -> Result<(), PsiError> {
        match self.phase {
            Phase::Aborted => Err(PsiError::RunAborted),
            actual if actual == expected => Ok(()),
            actual => Err(PsiError::InvalidPhase { expected, actual }),
        }
    }

    fn advance(&mut self, next: Phase) {
        debug_assert_eq!(self.phase.next(), Some(next));
        info!(from = %self.phase, to = %next, "PSI phase transition");
        self.phase = next;
    }

    fn abort_on_err<T>(&mut self, outcome: Result<T, PsiError>) -> Result<T, PsiError> {
        outcome.map_err(|err| {
            self.discard(&err);
            err
        })
    }

    fn discard(&mut self, reason: impl fmt::Display) {
        let failed_at = self.phase;
        self.phase = Phase::Aborted;
        self.factors = Vec::new();
        self.signed = None;
        self.filter = None;
        self.result = None;
        self.metrics.record_run_aborted();
        warn!(phase = %failed_at, reason = %reason, "PSI run aborted, blinding factors discarded");
    }
}

/// Run `f` on the dedicated pool if there is one, else on the caller's
/// thread (which uses rayon's global pool for parallel work)
fn run_in<T, F>(pool: Option<&ThreadPool>, f: F) -> T
where
    F: FnOnce() -> T + Send,
    T: Send,
{
    match pool {
        Some(pool) => pool.install(f),
        None => f(),
    }
}
