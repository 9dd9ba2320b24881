//! High-level runtime orchestrator.
//!
//! The runtime owns the session manager and the background sweeper, and
//! exposes a builder-based API for front-ends to obtain a [`CombatService`].

use std::env;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use combat_core::{Catalog, CombatRules};

use crate::api::{CombatService, RuntimeError};
use crate::clock::{Clock, SystemClock};
use crate::repository::PlayerStore;
use crate::session::{RngFactory, SessionManager};
use crate::workers::SweeperWorker;

/// Runtime configuration shared across the session manager and workers.
#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeConfig {
    pub rules: CombatRules,
    /// Idle time after which the sweeper closes a session.
    pub abandon_after: Duration,
    pub sweep_interval: Duration,
    /// Base seed for per-session RNGs. `None` draws one at startup.
    pub rng_seed: Option<u64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            rules: CombatRules::default(),
            abandon_after: Duration::from_secs(30 * 60),
            sweep_interval: Duration::from_secs(60),
            rng_seed: None,
        }
    }
}

impl RuntimeConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables (unset or unparsable values keep the default):
    /// - `COMBAT_MAX_SP` - Skill-point pool size (default: 10)
    /// - `COMBAT_INITIAL_SP` - Skill points at encounter start (default: 5)
    /// - `COMBAT_SP_REGEN` - Skill points regenerated per monster turn (default: 2)
    /// - `COMBAT_LOG_CAPACITY` - Log lines kept per encounter (default: 8)
    /// - `COMBAT_ABANDON_AFTER_SECS` - Idle seconds before a sweep (default: 1800)
    /// - `COMBAT_SWEEP_INTERVAL_SECS` - Seconds between sweeps (default: 60)
    /// - `COMBAT_RNG_SEED` - Fixed base seed for reproducible sessions
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Apply environment overrides on top of `self`.
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(max_sp) = read_env::<u32>("COMBAT_MAX_SP") {
            self.rules.max_sp = max_sp;
        }
        if let Some(initial_sp) = read_env::<u32>("COMBAT_INITIAL_SP") {
            self.rules.initial_sp = initial_sp;
        }
        self.rules.initial_sp = self.rules.initial_sp.min(self.rules.max_sp);
        if let Some(regen) = read_env::<u32>("COMBAT_SP_REGEN") {
            self.rules.sp_regen = regen;
        }
        if let Some(capacity) = read_env::<usize>("COMBAT_LOG_CAPACITY") {
            self.rules.log_capacity = capacity.max(1);
        }
        if let Some(secs) = read_env::<u64>("COMBAT_ABANDON_AFTER_SECS") {
            self.abandon_after = Duration::from_secs(secs);
        }
        if let Some(secs) = read_env::<u64>("COMBAT_SWEEP_INTERVAL_SECS") {
            self.sweep_interval = Duration::from_secs(secs.max(1));
        }
        if let Some(seed) = read_env::<u64>("COMBAT_RNG_SEED") {
            self.rng_seed = Some(seed);
        }
        self
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.trim().parse().ok()
}

/// Main runtime that hosts combat sessions.
///
/// Design: Runtime owns the sweeper worker; [`CombatService`] is the
/// cloneable façade for request handlers.
pub struct Runtime {
    service: CombatService,
    shutdown_tx: watch::Sender<bool>,
    sweeper_handle: Option<JoinHandle<()>>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable service handle.
    pub fn service(&self) -> CombatService {
        self.service.clone()
    }

    pub fn sessions(&self) -> &Arc<SessionManager> {
        self.service.sessions()
    }

    /// Stop the sweeper and wait for it to exit.
    pub async fn shutdown(self) -> Result<(), RuntimeError> {
        // Receivers may already be gone if the worker exited.
        let _ = self.shutdown_tx.send(true);

        if let Some(handle) = self.sweeper_handle {
            handle.await.map_err(RuntimeError::WorkerJoin)?;
        }
        Ok(())
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    catalog: Option<Arc<Catalog>>,
    store: Option<Arc<dyn PlayerStore>>,
    clock: Option<Arc<dyn Clock>>,
    rng_factory: Option<RngFactory>,
    enable_sweeper: bool,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            catalog: None,
            store: None,
            clock: None,
            rng_factory: None,
            enable_sweeper: true,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Use a custom catalog instead of the bundled content.
    pub fn catalog(mut self, catalog: Arc<Catalog>) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Set the required player store
    pub fn store(mut self, store: Arc<dyn PlayerStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Override the wall clock (defaults to [`SystemClock`]).
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Inject the per-session RNG constructor, e.g. a scripted test double.
    pub fn rng_factory(mut self, factory: RngFactory) -> Self {
        self.rng_factory = Some(factory);
        self
    }

    /// Enable the abandonment sweeper (default: true)
    pub fn enable_sweeper(mut self, enable: bool) -> Self {
        self.enable_sweeper = enable;
        self
    }

    /// Build the runtime
    pub async fn build(self) -> Result<Runtime, RuntimeError> {
        let store = self.store.ok_or(RuntimeError::MissingStore)?;
        let catalog = match self.catalog {
            Some(catalog) => catalog,
            None => Arc::new(
                combat_content::builtin_catalog()
                    .map_err(|e| RuntimeError::Content(e.to_string()))?,
            ),
        };
        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));
        let rng_factory = self.rng_factory.unwrap_or_else(|| {
            let seed = self.config.rng_seed.unwrap_or_else(rand::random);
            tracing::debug!("Session RNG base seed: {}", seed);
            SessionManager::seeded_rng_factory(seed)
        });

        let sessions = Arc::new(SessionManager::new(
            catalog,
            store,
            clock,
            self.config.rules,
            rng_factory,
        ));

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let sweeper_handle = if self.enable_sweeper {
            let worker = SweeperWorker::new(
                Arc::clone(&sessions),
                self.config.sweep_interval,
                self.config.abandon_after,
                shutdown_rx,
            );
            Some(tokio::spawn(async move {
                worker.run().await;
            }))
        } else {
            None
        };

        tracing::info!(
            "Runtime built ({} monsters, sweeper: {})",
            sessions.catalog().monsters().count(),
            sweeper_handle.is_some()
        );

        Ok(Runtime {
            service: CombatService::new(sessions),
            shutdown_tx,
            sweeper_handle,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_values() {
        let config = RuntimeConfig::default();
        assert_eq!(config.abandon_after, Duration::from_secs(1800));
        assert_eq!(config.sweep_interval, Duration::from_secs(60));
        assert_eq!(config.rules, CombatRules::default());
        assert!(config.rng_seed.is_none());
    }

    #[tokio::test]
    async fn build_requires_a_store() {
        let err = Runtime::builder().build().await.err();
        assert!(matches!(err, Some(RuntimeError::MissingStore)));
    }
}
