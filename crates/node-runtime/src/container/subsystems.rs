//! # Subsystem Container
//!
//! Holds both subsystem instances and the data-directory lock that guards
//! their storage.
//!
//! ## Initialization Order
//!
//! ```text
//! Phase 1: Data-directory lock (persistent backends only)
//! Phase 2: Ledger Engine over the configured KeyValueStore
//! Phase 3: Validation Registry over the runtime's scheduler and verifier
//! ```
//!
//! ## Thread Safety
//!
//! - Both subsystems are wrapped in `Arc` for shared ownership
//! - Each synchronizes internally; the container adds no locks of its own

use std::sync::Arc;

use tracing::{info, instrument};

use shared_types::{SystemTimeSource, TimeSource};
use sr_01_ledger::{
    DataDirLock, JsonBlockSerializer, KeyValueStore, LedgerDependencies, LedgerService,
};
use sr_02_validation::{
    ExpiryScheduler, RegistryDependencies, SignatureVerifier, TokioExpiryScheduler,
    ValidationRegistry, WalletMessageVerifier,
};

use crate::adapters::open_store;
use crate::container::config::NodeConfig;
use crate::errors::NodeError;

/// Ledger Engine with the runtime-selected store.
pub type ConcreteLedger =
    LedgerService<Box<dyn KeyValueStore>, JsonBlockSerializer, Arc<dyn TimeSource>>;

/// Validation Registry with runtime-selected verifier and scheduler.
pub type ConcreteRegistry =
    ValidationRegistry<Box<dyn SignatureVerifier>, Arc<dyn ExpiryScheduler>, Arc<dyn TimeSource>>;

/// Clock, scheduler and verifier shared by the subsystems.
pub struct RuntimeServices {
    pub time_source: Arc<dyn TimeSource>,
    pub scheduler: Arc<dyn ExpiryScheduler>,
    pub verifier: Box<dyn SignatureVerifier>,
}

impl RuntimeServices {
    /// System clock, Tokio timers and wallet signature verification.
    ///
    /// Must be called from inside a Tokio runtime.
    pub fn production() -> Result<Self, NodeError> {
        Ok(Self {
            time_source: Arc::new(SystemTimeSource),
            scheduler: Arc::new(TokioExpiryScheduler::current()?),
            verifier: Box::new(WalletMessageVerifier),
        })
    }
}

/// Central container holding both subsystem instances.
pub struct SubsystemContainer {
    /// Ledger Engine (Subsystem 1)
    pub ledger: Arc<ConcreteLedger>,

    /// Validation Registry (Subsystem 2)
    pub registry: Arc<ConcreteRegistry>,

    /// Node configuration (immutable after initialization).
    pub config: NodeConfig,

    /// Released after the store it guards has been dropped.
    _data_lock: Option<DataDirLock>,
}

impl SubsystemContainer {
    /// Create the container with both subsystems wired to their adapters.
    #[instrument(name = "subsystem_init", skip(config, services))]
    pub fn new(config: NodeConfig, services: RuntimeServices) -> Result<Self, NodeError> {
        info!("Initializing Star Registry subsystem container");

        // =====================================================================
        // PHASE 1: Data-directory lock
        // =====================================================================
        let data_lock = if config.storage.backend.is_persistent() {
            let lock = DataDirLock::acquire(&config.storage.data_dir)?;
            info!(
                "Phase 1: Locked data directory {} (pid {})",
                config.storage.data_dir.display(),
                lock.pid()
            );
            Some(lock)
        } else {
            info!("Phase 1: In-memory storage, no data-directory lock");
            None
        };

        // =====================================================================
        // PHASE 2: Ledger Engine
        // =====================================================================
        let kv_store = open_store(&config.storage)?;
        let ledger = Arc::new(LedgerService::new(
            LedgerDependencies {
                kv_store,
                serializer: JsonBlockSerializer,
                time_source: services.time_source.clone(),
            },
            config.ledger.clone(),
        ));
        info!("Phase 2: [sr-01] Ledger Engine initialized");

        // =====================================================================
        // PHASE 3: Validation Registry
        // =====================================================================
        let registry = Arc::new(ValidationRegistry::new(
            RegistryDependencies {
                verifier: services.verifier,
                scheduler: services.scheduler,
                time_source: services.time_source,
            },
            config.validation.clone(),
        ));
        info!(
            "Phase 3: [sr-02] Validation Registry initialized (window {}s)",
            config.validation.window_secs
        );

        Ok(Self {
            ledger,
            registry,
            config,
            _data_lock: data_lock,
        })
    }
}
