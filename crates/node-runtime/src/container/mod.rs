//! # Subsystem Container
//!
//! Holds the Ledger Engine and the Validation Registry with their adapters
//! wired in, plus the configuration they were built from.

pub mod config;
pub mod subsystems;

pub use config::{ConfigError, NodeConfig, StorageBackend, StorageConfig};
pub use subsystems::{ConcreteLedger, ConcreteRegistry, RuntimeServices, SubsystemContainer};
