//! # Node Runtime Library
//!
//! Wires the Ledger Engine (sr-01) to the Validation Registry (sr-02) and
//! exposes the resulting node to the binary and to integration tests.
//!
//! ## Modules
//!
//! - `container/` - Configuration and subsystem construction
//! - `adapters/` - Registry gate and store selection
//! - `node` - Request-level operations and the startup sequence
//! - `presentation` - Client-facing request and response shapes
//! - `errors` - `NodeError` and its failure classes

#![allow(clippy::type_complexity)]

pub mod adapters;
pub mod container;
pub mod errors;
pub mod node;
pub mod presentation;

pub use container::{NodeConfig, RuntimeServices, SubsystemContainer};
pub use errors::{ErrorKind, NodeError};
pub use node::{StarRegistryNode, StartupReport};
pub use presentation::{StarBlockView, StarInput, StarSubmission};
