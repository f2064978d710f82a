//! # Adapters
//!
//! - `gate` - Registry-backed `SubmissionGate` for the ledger
//! - `storage` - Backend selection for the ledger's `KeyValueStore`

pub mod gate;
pub mod storage;

pub use gate::RegistryGate;
pub use storage::open_store;
