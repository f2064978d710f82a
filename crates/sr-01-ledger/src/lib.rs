//! # Ledger Engine (sr-01)
//!
//! The Ledger Engine is the authoritative, append-only record of star claims.
//! Every block is keyed by its height and linked to its predecessor through
//! `previousBlockHash`, so any out-of-band mutation breaks the chain from that
//! height on.
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Description |
//! |----|-----------|-------------|
//! | 1 | Sequential Heights | New block height is always `tip + 1`, genesis is 0 |
//! | 2 | Hash Linkage | `block[h].previous_block_hash == block[h-1].hash` |
//! | 3 | Self-Consistent Hash | `block.hash` equals the digest of its other fields |
//! | 4 | Write-Once | No operation updates or deletes a block |
//! | 5 | Serialized Appends | One append at a time, under the append lock |
//! | 6 | Gated Submissions | Star claims need a validated registry entry |
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `domain/` - Blocks, bodies, hashing, chain audit, errors
//! - `ports/` - Port traits (inbound API, outbound SPI)
//! - `adapters/` - Key-value stores, serializer, data-directory lock
//! - `service.rs` - Application service implementing the API
//!
//! ## Usage
//!
//! ```ignore
//! use sr_01_ledger::{LedgerApi, LedgerService};
//!
//! let ledger = LedgerService::new_in_memory(LedgerConfig::default());
//! ledger.ensure_genesis()?;
//!
//! let block = ledger.append_gated(star_body, &registry_gate)?;
//! assert_eq!(block.height, 1);
//! ```

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

// Re-export key types for convenience
pub use adapters::{InMemoryKVStore, JsonBlockSerializer};
pub use domain::chain::{audit_chain, ChainFault, FaultKind};
pub use domain::config::LedgerConfig;
pub use domain::entities::{parse_height, Block, BlockBody, BlockHeight, StarBody, StarRecord};
pub use domain::errors::{GateRejection, KVStoreError, LedgerError, SerializationError};
pub use ports::inbound::LedgerApi;
pub use ports::outbound::{BlockSerializer, KeyValueStore, ScanResult, SubmissionGate};
pub use service::{LedgerDependencies, LedgerService};

pub use adapters::FileBackedKVStore;

#[cfg(feature = "locking")]
pub use adapters::lock::{DataDirLock, LockError};

#[cfg(feature = "rocksdb")]
pub use adapters::storage::rocksdb::{RocksDbConfig, RocksDbStore};
