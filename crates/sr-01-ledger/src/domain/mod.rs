//! # Domain Layer
//!
//! Pure domain logic for the Ledger Engine. No I/O happens here.
//!
//! ## Modules
//!
//! - `entities` - Block, BlockBody, StarBody, StarRecord
//! - `hashing` - Block digest over `(height, time, body, previousBlockHash)`
//! - `keys` - Height-ordered store keys
//! - `chain` - Chain audit (hash and linkage checks)
//! - `config` - Ledger configuration
//! - `errors` - Domain error types

pub mod chain;
pub mod config;
pub mod entities;
pub mod errors;
pub mod hashing;
pub mod keys;
