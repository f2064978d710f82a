//! # Validation Registry (sr-02)
//!
//! Proves that a client controls the key behind a wallet address before the
//! ledger accepts a star claim from it.
//!
//! ## Lifecycle
//!
//! ```text
//! request_validation ──► PENDING ──(valid signature)──► VALIDATED ──(consume)──► removed
//!                           │
//!                           └──(window elapses)──► EXPIRED (removed)
//! ```
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Description |
//! |----|-----------|-------------|
//! | 1 | One Entry Per Address | Re-requesting returns the existing entry |
//! | 2 | Stable Challenge | Timestamp and message never change for a live entry |
//! | 3 | Bounded Window | Unvalidated entries vanish once the window elapses |
//! | 4 | Exclusive Outcome | Expiry and verification never both succeed |
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `domain/` - Entries, challenge derivation, config, errors
//! - `ports/` - Registry API, verifier and expiry scheduler SPIs
//! - `adapters/` - Tokio and manual schedulers, wallet message verifier
//! - `service.rs` - `ValidationRegistry`

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::scheduler::{ManualExpiryScheduler, TokioExpiryScheduler};
pub use adapters::verifier::WalletMessageVerifier;
pub use domain::challenge::{challenge_message, remaining_window};
pub use domain::config::ValidationConfig;
pub use domain::entities::{ValidationEntry, ValidationStatus};
pub use domain::errors::RegistryError;
pub use ports::inbound::ValidationRegistryApi;
pub use ports::outbound::{ExpiryCallback, ExpiryHandle, ExpiryScheduler, SignatureVerifier};
pub use service::{RegistryDependencies, ValidationRegistry};
