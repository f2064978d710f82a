//! # Shared Types Crate
//!
//! Cross-subsystem primitives for the Star Registry node.
//!
//! Both the Ledger Engine (sr-01) and the Validation Registry (sr-02) stamp
//! records with whole-second Unix timestamps. They read the clock through the
//! [`TimeSource`] port so tests can drive time deterministically.

pub mod time;

pub use time::{ManualTimeSource, SystemTimeSource, TimeSource, Timestamp};

/// Wallet address as submitted by a client (e.g. a Base58 P2PKH address).
pub type WalletAddress = String;
