//! # Domain Errors
//!
//! Error types for the Ledger Engine.
//!
//! ## Design Principles
//!
//! - Lookup misses, bad input, gating refusals, storage faults and corrupt
//!   records are distinct variants so callers can map them independently
//! - Storage failures always propagate; nothing is logged and dropped
//! - No panics in domain logic (use Result instead)

use thiserror::Error;

/// Errors that can occur during ledger operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// No block exists at this height.
    #[error("No block at height {height}")]
    HeightNotFound { height: u64 },

    /// No block carries this hash.
    #[error("Block with hash '{hash}' not found")]
    HashNotFound { hash: String },

    /// No star block was submitted by this address.
    #[error("No blocks found for wallet address '{address}'")]
    AddressNotFound { address: String },

    /// Request is malformed (missing claim fields, bad height).
    #[error("Invalid input: {reason}")]
    InvalidInput { reason: String },

    /// Append attempted without a live, validated registry entry.
    #[error("Validation expired or absent for '{address}': {reason}")]
    ValidationExpiredOrAbsent {
        address: String,
        reason: GateRejection,
    },

    /// Underlying key-value store operation failed.
    #[error("Storage failure: {message}")]
    StorageFailure { message: String },

    /// A stored value could not be decoded into a well-formed block.
    #[error("Corrupt record at key '{key}': {reason}")]
    CorruptRecord { key: String, reason: String },

    /// A block could not be encoded.
    #[error("Serialization error: {message}")]
    SerializationError { message: String },
}

impl LedgerError {
    /// True for the three lookup-miss variants.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            LedgerError::HeightNotFound { .. }
                | LedgerError::HashNotFound { .. }
                | LedgerError::AddressNotFound { .. }
        )
    }

    pub(crate) fn invalid_input(reason: impl Into<String>) -> Self {
        LedgerError::InvalidInput {
            reason: reason.into(),
        }
    }
}

/// Why the validation gate refused a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GateRejection {
    /// No registry entry, or the entry has timed out.
    #[error("wallet address is not in the validation registry or has timed out")]
    NotPending,

    /// Entry exists but no valid signature was presented yet.
    #[error("wallet address has not been validated with a message signature")]
    NotValidated,
}

/// Key-value store errors.
#[derive(Debug, Clone, Error)]
pub enum KVStoreError {
    /// I/O error during read/write.
    #[error("KV store I/O error: {message}")]
    IOError { message: String },

    /// Data corruption in the store itself (unreadable file, bad framing).
    #[error("KV store corruption: {message}")]
    CorruptionError { message: String },
}

impl From<KVStoreError> for LedgerError {
    fn from(err: KVStoreError) -> Self {
        LedgerError::StorageFailure {
            message: err.to_string(),
        }
    }
}

/// Serialization errors.
#[derive(Debug, Clone, Error)]
#[error("Serialization error: {message}")]
pub struct SerializationError {
    pub message: String,
}

impl From<serde_json::Error> for SerializationError {
    fn from(err: serde_json::Error) -> Self {
        SerializationError {
            message: err.to_string(),
        }
    }
}

impl From<SerializationError> for LedgerError {
    fn from(err: SerializationError) -> Self {
        LedgerError::SerializationError {
            message: err.message,
        }
    }
}
