//! # Node Errors
//!
//! Unifies the ledger and registry error types for the runtime and sorts
//! every failure into an [`ErrorKind`] a request layer can map to a response.

use sr_01_ledger::{GateRejection, LedgerError, LockError};
use sr_02_validation::RegistryError;
use thiserror::Error;

use crate::container::ConfigError;

/// Coarse failure classes surfaced to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    InvalidInput,
    ValidationExpiredOrAbsent,
    VerificationFailed,
    StorageFailure,
    CorruptRecord,
    /// Configuration, locking or runtime setup.
    Startup,
}

/// Errors from the node runtime.
#[derive(Debug, Error)]
pub enum NodeError {
    /// Submission without a live, validated registry entry.
    #[error("Wallet address {address}: {reason}")]
    ValidationExpiredOrAbsent {
        address: String,
        reason: GateRejection,
    },

    /// Malformed request.
    #[error("Invalid input: {reason}")]
    InvalidInput { reason: String },

    #[error(transparent)]
    Ledger(LedgerError),

    #[error(transparent)]
    Registry(RegistryError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Data directory lock: {0}")]
    Lock(#[from] LockError),
}

impl NodeError {
    pub(crate) fn invalid_input(reason: impl Into<String>) -> Self {
        NodeError::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Failure class of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            NodeError::ValidationExpiredOrAbsent { .. } => ErrorKind::ValidationExpiredOrAbsent,
            NodeError::InvalidInput { .. } => ErrorKind::InvalidInput,
            NodeError::Ledger(e) if e.is_not_found() => ErrorKind::NotFound,
            NodeError::Ledger(LedgerError::CorruptRecord { .. }) => ErrorKind::CorruptRecord,
            NodeError::Ledger(_) => ErrorKind::StorageFailure,
            NodeError::Registry(RegistryError::NotInRegistry { .. }) => {
                ErrorKind::ValidationExpiredOrAbsent
            }
            NodeError::Registry(RegistryError::VerificationFailed { .. }) => {
                ErrorKind::VerificationFailed
            }
            NodeError::Registry(RegistryError::InvalidInput { .. }) => ErrorKind::InvalidInput,
            NodeError::Registry(RegistryError::SchedulerUnavailable { .. }) => ErrorKind::Startup,
            NodeError::Config(_) | NodeError::Lock(_) => ErrorKind::Startup,
        }
    }
}

impl From<LedgerError> for NodeError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::ValidationExpiredOrAbsent { address, reason } => {
                NodeError::ValidationExpiredOrAbsent { address, reason }
            }
            LedgerError::InvalidInput { reason } => NodeError::InvalidInput { reason },
            other => NodeError::Ledger(other),
        }
    }
}

impl From<RegistryError> for NodeError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::InvalidInput { reason } => NodeError::InvalidInput { reason },
            other => NodeError::Registry(other),
        }
    }
}
