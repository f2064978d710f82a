//! Registry error types.

use super::entities::ValidationEntry;
use thiserror::Error;

/// Errors returned by the Validation Registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// No live entry for this address (never requested, consumed or expired).
    #[error("{address}: not in registry or expired")]
    NotInRegistry { address: String },

    /// The signature did not verify; the entry is kept for a retry.
    #[error("{}: verification failed", entry.address)]
    VerificationFailed { entry: ValidationEntry },

    /// The request itself is malformed.
    #[error("Invalid input: {reason}")]
    InvalidInput { reason: String },

    /// No async runtime to drive expiry timers.
    #[error("Expiry scheduler unavailable: {message}")]
    SchedulerUnavailable { message: String },
}
