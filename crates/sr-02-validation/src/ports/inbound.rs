//! # Inbound Ports (Driving Ports)

use crate::domain::entities::ValidationEntry;
use crate::domain::errors::RegistryError;

/// Primary API for the Validation Registry.
pub trait ValidationRegistryApi: Send + Sync {
    /// Open a validation window for `address`, or report the existing one.
    ///
    /// A repeat request keeps the original timestamp and challenge and only
    /// refreshes `validation_window`.
    ///
    /// ## Errors
    ///
    /// - `InvalidInput`: empty address
    fn request_validation(&self, address: &str) -> Result<ValidationEntry, RegistryError>;

    /// Check `signature` over the entry's challenge.
    ///
    /// ## Errors
    ///
    /// - `NotInRegistry`: no live entry
    /// - `VerificationFailed`: bad signature, entry kept for retry
    fn verify_signature(
        &self,
        address: &str,
        signature: &str,
    ) -> Result<ValidationEntry, RegistryError>;

    /// A live entry exists.
    fn is_address_pending(&self, address: &str) -> bool;

    /// A live entry exists and carries a verified signature.
    fn is_address_validated(&self, address: &str) -> bool;

    /// Remove the entry and cancel its expiry. Returns whether one existed.
    fn consume(&self, address: &str) -> bool;

    /// Snapshot of the live entry, if any.
    fn entry(&self, address: &str) -> Option<ValidationEntry>;

    /// Number of live entries.
    fn pending_count(&self) -> usize;
}
