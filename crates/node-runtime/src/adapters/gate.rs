//! Validation gate for star submissions.

use sr_01_ledger::{GateRejection, SubmissionGate};
use sr_02_validation::ValidationRegistryApi;

/// Admits an address only while it holds a validated registry entry, and
/// consumes the entry once its block is stored.
pub struct RegistryGate<'a, R: ValidationRegistryApi + ?Sized> {
    registry: &'a R,
}

impl<'a, R: ValidationRegistryApi + ?Sized> RegistryGate<'a, R> {
    pub fn new(registry: &'a R) -> Self {
        Self { registry }
    }
}

impl<R: ValidationRegistryApi + ?Sized> SubmissionGate for RegistryGate<'_, R> {
    fn admit(&self, address: &str) -> Result<(), GateRejection> {
        if !self.registry.is_address_pending(address) {
            return Err(GateRejection::NotPending);
        }
        if !self.registry.is_address_validated(address) {
            return Err(GateRejection::NotValidated);
        }
        Ok(())
    }

    fn release(&self, address: &str) {
        self.registry.consume(address);
    }
}
