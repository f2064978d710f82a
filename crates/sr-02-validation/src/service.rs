//! # Validation Registry Service
//!
//! Entry table and per-entry expiry handles share one mutex. Signature
//! checks run with the mutex released; the transition afterwards only
//! applies if the entry still has the generation it had before the check.
//! Expiry callbacks carry the generation they were scheduled for and do
//! nothing once the entry has moved on or been validated.

use crate::domain::challenge::{challenge_message, remaining_window, window_elapsed};
use crate::domain::config::ValidationConfig;
use crate::domain::entities::{ValidationEntry, ValidationStatus};
use crate::domain::errors::RegistryError;
use crate::ports::inbound::ValidationRegistryApi;
use crate::ports::outbound::{ExpiryHandle, ExpiryScheduler, SignatureVerifier, TimeSource};
use parking_lot::Mutex;
use shared_types::Timestamp;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, info};

struct Record {
    entry: ValidationEntry,
    generation: u64,
    expiry: Option<Box<dyn ExpiryHandle>>,
}

impl Record {
    fn cancel_expiry(&mut self) {
        if let Some(handle) = self.expiry.take() {
            handle.cancel();
        }
    }
}

#[derive(Default)]
struct RegistryState {
    records: Mutex<HashMap<String, Record>>,
    next_generation: AtomicU64,
}

impl RegistryState {
    fn expire(&self, address: &str, generation: u64) {
        let mut records = self.records.lock();
        let current = matches!(
            records.get(address),
            Some(r) if r.generation == generation && !r.entry.validated
        );
        if current {
            records.remove(address);
            info!("[sr-02] ⌛ Validation window expired for {}", address);
        }
    }
}

/// Dependencies for `ValidationRegistry`.
pub struct RegistryDependencies<V, S, TS> {
    /// Wallet signature check.
    pub verifier: V,
    /// Runs expiry callbacks.
    pub scheduler: S,
    /// Clock for request timestamps and window arithmetic.
    pub time_source: TS,
}

/// The Validation Registry.
pub struct ValidationRegistry<V, S, TS>
where
    V: SignatureVerifier,
    S: ExpiryScheduler,
    TS: TimeSource,
{
    state: Arc<RegistryState>,
    verifier: V,
    scheduler: S,
    time_source: TS,
    config: ValidationConfig,
}

impl<V, S, TS> ValidationRegistry<V, S, TS>
where
    V: SignatureVerifier,
    S: ExpiryScheduler,
    TS: TimeSource,
{
    pub fn new(deps: RegistryDependencies<V, S, TS>, config: ValidationConfig) -> Self {
        Self {
            state: Arc::new(RegistryState::default()),
            verifier: deps.verifier,
            scheduler: deps.scheduler,
            time_source: deps.time_source,
            config,
        }
    }

    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    fn is_expired(&self, record: &Record, now: Timestamp) -> bool {
        !record.entry.validated
            && window_elapsed(self.config.window_secs, record.entry.request_timestamp, now)
    }

    fn snapshot(&self, record: &Record, now: Timestamp) -> ValidationEntry {
        ValidationEntry {
            validation_window: remaining_window(
                self.config.window_secs,
                record.entry.request_timestamp,
                now,
            ),
            ..record.entry.clone()
        }
    }

    fn next_generation(&self) -> u64 {
        self.state.next_generation.fetch_add(1, Ordering::SeqCst)
    }

    fn schedule_expiry(
        &self,
        address: &str,
        generation: u64,
        delay_secs: u64,
    ) -> Box<dyn ExpiryHandle> {
        let state = Arc::downgrade(&self.state);
        let address = address.to_string();
        self.scheduler.schedule(
            delay_secs,
            Box::new(move || {
                if let Some(state) = state.upgrade() {
                    state.expire(&address, generation);
                }
            }),
        )
    }

    fn remove_record(records: &mut HashMap<String, Record>, address: &str) -> bool {
        match records.remove(address) {
            Some(mut record) => {
                record.cancel_expiry();
                true
            }
            None => false,
        }
    }

    fn not_in_registry(address: &str) -> RegistryError {
        RegistryError::NotInRegistry {
            address: address.to_string(),
        }
    }
}

impl<V, S, TS> ValidationRegistryApi for ValidationRegistry<V, S, TS>
where
    V: SignatureVerifier,
    S: ExpiryScheduler,
    TS: TimeSource,
{
    fn request_validation(&self, address: &str) -> Result<ValidationEntry, RegistryError> {
        if address.trim().is_empty() {
            return Err(RegistryError::InvalidInput {
                reason: "address is required".to_string(),
            });
        }

        let now = self.time_source.now();
        let mut records = self.state.records.lock();

        if let Some(record) = records.get(address) {
            if !self.is_expired(record, now) {
                debug!("[sr-02] Validation already pending for {}", address);
                return Ok(self.snapshot(record, now));
            }
        }
        // Expired but its timer has not fired yet.
        Self::remove_record(&mut records, address);

        let generation = self.next_generation();
        let entry = ValidationEntry {
            address: address.to_string(),
            request_timestamp: now,
            message: challenge_message(address, now),
            validation_window: self.config.window_secs,
            validated: false,
            status: ValidationStatus::Pending,
        };
        let expiry = self.schedule_expiry(address, generation, self.config.window_secs);
        records.insert(
            address.to_string(),
            Record {
                entry: entry.clone(),
                generation,
                expiry: Some(expiry),
            },
        );

        info!(
            "[sr-02] 📝 Validation requested for {} (window {}s)",
            address, self.config.window_secs
        );
        Ok(entry)
    }

    fn verify_signature(
        &self,
        address: &str,
        signature: &str,
    ) -> Result<ValidationEntry, RegistryError> {
        let (message, generation) = {
            let now = self.time_source.now();
            let mut records = self.state.records.lock();
            match records.get(address) {
                Some(r) if !self.is_expired(r, now) => (r.entry.message.clone(), r.generation),
                _ => {
                    Self::remove_record(&mut records, address);
                    return Err(Self::not_in_registry(address));
                }
            }
        };

        let verified = self.verifier.verify(&message, address, signature);

        let now = self.time_source.now();
        let mut records = self.state.records.lock();
        match records.get(address) {
            Some(r) if r.generation == generation => {
                if self.is_expired(r, now) {
                    Self::remove_record(&mut records, address);
                    return Err(Self::not_in_registry(address));
                }
            }
            _ => return Err(Self::not_in_registry(address)),
        }
        let record = records
            .get_mut(address)
            .ok_or_else(|| Self::not_in_registry(address))?;

        if verified {
            record.entry.validated = true;
            record.entry.status = ValidationStatus::Verified;
            record.cancel_expiry();
            info!("[sr-02] ✅ Wallet {} verified", address);
            return Ok(self.snapshot(record, now));
        }

        record.entry.status = ValidationStatus::VerificationFailed;
        let mut window_gone = false;
        if record.entry.validated {
            // Downgraded entries expire with whatever is left of the window.
            record.entry.validated = false;
            let remaining = remaining_window(
                self.config.window_secs,
                record.entry.request_timestamp,
                now,
            );
            if remaining == 0 {
                window_gone = true;
            } else {
                let generation = self.next_generation();
                record.generation = generation;
                record.expiry = Some(self.schedule_expiry(address, generation, remaining));
            }
        }
        let entry = self.snapshot(record, now);
        if window_gone {
            Self::remove_record(&mut records, address);
        }

        debug!("[sr-02] Signature rejected for {}", address);
        Err(RegistryError::VerificationFailed { entry })
    }

    fn is_address_pending(&self, address: &str) -> bool {
        let now = self.time_source.now();
        self.state
            .records
            .lock()
            .get(address)
            .is_some_and(|r| !self.is_expired(r, now))
    }

    fn is_address_validated(&self, address: &str) -> bool {
        self.state
            .records
            .lock()
            .get(address)
            .is_some_and(|r| r.entry.validated)
    }

    fn consume(&self, address: &str) -> bool {
        let removed = Self::remove_record(&mut self.state.records.lock(), address);
        if removed {
            info!("[sr-02] 🗑️ Consumed validation for {}", address);
        }
        removed
    }

    fn entry(&self, address: &str) -> Option<ValidationEntry> {
        let now = self.time_source.now();
        self.state
            .records
            .lock()
            .get(address)
            .filter(|r| !self.is_expired(r, now))
            .map(|r| self.snapshot(r, now))
    }

    fn pending_count(&self) -> usize {
        let now = self.time_source.now();
        self.state
            .records
            .lock()
            .values()
            .filter(|r| !self.is_expired(r, now))
            .count()
    }
}

impl<V, S, TS> Drop for ValidationRegistry<V, S, TS>
where
    V: SignatureVerifier,
    S: ExpiryScheduler,
    TS: TimeSource,
{
    fn drop(&mut self) {
        for record in self.state.records.lock().values_mut() {
            record.cancel_expiry();
        }
    }
}
