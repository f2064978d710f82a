//! # Outbound Ports (Driven Ports)

use std::sync::Arc;

pub use shared_types::TimeSource;

/// Wallet message-signature check.
///
/// A pure function of its inputs. Malformed input yields `false`.
pub trait SignatureVerifier: Send + Sync {
    fn verify(&self, message: &str, address: &str, signature: &str) -> bool;
}

impl<T: SignatureVerifier + ?Sized> SignatureVerifier for Box<T> {
    fn verify(&self, message: &str, address: &str, signature: &str) -> bool {
        (**self).verify(message, address, signature)
    }
}

impl<T: SignatureVerifier + ?Sized> SignatureVerifier for Arc<T> {
    fn verify(&self, message: &str, address: &str, signature: &str) -> bool {
        (**self).verify(message, address, signature)
    }
}

/// Work run when a scheduled delay elapses.
pub type ExpiryCallback = Box<dyn FnOnce() + Send + 'static>;

/// Handle to a scheduled callback.
pub trait ExpiryHandle: Send {
    /// Prevent the callback from running. No effect once it has started.
    fn cancel(&self);
}

/// Runs callbacks after a delay.
///
/// Callbacks must not run inside `schedule` or `cancel`: the registry calls
/// both while holding its entry lock, and the callback takes that lock.
pub trait ExpiryScheduler: Send + Sync {
    fn schedule(&self, delay_secs: u64, callback: ExpiryCallback) -> Box<dyn ExpiryHandle>;
}

impl<T: ExpiryScheduler + ?Sized> ExpiryScheduler for Arc<T> {
    fn schedule(&self, delay_secs: u64, callback: ExpiryCallback) -> Box<dyn ExpiryHandle> {
        (**self).schedule(delay_secs, callback)
    }
}

impl<T: ExpiryScheduler + ?Sized> ExpiryScheduler for Box<T> {
    fn schedule(&self, delay_secs: u64, callback: ExpiryCallback) -> Box<dyn ExpiryHandle> {
        (**self).schedule(delay_secs, callback)
    }
}
