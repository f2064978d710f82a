//! Time source port and its adapters.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Unix timestamp in whole seconds.
pub type Timestamp = u64;

/// Abstract interface for time operations (for testability).
pub trait TimeSource: Send + Sync {
    /// Get current timestamp in seconds since epoch.
    fn now(&self) -> Timestamp;
}

impl<T: TimeSource + ?Sized> TimeSource for Arc<T> {
    fn now(&self) -> Timestamp {
        (**self).now()
    }
}

impl<T: TimeSource + ?Sized> TimeSource for Box<T> {
    fn now(&self) -> Timestamp {
        (**self).now()
    }
}

/// Default time source using system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&self) -> Timestamp {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    }
}

/// Manually advanced clock.
///
/// Shared by reference (`Arc<ManualTimeSource>`) between the component under
/// test and the test body, which moves time forward with [`advance`].
///
/// [`advance`]: ManualTimeSource::advance
#[derive(Debug, Default)]
pub struct ManualTimeSource {
    time: AtomicU64,
}

impl ManualTimeSource {
    pub fn new(initial: Timestamp) -> Self {
        Self {
            time: AtomicU64::new(initial),
        }
    }

    pub fn advance(&self, secs: u64) {
        self.time.fetch_add(secs, Ordering::SeqCst);
    }

    pub fn set(&self, time: Timestamp) {
        self.time.store(time, Ordering::SeqCst);
    }
}

impl TimeSource for ManualTimeSource {
    fn now(&self) -> Timestamp {
        self.time.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_time_source() {
        let now = SystemTimeSource.now();
        // Jan 1, 2020
        assert!(now > 1_577_836_800);
    }

    #[test]
    fn test_manual_time_source() {
        let clock = ManualTimeSource::new(1_700_000_000);
        assert_eq!(clock.now(), 1_700_000_000);

        clock.advance(300);
        assert_eq!(clock.now(), 1_700_000_300);

        clock.set(5);
        assert_eq!(clock.now(), 5);
    }

    #[test]
    fn test_shared_clock_through_arc() {
        let clock = Arc::new(ManualTimeSource::new(10));
        let as_port: Arc<dyn TimeSource> = clock.clone();

        clock.advance(7);
        assert_eq!(as_port.now(), 17);
    }
}
