//! Registry configuration.

/// Default validation window: five minutes.
pub const DEFAULT_WINDOW_SECS: u64 = 300;

/// Configuration for the Validation Registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationConfig {
    /// Seconds an unvalidated entry lives before it is removed.
    pub window_secs: u64,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            window_secs: DEFAULT_WINDOW_SECS,
        }
    }
}

impl ValidationConfig {
    /// Short window for tests.
    pub fn for_testing() -> Self {
        Self { window_secs: 30 }
    }
}
