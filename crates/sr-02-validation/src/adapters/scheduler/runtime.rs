use crate::domain::errors::RegistryError;
use crate::ports::outbound::{ExpiryCallback, ExpiryHandle, ExpiryScheduler};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::AbortHandle;

/// Schedules each expiry as a sleeping task on a Tokio runtime.
#[derive(Debug, Clone)]
pub struct TokioExpiryScheduler {
    handle: Handle,
}

impl TokioExpiryScheduler {
    pub fn new(handle: Handle) -> Self {
        Self { handle }
    }

    /// Bind to the runtime the caller is running on.
    pub fn current() -> Result<Self, RegistryError> {
        Handle::try_current()
            .map(Self::new)
            .map_err(|e| RegistryError::SchedulerUnavailable {
                message: e.to_string(),
            })
    }
}

impl ExpiryScheduler for TokioExpiryScheduler {
    fn schedule(&self, delay_secs: u64, callback: ExpiryCallback) -> Box<dyn ExpiryHandle> {
        let task = self.handle.spawn(async move {
            tokio::time::sleep(Duration::from_secs(delay_secs)).await;
            callback();
        });
        Box::new(TokioExpiryHandle(task.abort_handle()))
    }
}

struct TokioExpiryHandle(AbortHandle);

impl ExpiryHandle for TokioExpiryHandle {
    fn cancel(&self) {
        self.0.abort();
    }
}
