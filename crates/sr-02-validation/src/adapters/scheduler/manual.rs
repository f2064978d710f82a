use crate::ports::outbound::{ExpiryCallback, ExpiryHandle, ExpiryScheduler};
use parking_lot::Mutex;
use shared_types::{TimeSource, Timestamp};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

struct ScheduledTask {
    due: Timestamp,
    cancelled: Arc<AtomicBool>,
    callback: ExpiryCallback,
}

/// Scheduler that only fires when [`run_due`] is called.
///
/// Due times are read from the injected clock, so tests advance a
/// `ManualTimeSource` and then fire exactly the callbacks that came due.
///
/// [`run_due`]: ManualExpiryScheduler::run_due
pub struct ManualExpiryScheduler<TS: TimeSource> {
    time_source: TS,
    tasks: Mutex<Vec<ScheduledTask>>,
}

impl<TS: TimeSource> ManualExpiryScheduler<TS> {
    pub fn new(time_source: TS) -> Self {
        Self {
            time_source,
            tasks: Mutex::new(Vec::new()),
        }
    }

    /// Run every callback due at the current time. Returns how many ran.
    ///
    /// Callbacks run after the task lock is released.
    pub fn run_due(&self) -> usize {
        let now = self.time_source.now();
        let due: Vec<ScheduledTask> = {
            let mut tasks = self.tasks.lock();
            tasks.retain(|t| !t.cancelled.load(Ordering::SeqCst));
            let (due, waiting): (Vec<_>, Vec<_>) = std::mem::take(&mut *tasks)
                .into_iter()
                .partition(|t| t.due <= now);
            *tasks = waiting;
            due
        };

        let mut ran = 0;
        for task in due {
            if !task.cancelled.load(Ordering::SeqCst) {
                (task.callback)();
                ran += 1;
            }
        }
        ran
    }

    /// Callbacks scheduled and neither cancelled nor run.
    pub fn scheduled_count(&self) -> usize {
        self.tasks
            .lock()
            .iter()
            .filter(|t| !t.cancelled.load(Ordering::SeqCst))
            .count()
    }
}

impl<TS: TimeSource> ExpiryScheduler for ManualExpiryScheduler<TS> {
    fn schedule(&self, delay_secs: u64, callback: ExpiryCallback) -> Box<dyn ExpiryHandle> {
        let cancelled = Arc::new(AtomicBool::new(false));
        self.tasks.lock().push(ScheduledTask {
            due: self.time_source.now().saturating_add(delay_secs),
            cancelled: cancelled.clone(),
            callback,
        });
        Box::new(ManualExpiryHandle { cancelled })
    }
}

struct ManualExpiryHandle {
    cancelled: Arc<AtomicBool>,
}

impl ExpiryHandle for ManualExpiryHandle {
    fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::ManualTimeSource;
    use std::sync::atomic::AtomicUsize;

    fn counting_callback(counter: &Arc<AtomicUsize>) -> ExpiryCallback {
        let counter = counter.clone();
        Box::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[test]
    fn test_runs_only_due_callbacks() {
        let clock = Arc::new(ManualTimeSource::new(1000));
        let scheduler = ManualExpiryScheduler::new(clock.clone());
        let counter = Arc::new(AtomicUsize::new(0));

        let _a = scheduler.schedule(10, counting_callback(&counter));
        let _b = scheduler.schedule(20, counting_callback(&counter));

        assert_eq!(scheduler.run_due(), 0);

        clock.advance(10);
        assert_eq!(scheduler.run_due(), 1);
        assert_eq!(scheduler.scheduled_count(), 1);

        clock.advance(100);
        assert_eq!(scheduler.run_due(), 1);
        assert_eq!(counter.load(Ordering::SeqCst), 2);
        assert_eq!(scheduler.run_due(), 0);
    }

    #[test]
    fn test_cancelled_task_is_dropped() {
        let clock = Arc::new(ManualTimeSource::new(0));
        let scheduler = ManualExpiryScheduler::new(clock.clone());
        let counter = Arc::new(AtomicUsize::new(0));

        let handle = scheduler.schedule(5, counting_callback(&counter));
        handle.cancel();
        clock.advance(5);

        assert_eq!(scheduler.run_due(), 0);
        assert_eq!(scheduler.scheduled_count(), 0);
        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_callback_may_schedule_again() {
        let clock = Arc::new(ManualTimeSource::new(0));
        let scheduler = Arc::new(ManualExpiryScheduler::new(clock.clone()));

        let inner = scheduler.clone();
        let _handle = scheduler.schedule(
            1,
            Box::new(move || {
                let _ = inner.schedule(1, Box::new(|| {}));
            }),
        );

        clock.advance(1);
        assert_eq!(scheduler.run_due(), 1);
        assert_eq!(scheduler.scheduled_count(), 1);
    }
}
