//! Scheduled task execution.
//!
//! Transport factories hand out a scheduled-execution resource for
//! deadline and timer work. The [`ScheduledExecutor`] trait abstracts
//! over where that resource comes from: the process-wide pooled timer or
//! an executor the application supplied itself.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// Cancellation handle for a single scheduled task.
///
/// Cloning the handle shares the same cancellation flag. Cancelling after
/// the task has run is a no-op.
#[derive(Debug, Clone)]
pub struct TaskHandle {
    cancelled: Arc<AtomicBool>,
}

impl TaskHandle {
    /// Create a fresh, not-yet-cancelled handle.
    ///
    /// Executor implementations create one per scheduled task and check
    /// it before running the task.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Request that the task not run.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// Check whether the task has been cancelled.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

impl Default for TaskHandle {
    fn default() -> Self {
        Self::new()
    }
}

/// A resource that runs tasks after a delay.
///
/// Implementations must skip tasks whose handle was cancelled before the
/// delay elapsed, and must tolerate `schedule` being called after
/// shutdown by returning an already-cancelled handle instead of
/// panicking.
///
/// ## Example
///
/// ```rust
/// use std::sync::Arc;
/// use std::time::Duration;
/// use breeze_core::{ScheduledExecutor, TaskHandle};
///
/// /// Runs every task inline, ignoring the delay.
/// struct Inline;
///
/// impl ScheduledExecutor for Inline {
///     fn schedule(&self, _delay: Duration, task: Box<dyn FnOnce() + Send>) -> TaskHandle {
///         task();
///         TaskHandle::new()
///     }
///
///     fn is_shutdown(&self) -> bool {
///         false
///     }
/// }
///
/// let executor: Arc<dyn ScheduledExecutor> = Arc::new(Inline);
/// let handle = executor.schedule(Duration::from_millis(5), Box::new(|| {}));
/// assert!(!handle.is_cancelled());
/// ```
pub trait ScheduledExecutor: Send + Sync {
    /// Run `task` once after `delay` has elapsed.
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce() + Send>) -> TaskHandle;

    /// Check whether the executor has been shut down.
    fn is_shutdown(&self) -> bool;
}
