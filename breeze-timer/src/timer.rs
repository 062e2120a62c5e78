//! Background timer thread.
//!
//! A [`Timer`] runs delayed tasks on one dedicated thread, ordered by
//! deadline. It is the default scheduled-execution resource behind
//! [`TIMER_SERVICE`]; channels that bring their own executor never start
//! one.

use std::cmp::Ordering as CmpOrdering;
use std::collections::BinaryHeap;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};

use breeze_core::{ScheduledExecutor, SharedResource, TaskHandle};

/// Global counter for timer thread names.
static TIMER_THREAD_COUNTER: AtomicU64 = AtomicU64::new(1);

/// The process-wide pooled timer.
///
/// Transport factories built without a caller-supplied executor acquire
/// this kind and release it exactly once when they close. The timer
/// thread starts on the first acquire and shuts down when the last
/// holder releases.
pub static TIMER_SERVICE: SharedResource<Timer> =
    SharedResource::new("timer-service", Timer::new, |timer| timer.shutdown());

type Task = Box<dyn FnOnce() + Send>;

struct Entry {
    deadline: Instant,
    seq: u64,
    task: Task,
    handle: TaskHandle,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.deadline == other.deadline && self.seq == other.seq
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<CmpOrdering> {
        Some(self.cmp(other))
    }
}

// BinaryHeap is a max-heap; reverse the comparison so the earliest
// deadline surfaces first, with the sequence number breaking ties in
// submission order.
impl Ord for Entry {
    fn cmp(&self, other: &Self) -> CmpOrdering {
        other
            .deadline
            .cmp(&self.deadline)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

struct Queue {
    entries: BinaryHeap<Entry>,
    shutdown: bool,
    next_seq: u64,
}

struct Shared {
    queue: Mutex<Queue>,
    wakeup: Condvar,
}

/// One-thread delay queue.
///
/// Tasks run on the timer thread in deadline order; cancelled entries
/// are skipped at fire time. `shutdown` is a non-blocking signal: it
/// drops all pending tasks, wakes the thread so it can exit, and returns
/// without waiting for it.
pub struct Timer {
    shared: Arc<Shared>,
    name: String,
}

impl Timer {
    /// Start a timer with its own named background thread.
    #[must_use]
    pub fn new() -> Self {
        let shared = Arc::new(Shared {
            queue: Mutex::new(Queue {
                entries: BinaryHeap::new(),
                shutdown: false,
                next_seq: 0,
            }),
            wakeup: Condvar::new(),
        });
        let name = format!(
            "breeze-timer-{}",
            TIMER_THREAD_COUNTER.fetch_add(1, Ordering::Relaxed)
        );

        let worker_shared = shared.clone();
        let spawned = std::thread::Builder::new()
            .name(name.clone())
            .spawn(move || worker(&worker_shared));
        if let Err(err) = spawned {
            // Out of threads: the timer is born shut down and every
            // schedule call returns a cancelled handle.
            tracing::error!(timer = %name, %err, "failed to spawn timer thread");
            shared.queue.lock().shutdown = true;
        }

        Self { shared, name }
    }

    /// Name of the timer thread.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Run `task` once after `delay` has elapsed.
    ///
    /// On a shut down timer this logs a warning and returns an
    /// already-cancelled handle; the task is dropped without running.
    pub fn schedule(&self, delay: Duration, task: Box<dyn FnOnce() + Send>) -> TaskHandle {
        let handle = TaskHandle::new();
        let mut queue = self.shared.queue.lock();
        if queue.shutdown {
            drop(queue);
            tracing::warn!(timer = %self.name, "schedule on a shut down timer");
            handle.cancel();
            return handle;
        }

        let seq = queue.next_seq;
        queue.next_seq += 1;
        queue.entries.push(Entry {
            deadline: Instant::now() + delay,
            seq,
            task,
            handle: handle.clone(),
        });
        drop(queue);

        self.shared.wakeup.notify_one();
        handle
    }

    /// Shut the timer down.
    ///
    /// Pending tasks are dropped without running. Idempotent, and never
    /// waits for the timer thread.
    pub fn shutdown(&self) {
        let dropped = {
            let mut queue = self.shared.queue.lock();
            if queue.shutdown {
                return;
            }
            queue.shutdown = true;
            let dropped = queue.entries.len();
            queue.entries.clear();
            dropped
        };
        self.shared.wakeup.notify_all();
        tracing::debug!(timer = %self.name, dropped, "timer shut down");
    }

    /// Check whether the timer has been shut down.
    #[must_use]
    pub fn is_shutdown(&self) -> bool {
        self.shared.queue.lock().shutdown
    }

    /// Number of tasks waiting to fire.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.shared.queue.lock().entries.len()
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl ScheduledExecutor for Timer {
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce() + Send>) -> TaskHandle {
        Timer::schedule(self, delay, task)
    }

    fn is_shutdown(&self) -> bool {
        Timer::is_shutdown(self)
    }
}

fn worker(shared: &Shared) {
    loop {
        let mut queue = shared.queue.lock();

        if queue.shutdown {
            return;
        }

        let next_deadline = queue.entries.peek().map(|entry| entry.deadline);
        let deadline = match next_deadline {
            Some(deadline) => deadline,
            None => {
                shared.wakeup.wait(&mut queue);
                continue;
            }
        };

        if deadline > Instant::now() {
            let _ = shared.wakeup.wait_until(&mut queue, deadline);
            continue;
        }

        let entry = match queue.entries.pop() {
            Some(entry) => entry,
            None => continue,
        };
        drop(queue);

        if entry.handle.is_cancelled() {
            continue;
        }

        // Run outside the lock; a panicking task must not take the
        // timer thread down with it.
        let task = entry.task;
        if std::panic::catch_unwind(AssertUnwindSafe(task)).is_err() {
            tracing::error!("timer task panicked");
        }
    }
}
