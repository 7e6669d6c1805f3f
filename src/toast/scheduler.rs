// SPDX-License-Identifier: MPL-2.0
//! Cancellable one-shot timers.
//!
//! The store and the toaster never sleep themselves: they ask a
//! [`Scheduler`] to run a task after a delay and keep the returned
//! [`TimerHandle`] to cancel it if it becomes stale.
//!
//! Two implementations are provided:
//!
//! - [`TokioScheduler`] spawns a sleeping task on a tokio runtime.
//! - [`ManualScheduler`] keeps a virtual clock that only moves when
//!   [`ManualScheduler::advance`] is called. It backs the tests and hosts
//!   that already drive their UI from a periodic tick.

use crate::error::{Error, Result};
use parking_lot::Mutex;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::runtime::Handle;

/// Work to run when a timer fires.
pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// Source of time and delayed execution.
pub trait Scheduler: Send + Sync {
    /// Current time as seen by this scheduler.
    fn now(&self) -> Instant;

    /// Runs `task` no earlier than `delay` from now.
    ///
    /// Implementations must never run the task before returning.
    fn schedule(&self, delay: Duration, task: Task) -> TimerHandle;
}

/// Handle to a pending timer. Cancelling an already-fired timer is a no-op.
#[derive(Debug, Clone, Default)]
pub struct TimerHandle {
    cancelled: Arc<AtomicBool>,
}

impl TimerHandle {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

/// Timers backed by a tokio runtime.
#[derive(Debug, Clone)]
pub struct TokioScheduler {
    runtime: Handle,
}

impl TokioScheduler {
    #[must_use]
    pub fn new(runtime: Handle) -> Self {
        Self { runtime }
    }

    /// Attaches to the runtime the caller is running in.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Scheduler`] when called outside a tokio runtime.
    pub fn current() -> Result<Self> {
        Handle::try_current()
            .map(Self::new)
            .map_err(|err| Error::Scheduler(err.to_string()))
    }
}

impl Scheduler for TokioScheduler {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn schedule(&self, delay: Duration, task: Task) -> TimerHandle {
        let handle = TimerHandle::new();
        let guard = handle.clone();
        // Cancelled timers still sleep out their delay; the flag keeps them inert.
        self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            if !guard.is_cancelled() {
                task();
            }
        });
        handle
    }
}

struct PendingTimer {
    due: Duration,
    seq: u64,
    handle: TimerHandle,
    task: Task,
}

struct VirtualClock {
    elapsed: Duration,
    next_seq: u64,
    pending: Vec<PendingTimer>,
}

/// Scheduler with a virtual clock advanced explicitly by the caller.
///
/// Due timers run on the thread calling [`advance`](Self::advance), in
/// deadline order (ties broken by scheduling order). Tasks may schedule new
/// timers; those fire within the same call if they fall due before its end.
pub struct ManualScheduler {
    origin: Instant,
    clock: Mutex<VirtualClock>,
}

impl ManualScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    #[must_use]
    pub fn starting_at(origin: Instant) -> Self {
        Self {
            origin,
            clock: Mutex::new(VirtualClock {
                elapsed: Duration::ZERO,
                next_seq: 0,
                pending: Vec::new(),
            }),
        }
    }

    /// Time elapsed on the virtual clock since creation.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.clock.lock().elapsed
    }

    /// Number of timers still waiting to fire.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.clock
            .lock()
            .pending
            .iter()
            .filter(|timer| !timer.handle.is_cancelled())
            .count()
    }

    /// Moves the clock forward by `by`, firing every timer that falls due.
    ///
    /// Returns the number of tasks that ran.
    pub fn advance(&self, by: Duration) -> usize {
        let target = self.clock.lock().elapsed.saturating_add(by);
        self.run_until(target)
    }

    /// Moves the clock to `instant`. Instants in the past leave it unchanged.
    pub fn advance_to(&self, instant: Instant) -> usize {
        self.run_until(instant.saturating_duration_since(self.origin))
    }

    fn run_until(&self, target: Duration) -> usize {
        let mut fired = 0;
        loop {
            let next = {
                let mut clock = self.clock.lock();
                clock.pending.retain(|timer| !timer.handle.is_cancelled());
                let due = clock
                    .pending
                    .iter()
                    .enumerate()
                    .filter(|(_, timer)| timer.due <= target)
                    .min_by_key(|(_, timer)| (timer.due, timer.seq))
                    .map(|(index, _)| index);
                match due {
                    Some(index) => {
                        let timer = clock.pending.swap_remove(index);
                        clock.elapsed = clock.elapsed.max(timer.due);
                        Some(timer)
                    }
                    None => {
                        clock.elapsed = clock.elapsed.max(target);
                        None
                    }
                }
            };

            let Some(timer) = next else { break };
            (timer.task)();
            fired += 1;
        }
        fired
    }
}

impl Default for ManualScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ManualScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManualScheduler")
            .field("elapsed", &self.elapsed())
            .field("pending", &self.pending())
            .finish()
    }
}

impl Scheduler for ManualScheduler {
    fn now(&self) -> Instant {
        self.origin + self.clock.lock().elapsed
    }

    fn schedule(&self, delay: Duration, task: Task) -> TimerHandle {
        let handle = TimerHandle::new();
        let mut clock = self.clock.lock();
        clock.pending.retain(|timer| !timer.handle.is_cancelled());
        let seq = clock.next_seq;
        clock.next_seq += 1;
        let due = clock.elapsed.saturating_add(delay);
        clock.pending.push(PendingTimer {
            due,
            seq,
            handle: handle.clone(),
            task,
        });
        handle
    }
}
