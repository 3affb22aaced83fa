//! One-shot timers for driving runs
//!
//! The event loop owns the clock. The controller asks for a timer, remembers
//! the handle, and is told when that handle fires; stopping a run cancels the
//! pending handle outright.

use std::collections::BTreeMap;
use std::time::Duration;

/// Identifies one scheduled timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(pub u64);

/// Source of one-shot timers
pub trait Scheduler {
    /// Arrange for `handle` to be delivered once `delay` has elapsed
    fn schedule_after(&mut self, delay: Duration) -> TimerHandle;
    /// Drop a pending timer. Unknown or already-fired handles are ignored.
    fn cancel(&mut self, handle: TimerHandle);
}

/// Deterministic scheduler on a virtual clock.
///
/// Nothing fires by itself: the owner advances the clock and forwards the
/// due handles to the controller. Used by the headless binary and tests.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    now: Duration,
    next_id: u64,
    /// Keyed by (due time, id) so equal deadlines fire in scheduling order
    pending: BTreeMap<(Duration, u64), TimerHandle>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Due time of the earliest pending timer
    pub fn next_due(&self) -> Option<Duration> {
        self.pending.keys().next().map(|(due, _)| *due)
    }

    /// Jump to the earliest pending timer and return it
    pub fn pop_next(&mut self) -> Option<TimerHandle> {
        let ((due, _), handle) = self.pending.pop_first()?;
        self.now = self.now.max(due);
        Some(handle)
    }

    /// Move the clock forward and return every timer that became due
    pub fn advance(&mut self, by: Duration) -> Vec<TimerHandle> {
        self.now += by;
        let mut fired = Vec::new();
        while let Some(&(due, id)) = self.pending.keys().next() {
            if due > self.now {
                break;
            }
            if let Some(handle) = self.pending.remove(&(due, id)) {
                fired.push(handle);
            }
        }
        fired
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_after(&mut self, delay: Duration) -> TimerHandle {
        self.next_id += 1;
        let handle = TimerHandle(self.next_id);
        self.pending.insert((self.now + delay, handle.0), handle);
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.pending.retain(|_, h| *h != handle);
    }
}
