//! Repeating timer capability
//!
//! The controller never sleeps or spawns anything itself. It asks a
//! [`Scheduler`] to arm a repeating timer and later receives the resulting
//! ticks through [`Controller::on_tick`](crate::Controller::on_tick), tagged
//! with the handle that produced them.

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

/// Opaque identifier of one armed repeating timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerHandle(u64);

impl TimerHandle {
    /// Create a handle from a scheduler-assigned id
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub const fn id(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TimerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer#{}", self.0)
    }
}

/// Source of periodic ticks
pub trait Scheduler {
    /// Arm a timer firing every `interval` until cancelled
    fn schedule_repeating(&mut self, interval: Duration) -> TimerHandle;

    /// Disarm a timer. Cancelling an unknown or already cancelled handle is a no-op.
    fn cancel(&mut self, handle: TimerHandle);
}

impl<S: Scheduler + ?Sized> Scheduler for Box<S> {
    fn schedule_repeating(&mut self, interval: Duration) -> TimerHandle {
        (**self).schedule_repeating(interval)
    }

    fn cancel(&mut self, handle: TimerHandle) {
        (**self).cancel(handle)
    }
}

/// Deterministic scheduler that never fires on its own
///
/// Tests (and embedders that own their own clock) arm timers through it and
/// deliver ticks by hand. It keeps every armed handle until cancelled, so a
/// controller that forgot to cancel would show up as two active timers.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: u64,
    active: BTreeMap<TimerHandle, Duration>,
    scheduled_total: usize,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handles currently armed, oldest first
    pub fn active_handles(&self) -> Vec<TimerHandle> {
        self.active.keys().copied().collect()
    }

    /// Interval a handle was armed with
    pub fn interval(&self, handle: TimerHandle) -> Option<Duration> {
        self.active.get(&handle).copied()
    }

    pub fn is_active(&self, handle: TimerHandle) -> bool {
        self.active.contains_key(&handle)
    }

    /// Number of timers ever armed
    pub fn scheduled_total(&self) -> usize {
        self.scheduled_total
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_repeating(&mut self, interval: Duration) -> TimerHandle {
        self.next_id += 1;
        let handle = TimerHandle::new(self.next_id);
        self.active.insert(handle, interval);
        self.scheduled_total += 1;
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.active.remove(&handle);
    }
}
