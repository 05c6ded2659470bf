//! Thread-backed repeating timers
//!
//! Each armed handle gets its own thread that sends `AppEvent::Tick` into the
//! main loop's channel. The controller never leaves the main thread.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use stopwatch_core::{Scheduler, TimerHandle};

use crate::events::AppEvent;

pub struct ThreadScheduler {
    events: Sender<AppEvent>,
    next_id: u64,
    running: HashMap<TimerHandle, Arc<AtomicBool>>,
}

impl ThreadScheduler {
    pub fn new(events: Sender<AppEvent>) -> Self {
        Self {
            events,
            next_id: 0,
            running: HashMap::new(),
        }
    }
}

impl ThreadScheduler {
    /// Forget a handle whose timer could not be started and tell the main loop
    fn abandon(&mut self, handle: TimerHandle, reason: String) {
        log::error!("Failed to start timer thread for {}: {}", handle, reason);
        self.running.remove(&handle);
        let _ = self.events.send(AppEvent::TimerFailed { handle, reason });
    }
}

impl Scheduler for ThreadScheduler {
    fn schedule_repeating(&mut self, interval: Duration) -> TimerHandle {
        self.next_id += 1;
        let handle = TimerHandle::new(self.next_id);
        let cancelled = Arc::new(AtomicBool::new(false));
        self.running.insert(handle, Arc::clone(&cancelled));

        let events = self.events.clone();
        let spawned = thread::Builder::new()
            .name(format!("stopwatch-{}", handle))
            .spawn(move || run_timer(handle, interval, cancelled, events));
        match spawned {
            Ok(_) => log::debug!("Scheduled {} every {:?}", handle, interval),
            Err(e) => self.abandon(handle, e.to_string()),
        }
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        if let Some(flag) = self.running.remove(&handle) {
            flag.store(true, Ordering::SeqCst);
            log::debug!("Cancelled {}", handle);
        }
    }
}

impl Drop for ThreadScheduler {
    fn drop(&mut self) {
        for flag in self.running.values() {
            flag.store(true, Ordering::SeqCst);
        }
    }
}

/// Fire `handle` every `interval` until cancelled or the receiver is gone
///
/// Deadlines advance from the start instant rather than from each wake-up, so
/// oversleeping on one tick is made up on the next.
fn run_timer(
    handle: TimerHandle,
    interval: Duration,
    cancelled: Arc<AtomicBool>,
    events: Sender<AppEvent>,
) {
    let mut deadline = Instant::now() + interval;
    loop {
        let now = Instant::now();
        if deadline > now {
            thread::sleep(deadline - now);
        }
        if cancelled.load(Ordering::SeqCst) {
            break;
        }
        if events.send(AppEvent::Tick(handle)).is_err() {
            break;
        }
        deadline += interval;
    }
    log::trace!("Timer thread for {} exiting", handle);
}
