//! Stopwatch state machine
//!
//! The [`Controller`] owns the elapsed-time counter, the mark log and the run
//! state. It arms at most one repeating timer at a time through its
//! [`Scheduler`] and pushes every visible change to its [`DisplaySink`].
//!
//! # Example
//!
//! ```
//! use stopwatch_core::{Controller, ManualScheduler, RecordingDisplay, RunState};
//!
//! let mut stopwatch = Controller::new(ManualScheduler::new(), RecordingDisplay::new());
//! stopwatch.toggle();
//! let timer = stopwatch.active_timer().unwrap();
//! for _ in 0..150 {
//!     stopwatch.on_tick(timer);
//! }
//! stopwatch.toggle();
//!
//! assert_eq!(stopwatch.run_state(), RunState::Paused);
//! assert_eq!(stopwatch.display().time, "00:00:01:50");
//! ```

use crate::clock;
use crate::config::{IdleMarkPolicy, StopwatchConfig};
use crate::display::DisplaySink;
use crate::scheduler::{Scheduler, TimerHandle};
use crate::types::{Action, ElapsedTime, Mark, Result, RunState, StopwatchError, TICK_INTERVAL};

/// A single stopwatch instance
pub struct Controller<S, D> {
    config: StopwatchConfig,
    scheduler: S,
    display: D,
    elapsed: ElapsedTime,
    marks: Vec<Mark>,
    state: RunState,
    /// The only timer whose ticks are honored
    active: Option<TimerHandle>,
}

impl<S: Scheduler, D: DisplaySink> Controller<S, D> {
    /// Create an idle stopwatch with default configuration
    pub fn new(scheduler: S, display: D) -> Self {
        Self::with_config(StopwatchConfig::default(), scheduler, display)
    }

    /// Create an idle stopwatch with the given configuration
    pub fn with_config(config: StopwatchConfig, scheduler: S, display: D) -> Self {
        Self {
            config,
            scheduler,
            display,
            elapsed: ElapsedTime::ZERO,
            marks: Vec::new(),
            state: RunState::Idle,
            active: None,
        }
    }

    /// Dispatch a user action
    ///
    /// Only `Action::Mark` can fail, and only under [`IdleMarkPolicy::Reject`].
    pub fn apply(&mut self, action: Action) -> Result<()> {
        log::trace!("Action {:?} in state {}", action, self.state);
        match action {
            Action::Start => self.start(),
            Action::Pause => self.pause(),
            Action::Continue => self.resume(),
            Action::Toggle => self.toggle(),
            Action::Mark => {
                self.mark()?;
            }
            Action::Reset => self.reset(),
        }
        Ok(())
    }

    /// Combined start-or-continue / pause control
    pub fn toggle(&mut self) {
        match self.state {
            RunState::Idle => self.start(),
            RunState::Running => self.pause(),
            RunState::Paused => self.resume(),
        }
    }

    /// Begin ticking
    ///
    /// From `Paused` this behaves like [`resume`](Self::resume). While already
    /// running the timer is re-armed, never duplicated.
    pub fn start(&mut self) {
        if self.state == RunState::Running {
            log::debug!("Start while running, re-arming timer");
        }
        self.arm();
        self.set_state(RunState::Running);
    }

    /// Stop ticking and freeze elapsed time
    pub fn pause(&mut self) {
        if self.state != RunState::Running {
            log::trace!("Pause ignored in state {}", self.state);
            return;
        }
        self.disarm();
        self.set_state(RunState::Paused);
    }

    /// Resume ticking from the frozen value
    pub fn resume(&mut self) {
        if self.state != RunState::Paused {
            log::trace!("Continue ignored in state {}", self.state);
            return;
        }
        self.arm();
        self.set_state(RunState::Running);
    }

    /// Record the current elapsed time in the mark log
    ///
    /// Returns the new mark, or `None` when an idle mark was ignored.
    pub fn mark(&mut self) -> Result<Option<Mark>> {
        if self.state == RunState::Idle {
            match self.config.idle_marks {
                IdleMarkPolicy::Ignore => {
                    log::debug!("Mark ignored while idle");
                    return Ok(None);
                }
                IdleMarkPolicy::Reject => {
                    log::warn!("Mark rejected while idle");
                    return Err(StopwatchError::MarkWhileIdle);
                }
                IdleMarkPolicy::Allow => {}
            }
        }

        let mark = Mark {
            sequence: self.marks.len() + 1,
            captured: self.elapsed,
        };
        self.marks.push(mark);
        log::debug!("Recorded mark {} at {}", mark.sequence, mark.captured);

        let lines = self.mark_lines();
        self.display.show_marks(&lines);
        Ok(Some(mark))
    }

    /// Return to the initial state
    pub fn reset(&mut self) {
        self.disarm();
        self.elapsed = ElapsedTime::ZERO;
        self.marks.clear();
        self.display.show_time(&clock::format(self.elapsed));
        self.display.clear_marks();
        self.set_state(RunState::Idle);
        log::debug!("Stopwatch reset");
    }

    /// Tick callback for the timer identified by `handle`
    ///
    /// Returns `true` if the tick advanced elapsed time. Ticks from a cancelled
    /// timer, or arriving while not running, are dropped.
    pub fn on_tick(&mut self, handle: TimerHandle) -> bool {
        if self.active != Some(handle) || self.state != RunState::Running {
            log::trace!("Dropping stale tick from {}", handle);
            return false;
        }
        self.elapsed = clock::tick(self.elapsed);
        self.display.show_time(&clock::format(self.elapsed));
        true
    }

    /// Push the complete current state to the display
    pub fn refresh(&mut self) {
        self.display.show_time(&clock::format(self.elapsed));
        if self.marks.is_empty() {
            self.display.clear_marks();
        } else {
            let lines = self.mark_lines();
            self.display.show_marks(&lines);
        }
        self.display.show_state(self.state);
    }

    /// Rendered mark log, oldest first
    pub fn mark_lines(&self) -> Vec<String> {
        self.marks
            .iter()
            .map(|mark| mark.render(&self.config.mark_label))
            .collect()
    }

    pub fn elapsed(&self) -> ElapsedTime {
        self.elapsed
    }

    pub fn run_state(&self) -> RunState {
        self.state
    }

    pub fn marks(&self) -> &[Mark] {
        &self.marks
    }

    /// Handle of the currently armed timer, if running
    pub fn active_timer(&self) -> Option<TimerHandle> {
        self.active
    }

    pub fn config(&self) -> &StopwatchConfig {
        &self.config
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Give back the collaborators, cancelling any armed timer first
    pub fn into_parts(mut self) -> (S, D) {
        self.disarm();
        (self.scheduler, self.display)
    }

    fn arm(&mut self) {
        // Cancel before scheduling: two live timers would double the tick rate.
        self.disarm();
        let handle = self.scheduler.schedule_repeating(TICK_INTERVAL);
        log::trace!("Armed {}", handle);
        self.active = Some(handle);
    }

    fn disarm(&mut self) {
        if let Some(handle) = self.active.take() {
            self.scheduler.cancel(handle);
            log::trace!("Cancelled {}", handle);
        }
    }

    fn set_state(&mut self, state: RunState) {
        if self.state != state {
            log::debug!("State {} -> {} at {}", self.state, state, self.elapsed);
            self.state = state;
        }
        self.display.show_state(state);
    }
}
