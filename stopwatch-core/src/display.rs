//! Display sink capability
//!
//! The controller pushes already-formatted text; sinks decide how to show it.

use crate::clock;
use crate::types::{ElapsedTime, RunState};

/// Receiver of everything the stopwatch wants shown
pub trait DisplaySink {
    /// Show the current elapsed time (`HH:MM:SS:CC`)
    fn show_time(&mut self, text: &str);

    /// Show the complete mark log, one rendered line per mark, oldest first
    fn show_marks(&mut self, lines: &[String]);

    /// Remove all mark lines from the display
    fn clear_marks(&mut self);

    /// The run state changed
    fn show_state(&mut self, _state: RunState) {}
}

impl<D: DisplaySink + ?Sized> DisplaySink for Box<D> {
    fn show_time(&mut self, text: &str) {
        (**self).show_time(text)
    }

    fn show_marks(&mut self, lines: &[String]) {
        (**self).show_marks(lines)
    }

    fn clear_marks(&mut self) {
        (**self).clear_marks()
    }

    fn show_state(&mut self, state: RunState) {
        (**self).show_state(state)
    }
}

/// Display sink that keeps the last pushed values in memory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordingDisplay {
    /// Last time text shown
    pub time: String,
    /// Mark lines currently shown
    pub marks: Vec<String>,
    /// Last state shown
    pub state: RunState,
    /// Number of `show_time` calls
    pub time_updates: usize,
}

impl Default for RecordingDisplay {
    /// Starts out showing zero, like a freshly reset stopwatch
    fn default() -> Self {
        Self {
            time: clock::format(ElapsedTime::ZERO),
            marks: Vec::new(),
            state: RunState::Idle,
            time_updates: 0,
        }
    }
}

impl RecordingDisplay {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DisplaySink for RecordingDisplay {
    fn show_time(&mut self, text: &str) {
        self.time = text.to_string();
        self.time_updates += 1;
    }

    fn show_marks(&mut self, lines: &[String]) {
        self.marks = lines.to_vec();
    }

    fn clear_marks(&mut self) {
        self.marks.clear();
    }

    fn show_state(&mut self, state: RunState) {
        self.state = state;
    }
}
