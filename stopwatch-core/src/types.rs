//! Core types for the stopwatch library
//!
//! This module defines the values the controller owns and hands out: the
//! elapsed-time counter, recorded marks, the run state and the actions that
//! drive it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Result type for stopwatch operations
pub type Result<T> = std::result::Result<T, StopwatchError>;

/// Number of ticks in one second
pub const HUNDREDTHS_PER_SECOND: u64 = 100;

/// Wall-clock interval between two ticks
pub const TICK_INTERVAL: Duration = Duration::from_millis(10);

/// Elapsed time since the last reset, counted in hundredths of a second
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElapsedTime(u64);

impl ElapsedTime {
    /// The value shown after a reset
    pub const ZERO: ElapsedTime = ElapsedTime(0);

    /// Create an elapsed time from a raw hundredths count
    pub const fn from_hundredths(hundredths: u64) -> Self {
        Self(hundredths)
    }

    /// Raw hundredths count
    pub const fn hundredths(self) -> u64 {
        self.0
    }

    /// Convert to a `Duration`
    pub fn as_duration(self) -> Duration {
        Duration::from_millis(self.0.saturating_mul(1000 / HUNDREDTHS_PER_SECOND))
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl From<u64> for ElapsedTime {
    fn from(hundredths: u64) -> Self {
        Self(hundredths)
    }
}

impl fmt::Display for ElapsedTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::clock::format(*self))
    }
}

/// A recorded snapshot of elapsed time ("lap")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mark {
    /// Position in the mark log, starting at 1
    pub sequence: usize,
    /// Elapsed time at the moment the mark was taken
    pub captured: ElapsedTime,
}

impl Mark {
    /// Render the mark as a display line, e.g. `Mark 3: 00:01:02:50`
    pub fn render(&self, label: &str) -> String {
        format!("{} {}: {}", label, self.sequence, self.captured)
    }
}

/// Whether elapsed time is currently advancing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunState {
    /// Initial and post-reset state
    #[default]
    Idle,
    /// Ticks are being applied
    Running,
    /// Elapsed time is frozen, marks may still be taken
    Paused,
}

impl RunState {
    /// Label of the action the combined start/pause/continue control performs next
    pub fn toggle_label(self) -> &'static str {
        match self {
            RunState::Idle => "start",
            RunState::Running => "pause",
            RunState::Paused => "continue",
        }
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunState::Idle => write!(f, "Idle"),
            RunState::Running => write!(f, "Running"),
            RunState::Paused => write!(f, "Paused"),
        }
    }
}

/// Discrete user actions accepted by the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Start,
    Pause,
    Continue,
    /// Combined start-or-continue / pause control
    Toggle,
    Mark,
    Reset,
}

/// Errors that can occur in the stopwatch library
#[derive(Debug, thiserror::Error)]
pub enum StopwatchError {
    #[error("Cannot record a mark while the stopwatch is idle")]
    MarkWhileIdle,

    #[error("Invalid time format: {0:?} (expected HH:MM:SS:CC)")]
    InvalidTimeFormat(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
