//! Stopwatch Core Library
//!
//! The time-tracking state machine behind a start/pause/continue/mark/reset
//! stopwatch, with no I/O of its own.
//!
//! # Architecture
//!
//! - [`clock`] counts hundredths of a second and formats them as `HH:MM:SS:CC`
//! - [`Controller`] owns the run state, the counter and the mark log
//! - A [`Scheduler`] supplies the repeating 10 ms tick
//! - A [`DisplaySink`] receives formatted time and rendered mark lines
//!
//! Rendering to a screen, reading input and real timers are all left to the
//! application layer (stopwatch-cli).
//!
//! # Example Usage
//!
//! ```
//! use stopwatch_core::{Action, Controller, ManualScheduler, RecordingDisplay};
//!
//! let mut stopwatch = Controller::new(ManualScheduler::new(), RecordingDisplay::new());
//! stopwatch.apply(Action::Toggle).unwrap();
//!
//! let timer = stopwatch.active_timer().unwrap();
//! for _ in 0..6000 {
//!     stopwatch.on_tick(timer);
//! }
//! stopwatch.apply(Action::Mark).unwrap();
//!
//! assert_eq!(stopwatch.mark_lines(), vec!["Mark 1: 00:01:00:00".to_string()]);
//! ```

// Public modules
pub mod clock;
pub mod config;
pub mod controller;
pub mod display;
pub mod scheduler;
pub mod types;

// Re-export main types for convenience
pub use config::{IdleMarkPolicy, StopwatchConfig};
pub use controller::Controller;
pub use display::{DisplaySink, RecordingDisplay};
pub use scheduler::{ManualScheduler, Scheduler, TimerHandle};
pub use types::{
    Action, ElapsedTime, Mark, Result, RunState, StopwatchError, HUNDREDTHS_PER_SECOND,
    TICK_INTERVAL,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
