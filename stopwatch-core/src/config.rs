//! Stopwatch configuration types
//!
//! Only the knobs the state machine itself needs live here. Front-end concerns
//! (export paths, verbosity) belong to the application layer.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::types::StopwatchError;

/// How `mark` behaves before the stopwatch has been started
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdleMarkPolicy {
    /// Silently do nothing
    #[default]
    Ignore,
    /// Record a mark capturing the current (zero) elapsed time
    Allow,
    /// Return `StopwatchError::MarkWhileIdle`
    Reject,
}

impl fmt::Display for IdleMarkPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdleMarkPolicy::Ignore => write!(f, "ignore"),
            IdleMarkPolicy::Allow => write!(f, "allow"),
            IdleMarkPolicy::Reject => write!(f, "reject"),
        }
    }
}

impl FromStr for IdleMarkPolicy {
    type Err = StopwatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ignore" => Ok(IdleMarkPolicy::Ignore),
            "allow" => Ok(IdleMarkPolicy::Allow),
            "reject" => Ok(IdleMarkPolicy::Reject),
            other => Err(StopwatchError::InvalidConfig(format!(
                "unknown idle mark policy {:?} (expected ignore, allow or reject)",
                other
            ))),
        }
    }
}

/// Configuration for a [`Controller`](crate::Controller)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StopwatchConfig {
    /// What `mark` does while idle
    #[serde(default)]
    pub idle_marks: IdleMarkPolicy,

    /// Prefix used when rendering mark lines (default: "Mark")
    #[serde(default = "default_mark_label")]
    pub mark_label: String,
}

fn default_mark_label() -> String {
    "Mark".to_string()
}

impl Default for StopwatchConfig {
    fn default() -> Self {
        Self {
            idle_marks: IdleMarkPolicy::default(),
            mark_label: default_mark_label(),
        }
    }
}

impl StopwatchConfig {
    /// Create a configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the idle mark policy
    pub fn with_idle_marks(mut self, policy: IdleMarkPolicy) -> Self {
        self.idle_marks = policy;
        self
    }

    /// Builder method: set the mark label
    pub fn with_mark_label(mut self, label: impl Into<String>) -> Self {
        self.mark_label = label.into();
        self
    }

    /// Check the configuration for values the controller cannot use
    pub fn validate(&self) -> crate::Result<()> {
        if self.mark_label.trim().is_empty() {
            return Err(StopwatchError::InvalidConfig(
                "mark_label must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
