//! Input commands and the event loop's message type

use std::str::FromStr;
use stopwatch_core::{Action, TimerHandle};

/// Everything the main loop reacts to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// A parsed line from stdin
    Command(Command),
    /// A line that did not parse
    Unrecognized(String),
    /// A timer fired
    Tick(TimerHandle),
    /// A timer could not be started and will never fire
    TimerFailed { handle: TimerHandle, reason: String },
    /// stdin closed
    InputClosed,
}

/// A user command typed at the terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Stopwatch(Action),
    Help,
    Quit,
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown command: {0:?} (type 'h' for help)")]
pub struct UnknownCommand(pub String);

impl FromStr for Command {
    type Err = UnknownCommand;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let command = match line.trim().to_ascii_lowercase().as_str() {
            "" | "s" | "start" | "t" | "toggle" => Command::Stopwatch(Action::Toggle),
            "p" | "pause" => Command::Stopwatch(Action::Pause),
            "c" | "continue" => Command::Stopwatch(Action::Continue),
            "m" | "mark" | "lap" => Command::Stopwatch(Action::Mark),
            "r" | "reset" => Command::Stopwatch(Action::Reset),
            "h" | "help" | "?" => Command::Help,
            "q" | "quit" | "exit" => Command::Quit,
            _ => return Err(UnknownCommand(line.trim().to_string())),
        };
        Ok(command)
    }
}

impl AppEvent {
    /// Turn a raw input line into an event
    pub fn from_line(line: &str) -> Self {
        match line.parse::<Command>() {
            Ok(command) => AppEvent::Command(command),
            Err(UnknownCommand(text)) => AppEvent::Unrecognized(text),
        }
    }
}

pub const HELP: &str = "\
Commands:
  <enter>, s   start / pause / continue
  p            pause
  c            continue
  m            mark the current time
  r            reset
  h            this help
  q            quit";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!("".parse::<Command>().unwrap(), Command::Stopwatch(Action::Toggle));
        assert_eq!(" S \n".parse::<Command>().unwrap(), Command::Stopwatch(Action::Toggle));
        assert_eq!("mark".parse::<Command>().unwrap(), Command::Stopwatch(Action::Mark));
        assert_eq!("r".parse::<Command>().unwrap(), Command::Stopwatch(Action::Reset));
        assert_eq!("continue".parse::<Command>().unwrap(), Command::Stopwatch(Action::Continue));
        assert_eq!("q".parse::<Command>().unwrap(), Command::Quit);
    }

    #[test]
    fn test_unknown_line() {
        assert_eq!(
            AppEvent::from_line("dance\n"),
            AppEvent::Unrecognized("dance".to_string())
        );
        assert_eq!(
            AppEvent::from_line("h"),
            AppEvent::Command(Command::Help)
        );
    }
}
