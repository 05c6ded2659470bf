//! Terminal display sink
//!
//! The elapsed time lives on one line that is rewritten in place. Mark lines
//! are appended below it as they appear.

use std::io::{self, Write};
use stopwatch_core::{DisplaySink, RunState};

pub struct TerminalDisplay<W: Write> {
    out: W,
    time: String,
    state: RunState,
    /// Mark lines already written to the terminal
    printed: Vec<String>,
}

impl TerminalDisplay<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalDisplay<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            time: String::new(),
            state: RunState::Idle,
            printed: Vec::new(),
        }
    }

    /// Print a message on its own line, then redraw the time line
    pub fn message(&mut self, text: &str) {
        let result = writeln!(self.out, "\r{}", text).and_then(|_| self.redraw());
        self.report(result);
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn redraw(&mut self) -> io::Result<()> {
        write!(
            self.out,
            "\r{}  {:<8} (enter: {})  ",
            self.time,
            self.state.to_string().to_lowercase(),
            self.state.toggle_label()
        )?;
        self.out.flush()
    }

    fn report(&self, result: io::Result<()>) {
        if let Err(e) = result {
            log::warn!("Failed to write to terminal: {}", e);
        }
    }
}

impl<W: Write> DisplaySink for TerminalDisplay<W> {
    fn show_time(&mut self, text: &str) {
        self.time.clear();
        self.time.push_str(text);
        let result = self.redraw();
        self.report(result);
    }

    fn show_marks(&mut self, lines: &[String]) {
        // Only append when the terminal already shows a prefix of the log.
        let start = if lines.starts_with(&self.printed) {
            self.printed.len()
        } else {
            0
        };
        let result = lines[start..]
            .iter()
            .try_for_each(|line| writeln!(self.out, "\r{}", line))
            .and_then(|_| self.redraw());
        self.report(result);
        self.printed = lines.to_vec();
    }

    fn clear_marks(&mut self) {
        if !self.printed.is_empty() {
            self.printed.clear();
            let result = writeln!(self.out, "\r-- marks cleared --").and_then(|_| self.redraw());
            self.report(result);
        }
    }

    fn show_state(&mut self, state: RunState) {
        self.state = state;
        let result = self.redraw();
        self.report(result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(display: TerminalDisplay<Vec<u8>>) -> String {
        String::from_utf8(display.into_inner()).unwrap()
    }

    #[test]
    fn test_time_line_is_rewritten() {
        let mut display = TerminalDisplay::new(Vec::new());
        display.show_time("00:00:00:01");
        display.show_time("00:00:00:02");

        let text = output(display);
        assert_eq!(text.matches('\r').count(), 2);
        assert!(text.ends_with("00:00:00:02  idle     (enter: start)  "));
    }

    #[test]
    fn test_marks_are_appended_once() {
        let mut display = TerminalDisplay::new(Vec::new());
        let first = vec!["Mark 1: 00:00:01:00".to_string()];
        let both = vec![first[0].clone(), "Mark 2: 00:00:02:00".to_string()];
        display.show_marks(&first);
        display.show_marks(&both);

        let text = output(display);
        assert_eq!(text.matches("Mark 1").count(), 1);
        assert_eq!(text.matches("Mark 2").count(), 1);
    }

    #[test]
    fn test_clear_then_new_log_starts_over() {
        let mut display = TerminalDisplay::new(Vec::new());
        display.show_marks(&["Mark 1: 00:00:01:00".to_string()]);
        display.clear_marks();
        display.show_marks(&["Mark 1: 00:00:00:05".to_string()]);

        let text = output(display);
        assert!(text.contains("-- marks cleared --"));
        assert!(text.contains("Mark 1: 00:00:00:05"));
    }

    #[test]
    fn test_state_shows_next_action() {
        let mut display = TerminalDisplay::new(Vec::new());
        display.show_state(RunState::Running);
        assert!(output(display).contains("running  (enter: pause)"));
    }
}
