//! Session summary and JSON export

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use stopwatch_core::{clock, ElapsedTime, Mark, RunState};

/// Snapshot of a stopwatch session at quit time
#[derive(Debug, Clone, Serialize)]
pub struct SessionReport {
    pub exported_at: DateTime<Utc>,
    pub state: RunState,
    pub elapsed: String,
    pub elapsed_hundredths: u64,
    pub marks: Vec<MarkEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MarkEntry {
    pub sequence: usize,
    pub time: String,
    pub hundredths: u64,
}

impl SessionReport {
    pub fn new(state: RunState, elapsed: ElapsedTime, marks: &[Mark]) -> Self {
        Self {
            exported_at: Utc::now(),
            state,
            elapsed: clock::format(elapsed),
            elapsed_hundredths: elapsed.hundredths(),
            marks: marks
                .iter()
                .map(|mark| MarkEntry {
                    sequence: mark.sequence,
                    time: clock::format(mark.captured),
                    hundredths: mark.captured.hundredths(),
                })
                .collect(),
        }
    }

    /// Plain-text summary for the terminal
    pub fn summary(&self, mark_label: &str) -> String {
        let mut text = format!("Final time: {} ({})\n", self.elapsed, self.state);
        if self.marks.is_empty() {
            text.push_str("No marks recorded\n");
        }
        for mark in &self.marks {
            text.push_str(&format!("  {} {}: {}\n", mark_label, mark.sequence, mark.time));
        }
        text
    }

    /// Write the report as pretty-printed JSON
    pub fn export(&self, path: &Path) -> Result<()> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create export file: {:?}", path))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)
            .with_context(|| format!("Failed to write session report: {:?}", path))?;
        writer.flush()?;

        log::info!("Session exported to {:?}", path);
        Ok(())
    }
}
