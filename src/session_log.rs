//! Append-only session log for a collection run.
//!
//! Every entry is written as `<local timestamp> - <message>`. The file is
//! opened, appended and closed on each call so that nothing already
//! recorded is lost if the process dies mid-run.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;

use crate::constants::LOG_TIMESTAMP_FORMAT;

/// Session log bound to one file on disk.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionLog {
    path: PathBuf,
}

impl SessionLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Record a message and echo it to the console.
    pub fn info(&self, message: &str) -> Result<()> {
        let line = self.record(message)?;
        println!("{}", line);
        Ok(())
    }

    /// Record a message to the file only.
    pub fn error(&self, message: &str) -> Result<()> {
        self.record(message).map(|_| ())
    }

    /// Append timestamped lines and return them without the final newline.
    ///
    /// Each line of a multi-line message gets its own timestamp prefix.
    pub fn record(&self, message: &str) -> Result<String> {
        let line = format_entry(&Local::now().format(LOG_TIMESTAMP_FORMAT).to_string(), message);

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open session log {}", self.path.display()))?;

        writeln!(file, "{}", line)
            .with_context(|| format!("Failed to write session log {}", self.path.display()))?;

        Ok(line)
    }
}

fn format_line(timestamp: &str, message: &str) -> String {
    format!("{} - {}", timestamp, message)
}

fn format_entry(timestamp: &str, message: &str) -> String {
    let lines: Vec<String> = message
        .lines()
        .map(|line| format_line(timestamp, line))
        .collect();

    if lines.is_empty() {
        format_line(timestamp, "")
    } else {
        lines.join("\n")
    }
}

/// Split a session log line into its timestamp and message.
pub fn parse_line(line: &str) -> Option<(chrono::NaiveDateTime, &str)> {
    let (stamp, message) = line.split_once(" - ")?;
    let stamp = chrono::NaiveDateTime::parse_from_str(stamp, LOG_TIMESTAMP_FORMAT).ok()?;
    Some((stamp, message))
}
