use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How a log line should be styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Success,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub text: String,
    pub severity: Severity,
}

impl LogEntry {
    /// `[HH:MM:SS] text`
    pub fn display_line(&self) -> String {
        format!("[{}] {}", self.timestamp.format("%H:%M:%S"), self.text)
    }
}

/// Append-only record of what the controller did.
///
/// Nothing in the model reads it back to make decisions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActivityLog {
    entries: Vec<LogEntry>,
}

impl ActivityLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(
        &mut self,
        timestamp: DateTime<Utc>,
        text: impl Into<String>,
        severity: Severity,
    ) -> &LogEntry {
        self.entries.push(LogEntry {
            timestamp,
            text: text.into(),
            severity,
        });
        &self.entries[self.entries.len() - 1]
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// The last `n` entries, oldest first.
    pub fn recent(&self, n: usize) -> &[LogEntry] {
        let start = self.entries.len().saturating_sub(n);
        &self.entries[start..]
    }

    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
