//! Audit logging for handled requests.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

use crate::input::Request;
use crate::outcome::Outcome;

/// An audit log entry.
#[derive(Debug, Serialize)]
pub struct AuditEntry {
    /// Timestamp of the event.
    pub timestamp: DateTime<Utc>,
    /// Requested action (`parse` or `route`).
    pub action: String,
    /// Outcome label (`items`, `help`, `route`, `error`).
    pub outcome: String,
    /// Error class if the arguments were rejected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Resolved command path for routed requests.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<String>>,
    /// The arguments, space-joined and truncated.
    pub summary: String,
}

impl AuditEntry {
    /// Create a new audit entry from a request and its outcome.
    pub fn new(request: &Request, outcome: &Outcome) -> Self {
        let error = outcome.failure_info().map(|info| info.kind.clone());
        let path = match outcome {
            Outcome::Routed(route) => Some(route.path.clone()),
            _ => None,
        };

        Self {
            timestamp: Utc::now(),
            action: request.action_name().to_string(),
            outcome: outcome.label().to_string(),
            error,
            path,
            summary: truncate_string(&request.arguments().join(" "), 200),
        }
    }
}

fn truncate_string(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        return s.to_string();
    }
    let mut end = max_len - 3;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &s[..end])
}

/// Audit logger for writing entries to a file.
pub struct AuditLogger {
    file: File,
}

impl AuditLogger {
    /// Open or create an audit log file.
    pub fn open(path: &Path) -> std::io::Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;
        Ok(Self { file })
    }

    /// Write an audit entry to the log.
    pub fn log(&mut self, entry: &AuditEntry) -> std::io::Result<()> {
        let json = serde_json::to_string(entry)?;
        writeln!(self.file, "{}", json)?;
        self.file.flush()
    }

    /// Log the outcome of a request.
    pub fn log_outcome(&mut self, request: &Request, outcome: &Outcome) -> std::io::Result<()> {
        let entry = AuditEntry::new(request, outcome);
        self.log(&entry)
    }
}
