//! In-memory activity feed.

use chrono::Local;
use std::fmt;

/// A single timestamped feed entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityEntry {
    /// Local wall-clock time the event happened
    pub timestamp: String,
    pub message: String,
}

impl fmt::Display for ActivityEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.timestamp, self.message)
    }
}

/// Append-only feed of human-readable events.
///
/// Lives for the process lifetime only; nothing here is persisted. The
/// store's mutating operations are the sole producers.
#[derive(Debug, Default)]
pub struct ActivityLog {
    entries: Vec<ActivityEntry>,
}

impl ActivityLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry stamped with the local clock.
    pub fn record(&mut self, message: impl Into<String>) {
        self.entries.push(ActivityEntry {
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            message: message.into(),
        });
    }

    /// Entries, most recent first.
    pub fn recent(&self) -> impl Iterator<Item = &ActivityEntry> {
        self.entries.iter().rev()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
