//! Completed time entries and the append-only log that holds them.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A committed session that has not been given an id yet.
///
/// Produced by [`TimerSession::commit`](crate::TimerSession::commit) and
/// turned into a [`TimeEntry`] by [`EntryLog::append`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEntry {
    /// Trimmed, non-empty task name.
    pub task: String,
    /// Tracked time in whole seconds.
    pub duration_seconds: u64,
    /// When the save happened.
    pub created_at: DateTime<Utc>,
}

/// An immutable entry in the log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeEntry {
    id: u64,
    task: String,
    duration_seconds: u64,
    created_at: DateTime<Utc>,
}

impl TimeEntry {
    /// Position-derived id, starting at 1.
    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }

    #[must_use]
    pub fn task(&self) -> &str {
        &self.task
    }

    #[must_use]
    pub const fn duration_seconds(&self) -> u64 {
        self.duration_seconds
    }

    /// Capture time of the save action.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Ordered, append-only collection of entries.
///
/// Insertion order is chronological order. Entries are never reordered,
/// edited or removed.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct EntryLog {
    entries: Vec<TimeEntry>,
}

impl EntryLog {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Appends an entry, assigning it `id = len + 1`.
    ///
    /// Ids are derived from the current length, which is only sound because
    /// the log never shrinks. Adding removal would require an independent
    /// counter.
    pub fn append(&mut self, entry: NewEntry) -> &TimeEntry {
        let id = self.entries.len() as u64 + 1;
        tracing::debug!(id, task = %entry.task, duration = entry.duration_seconds, "appending entry");

        self.entries.push(TimeEntry {
            id,
            task: entry.task,
            duration_seconds: entry.duration_seconds,
            created_at: entry.created_at,
        });
        &self.entries[self.entries.len() - 1]
    }

    /// All entries in insertion order.
    #[must_use]
    pub fn all(&self) -> &[TimeEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TimeEntry> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all entry durations.
    #[must_use]
    pub fn total_seconds(&self) -> u64 {
        self.entries.iter().map(|e| e.duration_seconds).sum()
    }
}

impl<'a> IntoIterator for &'a EntryLog {
    type Item = &'a TimeEntry;
    type IntoIter = std::slice::Iter<'a, TimeEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
