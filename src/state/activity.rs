//! Append-only audit log of favorite-list changes.

use std::time::SystemTime;

/// What happened to the favorites list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityKind {
    FavoriteAdded(i64),
    FavoriteRemoved(i64),
}

/// Log entry for a single favorites mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityEntry {
    /// When the mutation occurred.
    pub timestamp: SystemTime,
    pub kind: ActivityKind,
}

impl ActivityEntry {
    /// Create an entry stamped with the current time.
    pub fn now(kind: ActivityKind) -> Self {
        Self {
            timestamp: SystemTime::now(),
            kind,
        }
    }
}

/// Chronological record of favorites mutations.
///
/// There is no removal API: deleting a favorite never deletes its history.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActivityLog {
    entries: Vec<ActivityEntry>,
}

impl ActivityLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, entry: ActivityEntry) {
        self.entries.push(entry);
    }

    /// Entries in the order they were appended.
    pub fn entries(&self) -> &[ActivityEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&ActivityEntry> {
        self.entries.last()
    }
}
