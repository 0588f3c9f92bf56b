//! Activity feed.
//!
//! The feed is a bounded queue of [`ActivityEntry`] values, newest first. The
//! terminal list is a pure rendering of this queue. Pushing past
//! [`FEED_CAPACITY`] discards the oldest entries.

use std::collections::VecDeque;
use std::fmt;

use rand::seq::IndexedRandom;
use rand::Rng;

/// Maximum number of entries kept in the feed.
pub const FEED_CAPACITY: usize = 6;

/// Canned messages for synthetic activity.
pub const ACTIVITY_MESSAGES: [&str; 7] = [
    "Cache optimized automatically",
    "Backup completed successfully",
    "New user connected",
    "Performance improved",
    "Monitoring system active",
    "Data synchronized",
    "Security scan complete",
];

/// Kind of activity entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityKind {
    Success,
    Info,
    Warning,
}

impl ActivityKind {
    pub const ALL: [ActivityKind; 3] = [
        ActivityKind::Success,
        ActivityKind::Info,
        ActivityKind::Warning,
    ];

    pub fn icon(&self) -> &'static str {
        match self {
            ActivityKind::Success => "✓",
            ActivityKind::Info => "ℹ",
            ActivityKind::Warning => "⚠",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityKind::Success => "success",
            ActivityKind::Info => "info",
            ActivityKind::Warning => "warning",
        }
    }
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unique identifier of a feed entry within a session.
pub type EntryId = u64;

/// A single feed line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityEntry {
    pub id: EntryId,
    /// Wall-clock time as `HH:MM`.
    pub time: String,
    pub kind: ActivityKind,
    pub message: String,
    /// False until the slide-in completes.
    pub revealed: bool,
}

impl ActivityEntry {
    pub fn icon(&self) -> &'static str {
        self.kind.icon()
    }
}

/// Bounded, newest-first activity queue.
#[derive(Debug, Clone)]
pub struct ActivityFeed {
    entries: VecDeque<ActivityEntry>,
    capacity: usize,
    next_id: EntryId,
}

impl ActivityFeed {
    pub fn new() -> Self {
        Self::with_capacity(FEED_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity + 1),
            capacity,
            next_id: 1,
        }
    }

    /// Insert a new, unrevealed entry at the head and trim the tail.
    ///
    /// Returns the new entry's id.
    pub fn push(
        &mut self,
        time: impl Into<String>,
        kind: ActivityKind,
        message: impl Into<String>,
    ) -> EntryId {
        let id = self.next_id;
        self.next_id += 1;

        self.entries.push_front(ActivityEntry {
            id,
            time: time.into(),
            kind,
            message: message.into(),
            revealed: false,
        });
        self.entries.truncate(self.capacity);
        id
    }

    /// Push a random canned message with a random kind.
    pub fn push_random<R: Rng + ?Sized>(&mut self, rng: &mut R, time: impl Into<String>) -> EntryId {
        let message = ACTIVITY_MESSAGES
            .choose(rng)
            .copied()
            .unwrap_or(ACTIVITY_MESSAGES[0]);
        let kind = ActivityKind::ALL
            .choose(rng)
            .copied()
            .unwrap_or(ActivityKind::Info);
        self.push(time, kind, message)
    }

    /// Mark an entry as revealed. Entries already trimmed are ignored.
    pub fn reveal(&mut self, id: EntryId) -> bool {
        match self.entries.iter_mut().find(|e| e.id == id) {
            Some(entry) => {
                entry.revealed = true;
                true
            }
            None => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActivityEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for ActivityFeed {
    fn default() -> Self {
        Self::new()
    }
}

/// Format a wall-clock time as zero-padded `HH:MM`.
pub fn clock_label<T: chrono::Timelike>(time: &T) -> String {
    format!("{:02}:{:02}", time.hour(), time.minute())
}
