//! Append-only record of completed polls.

use super::entity::Poll;

#[derive(Debug, Clone, Default)]
pub struct PollHistory {
    entries: Vec<Poll>,
}

impl PollHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a snapshot of an ended poll.
    ///
    /// The snapshot is an owned copy; the entry never changes afterwards.
    pub fn append(&mut self, snapshot: Poll) {
        debug_assert!(!snapshot.is_active, "only ended polls enter history");
        self.entries.push(snapshot);
    }

    /// Entries ordered by completion time, oldest first
    pub fn all(&self) -> &[Poll] {
        &self.entries
    }
}
