use crate::models::{ActionKind, HistoryEntry, UndoOutcome};
use chrono::{DateTime, Local};
use std::collections::VecDeque;

/// Maximum number of entries kept in the history; older ones are dropped.
pub const HISTORY_LIMIT: usize = 100;

pub type Clock = fn() -> DateTime<Local>;

/// Running tally plus a bounded, most-recent-first action history.
#[derive(Debug, Clone)]
pub struct CounterEngine {
    count: i64,
    history: VecDeque<HistoryEntry>,
    clock: Clock,
}

impl Default for CounterEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl CounterEngine {
    pub fn new() -> Self {
        Self::with_clock(Local::now)
    }

    pub fn with_clock(clock: Clock) -> Self {
        Self {
            count: 0,
            history: VecDeque::with_capacity(HISTORY_LIMIT),
            clock,
        }
    }

    pub fn count(&self) -> i64 {
        self.count
    }

    /// History entries, most recent first.
    pub fn history(&self) -> impl ExactSizeIterator<Item = &HistoryEntry> {
        self.history.iter()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn last_entry(&self) -> Option<&HistoryEntry> {
        self.history.front()
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    pub fn increment(&mut self) {
        self.count = self.count.saturating_add(1);
        self.record(ActionKind::Increment, 1);
    }

    pub fn decrement(&mut self) {
        self.count = self.count.saturating_sub(1);
        self.record(ActionKind::Decrement, -1);
    }

    pub fn mark_neutral(&mut self) {
        self.record(ActionKind::Neutral, 0);
    }

    /// Zeroes the count and replaces the whole history with one Reset entry.
    pub fn reset(&mut self) {
        let old_count = self.count;
        self.count = 0;
        self.history.clear();
        self.record(ActionKind::Reset, old_count.saturating_neg());
    }

    /// Reverts the most recent entry unless it is a Reset.
    pub fn undo(&mut self) -> UndoOutcome {
        let Some(last) = self.history.front() else {
            return UndoOutcome::Empty;
        };
        if !last.kind().is_reversible() {
            return UndoOutcome::BlockedByReset;
        }

        let Some(entry) = self.history.pop_front() else {
            return UndoOutcome::Empty;
        };
        self.count = self.count.saturating_sub(entry.delta());
        UndoOutcome::Applied(entry)
    }

    fn record(&mut self, kind: ActionKind, delta: i64) {
        let entry = HistoryEntry::new(kind, self.count, delta, (self.clock)());
        self.history.push_front(entry);
        self.history.truncate(HISTORY_LIMIT);
    }
}
