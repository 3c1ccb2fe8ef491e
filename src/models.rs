use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// The kind of action a history entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Increment,
    Decrement,
    Neutral,
    Reset,
}

impl ActionKind {
    /// Reset entries cannot be undone: the history they replaced is gone.
    pub fn is_reversible(self) -> bool {
        !matches!(self, ActionKind::Reset)
    }
}

/// One applied action and the count it left behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    kind: ActionKind,
    count_after: i64,
    delta: i64,
    timestamp: DateTime<Local>,
}

impl HistoryEntry {
    pub fn new(kind: ActionKind, count_after: i64, delta: i64, timestamp: DateTime<Local>) -> Self {
        Self {
            kind,
            count_after,
            delta,
            timestamp,
        }
    }

    pub fn kind(&self) -> ActionKind {
        self.kind
    }

    pub fn count_after(&self) -> i64 {
        self.count_after
    }

    pub fn delta(&self) -> i64 {
        self.delta
    }

    pub fn timestamp(&self) -> DateTime<Local> {
        self.timestamp
    }
}

/// Result of an undo request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UndoOutcome {
    Applied(HistoryEntry),
    Empty,
    BlockedByReset,
}

impl UndoOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, UndoOutcome::Applied(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountSign {
    Positive,
    Negative,
    Neutral,
}

#[derive(Debug, Deserialize)]
pub struct CommandRequest {
    pub command: String,
}

#[derive(Debug, Deserialize)]
pub struct KeyRequest {
    pub key: String,
    #[serde(default)]
    pub ctrl_key: bool,
    #[serde(default)]
    pub meta_key: bool,
    #[serde(default)]
    pub target_tag: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HistoryLine {
    pub action: String,
    pub action_class: String,
    pub total: String,
    pub time: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CounterView {
    pub count: i64,
    pub sign: CountSign,
    pub undo_available: bool,
    pub history: Vec<HistoryLine>,
}

/// Wire form of a command's effect: `applied`, `empty` or `blocked_by_reset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeLabel {
    Applied,
    Empty,
    BlockedByReset,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CommandResponse {
    pub outcome: OutcomeLabel,
    pub view: CounterView,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct KeyResponse {
    pub handled: bool,
    pub outcome: Option<OutcomeLabel>,
    pub view: CounterView,
}
