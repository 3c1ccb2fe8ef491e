use crate::counter::CounterEngine;
use crate::models::{ActionKind, CountSign, CounterView, HistoryEntry, HistoryLine};
use chrono::{DateTime, Local};

pub const RESET_TOTAL_LABEL: &str = "Cleared";

pub fn classify(count: i64) -> CountSign {
    match count {
        c if c > 0 => CountSign::Positive,
        c if c < 0 => CountSign::Negative,
        _ => CountSign::Neutral,
    }
}

/// CSS class applied to the count display; neutral counts carry none.
pub fn sign_class(sign: CountSign) -> &'static str {
    match sign {
        CountSign::Positive => "positive",
        CountSign::Negative => "negative",
        CountSign::Neutral => "",
    }
}

pub fn action_label(kind: ActionKind) -> &'static str {
    match kind {
        ActionKind::Increment => "+1",
        ActionKind::Decrement => "-1",
        ActionKind::Neutral => "0",
        ActionKind::Reset => "Reset",
    }
}

pub fn action_class(kind: ActionKind) -> &'static str {
    match kind {
        ActionKind::Increment => "plus",
        ActionKind::Decrement => "minus",
        ActionKind::Neutral => "neutral",
        ActionKind::Reset => "reset",
    }
}

pub fn total_label(entry: &HistoryEntry) -> String {
    match entry.kind() {
        ActionKind::Reset => RESET_TOTAL_LABEL.to_string(),
        _ => format!("Total: {}", entry.count_after()),
    }
}

/// Human label for how long ago `timestamp` was, as seen from `now`.
pub fn relative_time(timestamp: DateTime<Local>, now: DateTime<Local>) -> String {
    let secs = (now - timestamp).num_seconds().max(0);
    let mins = secs / 60;
    let hours = mins / 60;

    if secs < 5 {
        "just now".to_string()
    } else if secs < 60 {
        format!("{secs}s ago")
    } else if mins < 60 {
        format!("{mins} min ago")
    } else if hours < 24 {
        format!("{hours}h ago")
    } else {
        timestamp.format("%d/%m %H:%M").to_string()
    }
}

pub fn history_line(entry: &HistoryEntry, now: DateTime<Local>) -> HistoryLine {
    HistoryLine {
        action: action_label(entry.kind()).to_string(),
        action_class: action_class(entry.kind()).to_string(),
        total: total_label(entry),
        time: relative_time(entry.timestamp(), now),
    }
}

pub fn build_view(engine: &CounterEngine) -> CounterView {
    build_view_at(Local::now(), engine)
}

pub fn build_view_at(now: DateTime<Local>, engine: &CounterEngine) -> CounterView {
    CounterView {
        count: engine.count(),
        sign: classify(engine.count()),
        undo_available: engine.can_undo(),
        history: engine.history().map(|entry| history_line(entry, now)).collect(),
    }
}
