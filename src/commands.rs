use crate::counter::CounterEngine;
use crate::models::{OutcomeLabel, UndoOutcome};
use std::{fmt, str::FromStr};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Increment,
    Decrement,
    MarkNeutral,
    Reset,
    Undo,
}

impl Command {
    pub const ALL: [Command; 5] = [
        Command::Increment,
        Command::Decrement,
        Command::MarkNeutral,
        Command::Reset,
        Command::Undo,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Command::Increment => "increment",
            Command::Decrement => "decrement",
            Command::MarkNeutral => "neutral",
            Command::Reset => "reset",
            Command::Undo => "undo",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCommand(pub String);

impl fmt::Display for UnknownCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown command '{}'", self.0)
    }
}

impl std::error::Error for UnknownCommand {}

impl FromStr for Command {
    type Err = UnknownCommand;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let name = value.trim();
        Command::ALL
            .into_iter()
            .find(|command| command.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| UnknownCommand(name.to_string()))
    }
}

/// A key press as reported by the page.
#[derive(Debug, Clone, Copy)]
pub struct KeyPress<'a> {
    pub key: &'a str,
    pub ctrl: bool,
    pub meta: bool,
    pub target_tag: Option<&'a str>,
}

/// Keys the page claims from the browser before asking for a command.
/// Ctrl/Cmd+Z is claimed separately since it depends on modifiers.
pub const BOUND_KEYS: [&str; 7] = ["+", "=", "-", "0", "r", "R", "Backspace"];

pub fn command_for_key(press: KeyPress<'_>) -> Option<Command> {
    if press
        .target_tag
        .is_some_and(|tag| tag.eq_ignore_ascii_case("input") || tag.eq_ignore_ascii_case("textarea"))
    {
        return None;
    }

    match press.key {
        "+" | "=" => Some(Command::Increment),
        "-" => Some(Command::Decrement),
        "0" => Some(Command::MarkNeutral),
        "r" | "R" => Some(Command::Reset),
        "z" | "Z" if press.ctrl || press.meta => Some(Command::Undo),
        "Backspace" => Some(Command::Undo),
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    Applied,
    Undo(UndoOutcome),
}

impl CommandOutcome {
    pub fn label(&self) -> OutcomeLabel {
        match self {
            CommandOutcome::Applied | CommandOutcome::Undo(UndoOutcome::Applied(_)) => {
                OutcomeLabel::Applied
            }
            CommandOutcome::Undo(UndoOutcome::Empty) => OutcomeLabel::Empty,
            CommandOutcome::Undo(UndoOutcome::BlockedByReset) => OutcomeLabel::BlockedByReset,
        }
    }
}

pub fn dispatch(engine: &mut CounterEngine, command: Command) -> CommandOutcome {
    let outcome = match command {
        Command::Increment => {
            engine.increment();
            CommandOutcome::Applied
        }
        Command::Decrement => {
            engine.decrement();
            CommandOutcome::Applied
        }
        Command::MarkNeutral => {
            engine.mark_neutral();
            CommandOutcome::Applied
        }
        Command::Reset => {
            engine.reset();
            CommandOutcome::Applied
        }
        Command::Undo => CommandOutcome::Undo(engine.undo()),
    };

    match &outcome {
        CommandOutcome::Undo(UndoOutcome::Empty) => debug!("undo ignored: history is empty"),
        CommandOutcome::Undo(UndoOutcome::BlockedByReset) => {
            debug!("undo refused: last action was a reset")
        }
        _ => debug!(%command, count = engine.count(), "command applied"),
    }

    outcome
}
