pub mod app;
pub mod commands;
pub mod config;
pub mod counter;
pub mod display;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod ui;
pub mod state;

pub use app::router;
pub use commands::{Command, CommandOutcome, dispatch};
pub use config::resolve_addr;
pub use counter::CounterEngine;
pub use state::AppState;
