use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/command/:name", post(handlers::command_form))
        .route("/api/state", get(handlers::get_state))
        .route("/api/command", post(handlers::command))
        .route("/api/key", post(handlers::key))
        .with_state(state)
}
