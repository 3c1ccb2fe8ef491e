use crate::commands::{Command, CommandOutcome, KeyPress, command_for_key, dispatch};
use crate::display::build_view;
use crate::errors::AppError;
use crate::models::{CommandRequest, CommandResponse, CounterView, KeyRequest, KeyResponse};
use crate::state::AppState;
use crate::ui::render_index;
use axum::{
    extract::{Path, State},
    response::{Html, Redirect},
    Json,
};

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let engine = state.engine.lock().await;
    Html(render_index(&build_view(&engine)))
}

pub async fn get_state(State(state): State<AppState>) -> Json<CounterView> {
    let engine = state.engine.lock().await;
    Json(build_view(&engine))
}

pub async fn command(
    State(state): State<AppState>,
    Json(payload): Json<CommandRequest>,
) -> Result<Json<CommandResponse>, AppError> {
    let command: Command = payload.command.parse()?;
    let (outcome, view) = apply_command(&state, command).await;
    Ok(Json(CommandResponse {
        outcome: outcome.label(),
        view,
    }))
}

pub async fn command_form(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Redirect, AppError> {
    let command: Command = name.parse()?;
    apply_command(&state, command).await;
    Ok(Redirect::to("/"))
}

pub async fn key(
    State(state): State<AppState>,
    Json(payload): Json<KeyRequest>,
) -> Json<KeyResponse> {
    let press = KeyPress {
        key: &payload.key,
        ctrl: payload.ctrl_key,
        meta: payload.meta_key,
        target_tag: payload.target_tag.as_deref(),
    };

    let response = match command_for_key(press) {
        Some(command) => {
            let (outcome, view) = apply_command(&state, command).await;
            KeyResponse {
                handled: true,
                outcome: Some(outcome.label()),
                view,
            }
        }
        None => {
            let engine = state.engine.lock().await;
            KeyResponse {
                handled: false,
                outcome: None,
                view: build_view(&engine),
            }
        }
    };

    Json(response)
}

/// Runs one command and snapshots the result under a single lock.
async fn apply_command(state: &AppState, command: Command) -> (CommandOutcome, CounterView) {
    let mut engine = state.engine.lock().await;
    let outcome = dispatch(&mut engine, command);
    let view = build_view(&engine);
    (outcome, view)
}
