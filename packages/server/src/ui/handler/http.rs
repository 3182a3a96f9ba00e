//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State};

use crate::{infrastructure::dto::http::PollRecordDto, ui::state::AppState};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Current poll, active or most recently ended; `null` before the first poll
pub async fn current_poll(State(state): State<Arc<AppState>>) -> Json<Option<PollRecordDto>> {
    let poll = state.facade.current_poll().await;
    Json(poll.as_ref().map(PollRecordDto::from))
}

/// Ended polls, oldest first
pub async fn poll_history(State(state): State<Arc<AppState>>) -> Json<Vec<PollRecordDto>> {
    let history = state.facade.poll_history().await;
    Json(history.iter().map(PollRecordDto::from).collect())
}
