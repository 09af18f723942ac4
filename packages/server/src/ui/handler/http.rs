//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State};
use serde::Serialize;

use crate::ui::state::AppState;

/// Response body of `GET /api/online`
#[derive(Debug, Serialize)]
pub struct OnlineStatusDto {
    pub online_count: usize,
}

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Current number of logged-in connections
pub async fn online_status(State(state): State<Arc<AppState>>) -> Json<OnlineStatusDto> {
    Json(OnlineStatusDto {
        online_count: state.registry.size().await,
    })
}
