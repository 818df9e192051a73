//! Internal maintenance handlers.
//!
//! Bulk data reloads gate incoming searches while they run. The loader
//! job calls these endpoints around the reload so searches never observe
//! a half-replaced data set.

use axum::{extract::State, http::StatusCode, Json};
use serde_json::json;

use crate::state::AppState;

/// POST /internal/refresh/start - gate searches for a bulk reload.
pub async fn start_refresh(State(state): State<AppState>) -> (StatusCode, Json<serde_json::Value>) {
    state.refresh_gate.begin_refresh();
    (StatusCode::ACCEPTED, Json(json!({ "refreshing": true })))
}

/// POST /internal/refresh/finish - release gated searches.
pub async fn finish_refresh(
    State(state): State<AppState>,
) -> (StatusCode, Json<serde_json::Value>) {
    state.refresh_gate.finish_refresh();
    (StatusCode::OK, Json(json!({ "refreshing": false })))
}
