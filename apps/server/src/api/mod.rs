//! API layer - routes, handlers, and middleware

pub mod handlers;
pub mod middleware;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde_json::json;

use crate::state::AppState;

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    let cors_origins = state.config.server.cors_origins.clone();

    Router::new()
        .route("/health", get(health_check))
        .route("/", get(root))
        .route("/api/v1/devices", get(handlers::devices::search_v1))
        .route("/api/v2/devices", get(handlers::devices::search_v2))
        .route("/api/v3/devices", get(handlers::devices::search_v3))
        .route(
            "/internal/refresh/start",
            post(handlers::admin::start_refresh),
        )
        .route(
            "/internal/refresh/finish",
            post(handlers::admin::finish_refresh),
        )
        .with_state(state)
        // Applied in reverse order
        .layer(middleware::cors(&cors_origins))
        .layer(middleware::trace())
}

async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "device-registry"
    }))
}

async fn root(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "server": "Device Registry",
            "version": env!("CARGO_PKG_VERSION"),
            "revisions": ["v1", "v2", "v3"],
            "refreshing": !state.refresh_gate.is_open(),
        })),
    )
}
