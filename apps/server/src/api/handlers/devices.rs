//! Device search handlers, one per API revision.
//!
//! The handlers are deliberately thin: extract the raw parameters, name
//! the revision, and let the service do the resolving and querying.

use axum::{
    extract::{Query, State},
    Json,
};

use crate::db::query::envelope::ResultEnvelope;
use crate::db::query::params::RawSearchParams;
use crate::db::query::revision::ApiRevision;
use crate::state::AppState;
use crate::Result;

/// GET /api/v1/devices - exact-match search.
pub async fn search_v1(
    State(state): State<AppState>,
    Query(params): Query<RawSearchParams>,
) -> Result<Json<ResultEnvelope>> {
    let envelope = state
        .device_service
        .search(ApiRevision::V1, &params)
        .await?;
    Ok(Json(envelope))
}

/// GET /api/v2/devices - adds substring filters.
pub async fn search_v2(
    State(state): State<AppState>,
    Query(params): Query<RawSearchParams>,
) -> Result<Json<ResultEnvelope>> {
    let envelope = state
        .device_service
        .search(ApiRevision::V2, &params)
        .await?;
    Ok(Json(envelope))
}

/// GET /api/v3/devices - adds vehicle identifiers and timestamp ranges.
pub async fn search_v3(
    State(state): State<AppState>,
    Query(params): Query<RawSearchParams>,
) -> Result<Json<ResultEnvelope>> {
    let envelope = state
        .device_service
        .search(ApiRevision::V3, &params)
        .await?;
    Ok(Json(envelope))
}
