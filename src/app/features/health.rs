use axum::{routing::get, Json, Router};
use serde::Serialize;
use time::{format_description::well_known::Rfc3339, OffsetDateTime};

use crate::app::AppState;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub ok: bool,
    pub ts: String,
}

/// GET /health
pub async fn health() -> Json<HealthResponse> {
    let ts = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_default();
    Json(HealthResponse { ok: true, ts })
}

/// Health routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
