//! `GET /health`: liveness plus a data directory write probe.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub data_dir_writable: bool,
}

/// 200 when the data directory accepts writes, 503 otherwise.
async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let writable = state.store.health_check().await;
    let (status, label) = if writable {
        (StatusCode::OK, "healthy")
    } else {
        tracing::warn!(
            data_dir = %state.store.config().data_dir.display(),
            "Data directory not writable"
        );
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };

    (
        status,
        Json(HealthResponse {
            status: label,
            version: env!("CARGO_PKG_VERSION"),
            data_dir_writable: writable,
        }),
    )
}
