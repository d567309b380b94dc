use axum::{extract::Extension, http::StatusCode, Json};
use chrono::Utc;
use serde::Serialize;

use crate::server::app::{AppState, SERVICE_NAME};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    status: String,
    service: String,
    timestamp: String,
    version: String,
    uptime_secs: u64,
}

/// Health check endpoint
///
/// The service has no backing stores, so it is healthy whenever it answers.
pub async fn health_handler(
    Extension(state): Extension<AppState>,
) -> (StatusCode, Json<HealthResponse>) {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            service: SERVICE_NAME.to_string(),
            timestamp: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime_secs: state.started_at.elapsed().as_secs(),
        }),
    )
}
