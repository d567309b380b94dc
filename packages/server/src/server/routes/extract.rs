use axum::{
    extract::{Extension, Query},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::Serialize;
use serde_json::json;
use tracing::warn;

use super::{target_url, UrlQuery};
use crate::domains::content::{ExtractOutcome, ExtractedDocument};
use crate::server::app::AppState;

const EXTRACT_USAGE: &str = "/api/extract?url=https://example.com";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractResponse {
    pub url: String,
    #[serde(flatten)]
    pub document: ExtractedDocument,
    pub status: &'static str,
    pub extracted_at: String,
}

/// Fetch a page and return its readable text as JSON
pub async fn extract_handler(
    Extension(state): Extension<AppState>,
    Query(params): Query<UrlQuery>,
) -> Response {
    let target = match target_url(params.url.as_deref(), EXTRACT_USAGE) {
        Ok(target) => target,
        Err(response) => return response,
    };

    match state.content.extract(&target).await {
        Ok(outcome) => {
            let status = match outcome {
                ExtractOutcome::Document(_) => "success",
                ExtractOutcome::NonHtml { .. } => "non-html",
            };
            Json(ExtractResponse {
                url: target,
                document: outcome.into_document(),
                status,
                extracted_at: Utc::now().to_rfc3339(),
            })
            .into_response()
        }
        Err(e) => {
            warn!(url = %target, error = %e, "Extract fetch failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": e.to_string(),
                    "url": target,
                    "status": "error",
                })),
            )
                .into_response()
        }
    }
}
