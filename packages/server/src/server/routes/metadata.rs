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
use crate::domains::content::WebsiteMetadata;
use crate::server::app::AppState;

const METADATA_USAGE: &str = "/api/metadata?url=https://example.com";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataResponse {
    #[serde(flatten)]
    pub metadata: WebsiteMetadata,
    pub extracted_at: String,
}

/// Preview metadata (title, description, image, favicon) for a page
pub async fn metadata_handler(
    Extension(state): Extension<AppState>,
    Query(params): Query<UrlQuery>,
) -> Response {
    let target = match target_url(params.url.as_deref(), METADATA_USAGE) {
        Ok(target) => target,
        Err(response) => return response,
    };

    match state.content.metadata(&target).await {
        Ok(metadata) => Json(MetadataResponse {
            metadata,
            extracted_at: Utc::now().to_rfc3339(),
        })
        .into_response(),
        Err(e) => {
            warn!(url = %target, error = %e, "Metadata fetch failed");
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
