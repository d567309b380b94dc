use axum::{
    extract::Query,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub suggestions: Vec<String>,
    pub timestamp: String,
}

/// Suggested refinements for a query
pub fn suggestions_for(query: &str) -> Vec<String> {
    vec![
        format!("{} site:wikipedia.org", query),
        format!("{} site:stackoverflow.com", query),
        format!("{} site:github.com", query),
        format!("{} news", query),
        format!("{} tutorial", query),
    ]
}

pub async fn search_handler(Query(params): Query<SearchQuery>) -> Response {
    let query = params.q.as_deref().map(str::trim).unwrap_or_default();
    if query.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "Search query is required",
                "usage": "/api/search?q=rust",
            })),
        )
            .into_response();
    }

    Json(SearchResponse {
        query: query.to_string(),
        suggestions: suggestions_for(query),
        timestamp: Utc::now().to_rfc3339(),
    })
    .into_response()
}
