use axum::{
    http::{Method, StatusCode, Uri},
    Json,
};
use chrono::Utc;
use serde_json::{json, Value};

pub async fn not_found_handler(method: Method, uri: Uri) -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "Not found",
            "path": uri.path(),
            "method": method.as_str(),
            "timestamp": Utc::now().to_rfc3339(),
        })),
    )
}
