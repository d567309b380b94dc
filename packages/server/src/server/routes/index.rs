use axum::Json;
use serde_json::{json, Value};

/// Service index listing the available endpoints
pub async fn index_handler() -> Json<Value> {
    Json(json!({
        "message": "Hello Net browser backend",
        "status": "running",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "health": "/health",
            "proxy": "/api/proxy?url=<url>",
            "extract": "/api/extract?url=<url>",
            "metadata": "/api/metadata?url=<url>",
            "search": "/api/search?q=<query>"
        }
    }))
}
