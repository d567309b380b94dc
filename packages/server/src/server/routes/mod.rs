// HTTP routes
pub mod extract;
pub mod health;
pub mod index;
pub mod metadata;
pub mod not_found;
pub mod proxy;
pub mod search;

pub use extract::*;
pub use health::*;
pub use index::*;
pub use metadata::*;
pub use not_found::*;
pub use proxy::*;
pub use search::*;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;
use url::Url;

use crate::common::normalize_address;

/// `?url=` query shared by the content endpoints
#[derive(Debug, Deserialize)]
pub struct UrlQuery {
    pub url: Option<String>,
}

/// Validate and normalize the `url` parameter, or build the 400 response.
pub(crate) fn target_url(raw: Option<&str>, usage: &str) -> Result<String, Response> {
    let raw = raw.map(str::trim).unwrap_or_default();
    if raw.is_empty() {
        return Err(bad_request("URL parameter is required", usage));
    }

    let normalized = normalize_address(raw);
    match Url::parse(&normalized) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.host().is_some() => {
            Ok(url.to_string())
        }
        _ => Err(bad_request("Valid URL is required", usage)),
    }
}

fn bad_request(error: &str, usage: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "error": error, "usage": usage })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_url_normalizes_scheme() {
        assert_eq!(
            target_url(Some(" example.com/path "), "usage").unwrap(),
            "https://example.com/path"
        );
        assert_eq!(
            target_url(Some("http://example.com"), "usage").unwrap(),
            "http://example.com/"
        );
    }

    #[test]
    fn test_target_url_rejects_missing_and_malformed() {
        let missing = target_url(None, "usage").unwrap_err();
        assert_eq!(missing.status(), StatusCode::BAD_REQUEST);

        let blank = target_url(Some("   "), "usage").unwrap_err();
        assert_eq!(blank.status(), StatusCode::BAD_REQUEST);

        let malformed = target_url(Some("http://"), "usage").unwrap_err();
        assert_eq!(malformed.status(), StatusCode::BAD_REQUEST);
    }
}
