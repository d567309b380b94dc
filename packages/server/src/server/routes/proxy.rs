use axum::{
    extract::{Extension, Query},
    http::{header::CONTENT_TYPE, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use tracing::warn;

use super::{target_url, UrlQuery};
use crate::domains::content::ProxyOutcome;
use crate::server::app::AppState;
use crate::server::error_page::render_error_page;

const PROXY_USAGE: &str = "/api/proxy?url=https://example.com";
const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";

const PROXIED_BY: &str = "Hello-Net-Browser";

fn proxied_by() -> (HeaderName, HeaderValue) {
    (
        HeaderName::from_static("x-proxied-by"),
        HeaderValue::from_static(PROXIED_BY),
    )
}

/// Fetch a page and return it rewritten for the embedded frame
pub async fn proxy_handler(
    Extension(state): Extension<AppState>,
    Query(params): Query<UrlQuery>,
) -> Response {
    let target = match target_url(params.url.as_deref(), PROXY_USAGE) {
        Ok(target) => target,
        Err(response) => return response,
    };

    match state.content.proxy(&target).await {
        Ok(ProxyOutcome::Html(html)) => (
            [
                (CONTENT_TYPE, HeaderValue::from_static(HTML_CONTENT_TYPE)),
                proxied_by(),
            ],
            html,
        )
            .into_response(),
        Ok(ProxyOutcome::Passthrough { content_type, body }) => {
            let content_type = HeaderValue::from_str(&content_type)
                .unwrap_or_else(|_| HeaderValue::from_static("application/octet-stream"));
            (
                [
                    (CONTENT_TYPE, content_type),
                    proxied_by(),
                ],
                body,
            )
                .into_response()
        }
        Err(e) => {
            warn!(url = %target, error = %e, "Proxy fetch failed");
            let requested = params.url.as_deref().map(str::trim).unwrap_or(target.as_str());
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                [(CONTENT_TYPE, HeaderValue::from_static(HTML_CONTENT_TYPE))],
                render_error_page(requested, &e.to_string()),
            )
                .into_response()
        }
    }
}
