mod common;

use axum::http::StatusCode;
use common::{encode, TestHarness};
use test_context::test_context;

// =============================================================================
// Tests: /api/extract
// =============================================================================

#[test_context(TestHarness)]
#[tokio::test]
async fn test_extract_returns_main_content(ctx: &TestHarness) {
    let target = ctx.site_url("/article");
    let response = ctx.get(&format!("/api/extract?url={}", encode(&target))).await;

    assert_eq!(response.status, StatusCode::OK);
    let body = response.json();
    assert_eq!(body["status"], "success");
    assert_eq!(body["url"], target);
    assert_eq!(body["title"], "Fixture Article");
    assert_eq!(
        body["content"],
        "Rust in Production Ownership makes resource handling predictable."
    );
    assert_eq!(body["description"], "An article used by tests");
    assert_eq!(body["author"], "Test Author");
    assert_eq!(body["wordCount"], 8);
    assert_eq!(
        body["length"].as_u64().unwrap() as usize,
        body["content"].as_str().unwrap().chars().count()
    );
    assert!(body["extractedAt"].is_string());
}

#[test_context(TestHarness)]
#[tokio::test]
async fn test_extract_non_html(ctx: &TestHarness) {
    let target = ctx.site_url("/plain");
    let response = ctx.get(&format!("/api/extract?url={}", encode(&target))).await;

    assert_eq!(response.status, StatusCode::OK);
    let body = response.json();
    assert_eq!(body["status"], "non-html");
    assert_eq!(body["title"], "Non-HTML Content");
    assert_eq!(body["length"], 0);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn test_extract_upstream_failure(ctx: &TestHarness) {
    let target = ctx.site_url("/missing");
    let response = ctx.get(&format!("/api/extract?url={}", encode(&target))).await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    let body = response.json();
    assert_eq!(body["status"], "error");
    assert_eq!(body["url"], target);
    assert_eq!(body["error"], "HTTP 404: Not Found");
}

#[test_context(TestHarness)]
#[tokio::test]
async fn test_extract_missing_url(ctx: &TestHarness) {
    let response = ctx.get("/api/extract?url=").await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json()["error"], "URL parameter is required");
}

#[test_context(TestHarness)]
#[tokio::test]
async fn test_metadata_reads_preview_fields(ctx: &TestHarness) {
    let target = ctx.site_url("/article");
    let response = ctx.get(&format!("/api/metadata?url={}", encode(&target))).await;

    assert_eq!(response.status, StatusCode::OK);
    let body = response.json();
    assert_eq!(body["title"], "Fixture Article");
    assert_eq!(body["description"], "An article used by tests");
    assert_eq!(body["image"], format!("{}/images/card.png", ctx.site));
    assert_eq!(body["favicon"], format!("{}/favicon.ico", ctx.site));
    assert_eq!(body["type"], "website");
    assert_eq!(body["language"], "en");
}

#[test_context(TestHarness)]
#[tokio::test]
async fn test_metadata_upstream_failure(ctx: &TestHarness) {
    let target = ctx.site_url("/missing");
    let response = ctx.get(&format!("/api/metadata?url={}", encode(&target))).await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.json()["status"], "error");
}
