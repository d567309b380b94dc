//! Local fixture site served over real HTTP so the content pipeline can be
//! exercised without touching the network.

use anyhow::{Context, Result};
use axum::{
    http::{header::CONTENT_TYPE, StatusCode},
    response::{Html, IntoResponse, Redirect},
    routing::get,
    Router,
};

pub const ARTICLE_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<title>Fixture Article</title>
<meta name="description" content="An article used by tests">
<meta name="author" content="Test Author">
<meta property="og:image" content="/images/card.png">
<script>window.tracking = true;</script>
</head>
<body>
<nav><a href="/">Home</a> | <a href="/about">About</a></nav>
<div class="ad">Buy things now</div>
<iframe src="https://ads.example.net/banner"></iframe>
<main>
<h1>Rust in Production</h1>
<p>Ownership makes resource handling predictable.</p>
<img src="images/diagram.png" alt="diagram">
</main>
<footer>Copyright Fixture</footer>
</body>
</html>"#;

pub const EMPTY_HTML: &str = "<html><head></head><body>   </body></html>";

pub const PNG_BYTES: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

pub fn fixture_router() -> Router {
    Router::new()
        .route("/article", get(|| async { Html(ARTICLE_HTML) }))
        .route("/empty", get(|| async { Html(EMPTY_HTML) }))
        .route(
            "/plain",
            get(|| async { ([(CONTENT_TYPE, "text/plain")], "just some text") }),
        )
        .route(
            "/image.png",
            get(|| async { ([(CONTENT_TYPE, "image/png")], PNG_BYTES) }),
        )
        .route(
            "/missing",
            get(|| async { (StatusCode::NOT_FOUND, "gone").into_response() }),
        )
        .route("/moved", get(|| async { Redirect::temporary("/article") }))
}

/// Serve the fixture site on an ephemeral port and return its base URL.
pub async fn spawn_fixture_site() -> Result<String> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .context("Failed to bind fixture site")?;
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        let _ = axum::serve(listener, fixture_router()).await;
    });

    Ok(format!("http://{}", addr))
}
