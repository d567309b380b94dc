//! Test harness that drives the application router in-process.
//!
//! Each harness serves its own fixture site, so tests never touch the network.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::{
    body::{to_bytes, Body, Bytes},
    http::{HeaderMap, Request, StatusCode},
    Router,
};
use hello_net_core::common::SiteGate;
use hello_net_core::domains::browsing::{SessionConfig, SessionController};
use hello_net_core::domains::content::{
    ContentExtractor, ContentFetcher, ContentService, FetcherConfig,
};
use hello_net_core::kernel::test_dependencies::MockTextGenerator;
use hello_net_core::kernel::{MemoryKeyValueStore, ServerDeps};
use hello_net_core::server::build_app;
use hello_net_core::Config;
use test_context::AsyncTestContext;
use tower::ServiceExt;

use super::spawn_fixture_site;

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl TestResponse {
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("Response body is not JSON")
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

pub struct TestHarness {
    pub app: Router,
    pub deps: ServerDeps,
    pub generator: Arc<MockTextGenerator>,
    /// Base URL of the fixture site, e.g. `http://127.0.0.1:41234`
    pub site: String,
}

impl AsyncTestContext for TestHarness {
    async fn setup() -> Self {
        Self::new().await.expect("Failed to create test harness")
    }

    async fn teardown(self) {}
}

impl TestHarness {
    pub async fn new() -> Result<Self> {
        Self::with_generator(MockTextGenerator::new()).await
    }

    pub async fn with_generator(generator: MockTextGenerator) -> Result<Self> {
        // Run tests with: RUST_LOG=debug cargo test -- --nocapture
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        let site = spawn_fixture_site().await?;

        let config = Config {
            rate_limit_enabled: false,
            settle_delay: Duration::from_millis(5),
            ..Config::default()
        };

        let fetcher = ContentFetcher::new(FetcherConfig {
            timeout: Duration::from_secs(5),
            ..FetcherConfig::default()
        })?;
        let content = Arc::new(ContentService::new(
            fetcher,
            ContentExtractor::new(config.max_content_chars),
        ));
        let generator = Arc::new(generator);

        let deps = ServerDeps::new(
            content,
            generator.clone(),
            Arc::new(MemoryKeyValueStore::new()),
            SessionConfig {
                settle_delay: config.settle_delay,
                gate: SiteGate::new(&config.blocked_sites),
            },
        );
        let app = build_app(&config, deps.clone())?;

        Ok(Self {
            app,
            deps,
            generator,
            site,
        })
    }

    /// Absolute URL of a fixture page
    pub fn site_url(&self, path: &str) -> String {
        format!("{}{}", self.site, path)
    }

    /// Browsing session wired to the real content pipeline
    pub fn session(&self) -> SessionController {
        self.deps.session()
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        let request = Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("Failed to build request");

        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("Router is infallible");

        let status = response.status();
        let headers = response.headers().clone();
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");

        TestResponse {
            status,
            headers,
            body,
        }
    }
}

/// Percent-encode a URL for use as a query parameter
pub fn encode(url: &str) -> String {
    urlencoding::encode(url).into_owned()
}
