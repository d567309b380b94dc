use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use axum::{
    extract::Extension,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        Method,
    },
    routing::get,
    Router,
};
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::domains::content::ContentService;
use crate::kernel::ServerDeps;
use crate::server::routes::{
    extract_handler, health_handler, index_handler, metadata_handler, not_found_handler,
    proxy_handler, search_handler,
};

pub const SERVICE_NAME: &str = "hello-net-server";

#[derive(Clone)]
pub struct AppState {
    pub content: Arc<ContentService>,
    pub started_at: Instant,
}

pub fn build_app(config: &Config, deps: ServerDeps) -> Result<Router> {
    let app_state = AppState {
        content: deps.content.clone(),
        started_at: Instant::now(),
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE]);

    let mut api = Router::new()
        .route("/api/proxy", get(proxy_handler))
        .route("/api/extract", get(extract_handler))
        .route("/api/metadata", get(metadata_handler))
        .route("/api/search", get(search_handler));

    if config.rate_limit_enabled {
        let rate_limit_config = Arc::new(
            GovernorConfigBuilder::default()
                .per_second(10) // Base rate: 10 requests per second
                .burst_size(20) // Allow bursts up to 20
                .use_headers() // Extract IP from X-Forwarded-For header
                .finish()
                .context("Invalid rate limiter configuration")?,
        );
        api = api.layer(GovernorLayer {
            config: rate_limit_config,
        });
    }

    let app = Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health_handler))
        .merge(api)
        .fallback(not_found_handler)
        .layer(Extension(app_state))
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    Ok(app)
}
