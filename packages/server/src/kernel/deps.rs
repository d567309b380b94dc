//! Server dependencies (using traits for testability)
//!
//! Central container for the content pipeline and the collaborators the
//! browsing session depends on. Tests swap collaborators for the mocks in
//! `test_dependencies`.

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

use crate::common::SiteGate;
use crate::config::Config;
use crate::domains::browsing::{BrowserStorage, SessionConfig, SessionController};
use crate::domains::content::{ContentExtractor, ContentFetcher, ContentService, FetcherConfig};
use crate::kernel::{
    BaseKeyValueStore, BaseTextGenerator, GeminiClient, MemoryKeyValueStore, NoopTextGenerator,
};

#[derive(Clone)]
pub struct ServerDeps {
    pub content: Arc<ContentService>,
    pub text_generator: Arc<dyn BaseTextGenerator>,
    pub key_value_store: Arc<dyn BaseKeyValueStore>,
    pub session_config: SessionConfig,
}

impl ServerDeps {
    pub fn new(
        content: Arc<ContentService>,
        text_generator: Arc<dyn BaseTextGenerator>,
        key_value_store: Arc<dyn BaseKeyValueStore>,
        session_config: SessionConfig,
    ) -> Self {
        Self {
            content,
            text_generator,
            key_value_store,
            session_config,
        }
    }

    /// Wire production dependencies from configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        let fetcher = ContentFetcher::new(FetcherConfig {
            user_agent: config.user_agent.clone(),
            timeout: config.fetch_timeout,
        })
        .context("Failed to create content fetcher")?;
        let content = Arc::new(ContentService::new(
            fetcher,
            ContentExtractor::new(config.max_content_chars),
        ));

        let text_generator: Arc<dyn BaseTextGenerator> = match &config.gemini_api_key {
            Some(api_key) => {
                info!(model = %config.gemini_model, "Using Gemini text generation");
                Arc::new(GeminiClient::new(api_key.clone(), config.gemini_model.clone())?)
            }
            None => {
                info!("GEMINI_API_KEY not set, reader will use fallback text");
                Arc::new(NoopTextGenerator)
            }
        };

        Ok(Self::new(
            content,
            text_generator,
            Arc::new(MemoryKeyValueStore::new()),
            SessionConfig {
                settle_delay: config.settle_delay,
                gate: SiteGate::new(&config.blocked_sites),
            },
        ))
    }

    /// New browsing session backed by the content pipeline
    pub fn session(&self) -> SessionController {
        SessionController::new(
            self.session_config.clone(),
            self.content.clone(),
            self.text_generator.clone(),
        )
    }

    pub fn storage(&self) -> BrowserStorage {
        BrowserStorage::new(self.key_value_store.clone())
    }
}
