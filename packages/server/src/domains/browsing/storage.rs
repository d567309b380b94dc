//! Typed persistence helpers for bookmarks, recent searches and settings.

use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::kernel::BaseKeyValueStore;

pub const BOOKMARKS_KEY: &str = "hello-net-bookmarks";
pub const RECENT_SEARCHES_KEY: &str = "hello-net-recent-searches";
pub const SETTINGS_KEY: &str = "hello-net-settings";

pub const MAX_RECENT_SEARCHES: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bookmark {
    pub url: String,
    pub title: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
    Auto,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProxyMode {
    #[default]
    Auto,
    Always,
    Never,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AiMode {
    #[default]
    Auto,
    Manual,
}

/// User preferences. Missing fields take their defaults when loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BrowserSettings {
    pub theme: Theme,
    pub proxy_mode: ProxyMode,
    pub ai_mode: AiMode,
    pub save_history: bool,
    pub block_ads: bool,
    pub mobile_optimization: bool,
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            theme: Theme::Dark,
            proxy_mode: ProxyMode::Auto,
            ai_mode: AiMode::Auto,
            save_history: true,
            block_ads: true,
            mobile_optimization: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClearTarget {
    Bookmarks,
    History,
    All,
}

pub struct BrowserStorage {
    store: Arc<dyn BaseKeyValueStore>,
}

impl BrowserStorage {
    pub fn new(store: Arc<dyn BaseKeyValueStore>) -> Self {
        Self { store }
    }

    /// Read and decode a key. Undecodable values are treated as absent.
    async fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let Some(value) = self.store.get(key).await? else {
            return Ok(None);
        };
        match serde_json::from_value(value) {
            Ok(decoded) => Ok(Some(decoded)),
            Err(e) => {
                warn!(key = %key, error = %e, "Ignoring undecodable stored value");
                Ok(None)
            }
        }
    }

    async fn save<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let value = serde_json::to_value(value)
            .with_context(|| format!("Failed to encode value for {}", key))?;
        self.store.set(key, value).await
    }

    // Bookmarks

    /// Bookmarks, newest first.
    pub async fn bookmarks(&self) -> Result<Vec<Bookmark>> {
        Ok(self.load(BOOKMARKS_KEY).await?.unwrap_or_default())
    }

    /// Add or refresh a bookmark; re-adding a URL moves it to the front.
    pub async fn add_bookmark(&self, url: &str, title: &str) -> Result<Bookmark> {
        let bookmark = Bookmark {
            url: url.to_string(),
            title: title.to_string(),
            created_at: Utc::now(),
        };

        let mut bookmarks = self.bookmarks().await?;
        bookmarks.retain(|b| b.url != url);
        bookmarks.insert(0, bookmark.clone());
        self.save(BOOKMARKS_KEY, &bookmarks).await?;
        Ok(bookmark)
    }

    pub async fn remove_bookmark(&self, url: &str) -> Result<bool> {
        let mut bookmarks = self.bookmarks().await?;
        let before = bookmarks.len();
        bookmarks.retain(|b| b.url != url);
        if bookmarks.len() == before {
            return Ok(false);
        }
        self.save(BOOKMARKS_KEY, &bookmarks).await?;
        Ok(true)
    }

    pub async fn is_bookmarked(&self, url: &str) -> Result<bool> {
        Ok(self.bookmarks().await?.iter().any(|b| b.url == url))
    }

    // Recent searches

    pub async fn recent_searches(&self) -> Result<Vec<String>> {
        Ok(self.load(RECENT_SEARCHES_KEY).await?.unwrap_or_default())
    }

    /// Record a search, newest first, without duplicates.
    pub async fn push_recent_search(&self, query: &str) -> Result<()> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(());
        }

        let mut searches = self.recent_searches().await?;
        searches.retain(|s| s != query);
        searches.insert(0, query.to_string());
        searches.truncate(MAX_RECENT_SEARCHES);
        self.save(RECENT_SEARCHES_KEY, &searches).await
    }

    // Settings

    pub async fn settings(&self) -> Result<BrowserSettings> {
        Ok(self.load(SETTINGS_KEY).await?.unwrap_or_default())
    }

    pub async fn save_settings(&self, settings: &BrowserSettings) -> Result<()> {
        self.save(SETTINGS_KEY, settings).await
    }

    pub async fn clear_data(&self, target: ClearTarget) -> Result<()> {
        if matches!(target, ClearTarget::Bookmarks | ClearTarget::All) {
            self.store.remove(BOOKMARKS_KEY).await?;
        }
        if matches!(target, ClearTarget::History | ClearTarget::All) {
            self.store.remove(RECENT_SEARCHES_KEY).await?;
        }
        Ok(())
    }
}
