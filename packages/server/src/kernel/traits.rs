// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no session logic.
// Session behaviour lives in domains::browsing and drives these traits.
//
// Naming convention: Base* for trait names (e.g., BaseTextGenerator)

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domains::content::ExtractedDocument;

// =============================================================================
// Text Generation Trait (Infrastructure - grounded answers)
// =============================================================================

/// A source the generator cited for its answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLink {
    pub title: String,
    pub uri: String,
}

/// Generated answer with its grounding sources
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedAnswer {
    pub text: String,
    pub sources: Vec<SourceLink>,
}

#[async_trait]
pub trait BaseTextGenerator: Send + Sync {
    /// Answer a free-text query. May fail; callers never retry.
    async fn generate(&self, query: &str) -> Result<GeneratedAnswer>;
}

// =============================================================================
// Page Extraction Trait (Infrastructure - fetch + extract)
// =============================================================================

#[async_trait]
pub trait BasePageExtractor: Send + Sync {
    /// Fetch `url` and return its readable text
    async fn extract_page(&self, url: &str) -> Result<ExtractedDocument>;
}

// =============================================================================
// Key-Value Storage Trait (Infrastructure - bookmarks, settings)
// =============================================================================

#[async_trait]
pub trait BaseKeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>>;

    async fn set(&self, key: &str, value: serde_json::Value) -> Result<()>;

    async fn remove(&self, key: &str) -> Result<()>;
}
