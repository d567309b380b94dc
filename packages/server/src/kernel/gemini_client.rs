use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use super::{BaseTextGenerator, GeneratedAnswer, SourceLink};

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
const EMPTY_ANSWER: &str = "I couldn't find information on that.";
const DEFAULT_SOURCE_TITLE: &str = "Search Source";

/// Gemini client using the search-grounding tool
pub struct GeminiClient {
    api_key: String,
    model: String,
    base_url: String,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
    #[serde(default)]
    grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroundingMetadata {
    #[serde(default)]
    grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Debug, Deserialize)]
struct GroundingChunk {
    #[serde(default)]
    web: Option<WebSource>,
}

#[derive(Debug, Deserialize)]
struct WebSource {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    uri: Option<String>,
}

impl GeminiClient {
    pub fn new(api_key: String, model: String) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(60))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            api_key,
            model,
            base_url: GEMINI_API_BASE.to_string(),
            client,
        })
    }

    /// Point the client at a different API host (used by tests)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn prompt(query: &str) -> String {
        format!(
            "Search for and explain: {}. Be concise and helpful like a mobile browser assistant.",
            query
        )
    }
}

impl GenerateContentResponse {
    fn into_answer(self) -> GeneratedAnswer {
        let Some(candidate) = self.candidates.into_iter().next() else {
            return GeneratedAnswer {
                text: EMPTY_ANSWER.to_string(),
                sources: vec![],
            };
        };

        let text: String = candidate
            .content
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        let sources = candidate
            .grounding_metadata
            .map(|m| m.grounding_chunks)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|chunk| chunk.web)
            .filter_map(|web| {
                let uri = web.uri.filter(|u| !u.is_empty())?;
                Some(SourceLink {
                    title: web
                        .title
                        .filter(|t| !t.is_empty())
                        .unwrap_or_else(|| DEFAULT_SOURCE_TITLE.to_string()),
                    uri,
                })
            })
            .collect();

        GeneratedAnswer {
            text: if text.trim().is_empty() {
                EMPTY_ANSWER.to_string()
            } else {
                text
            },
            sources,
        }
    }
}

#[async_trait]
impl BaseTextGenerator for GeminiClient {
    async fn generate(&self, query: &str) -> Result<GeneratedAnswer> {
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
        let request = json!({
            "contents": [{ "parts": [{ "text": Self::prompt(query) }] }],
            "tools": [{ "google_search": {} }],
        });

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .context("Failed to send Gemini request")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Gemini API error {}: {}", status, body);
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .context("Failed to parse Gemini response")?;

        Ok(parsed.into_answer())
    }
}

/// Generator used when no API key is configured; always fails so callers fall back
pub struct NoopTextGenerator;

#[async_trait]
impl BaseTextGenerator for NoopTextGenerator {
    async fn generate(&self, _query: &str) -> Result<GeneratedAnswer> {
        tracing::warn!("NoopTextGenerator: generate called but no Gemini API key configured");
        anyhow::bail!("text generation is not configured")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(value: serde_json::Value) -> GeneratedAnswer {
        serde_json::from_value::<GenerateContentResponse>(value)
            .unwrap()
            .into_answer()
    }

    #[test]
    fn test_parses_text_and_sources() {
        let answer = parse(json!({
            "candidates": [{
                "content": { "parts": [{ "text": "Rust is " }, { "text": "a language." }] },
                "groundingMetadata": { "groundingChunks": [
                    { "web": { "title": "rust-lang.org", "uri": "https://rust-lang.org" } },
                    { "web": { "uri": "https://doc.rust-lang.org" } },
                    { "retrievedContext": {} }
                ]}
            }]
        }));

        assert_eq!(answer.text, "Rust is a language.");
        assert_eq!(
            answer.sources,
            vec![
                SourceLink {
                    title: "rust-lang.org".to_string(),
                    uri: "https://rust-lang.org".to_string()
                },
                SourceLink {
                    title: "Search Source".to_string(),
                    uri: "https://doc.rust-lang.org".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_empty_response_has_default_text() {
        let answer = parse(json!({ "candidates": [] }));
        assert_eq!(answer.text, "I couldn't find information on that.");
        assert!(answer.sources.is_empty());
    }

    #[tokio::test]
    async fn test_noop_generator_fails() {
        assert!(NoopTextGenerator.generate("anything").await.is_err());
    }
}
