//! Remote document retrieval for the proxy and extraction endpoints.

use std::time::Duration;

use anyhow::{Context, Result};
use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CONTENT_TYPE};
use tracing::debug;
use url::Url;

use super::error::FetchError;

/// Mobile browser identity presented to upstream sites.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.0 Mobile/15E148 Safari/604.1";

pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

const MAX_REDIRECTS: usize = 10;

#[derive(Debug, Clone)]
pub struct FetcherConfig {
    pub user_agent: String,
    pub timeout: Duration,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }
}

/// A successfully retrieved document.
#[derive(Debug, Clone)]
pub struct FetchedDocument {
    /// Final URL after redirects.
    pub url: String,
    pub content_type: String,
    pub body: Bytes,
}

impl FetchedDocument {
    pub fn is_html(&self) -> bool {
        let content_type = self.content_type.to_ascii_lowercase();
        content_type.contains("text/html") || content_type.contains("application/xhtml+xml")
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// HTTP client that follows redirects and reports typed failures.
pub struct ContentFetcher {
    client: reqwest::Client,
    timeout: Duration,
}

impl ContentFetcher {
    pub fn new(config: FetcherConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            ),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.5"));

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent)
            .default_headers(headers)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            timeout: config.timeout,
        })
    }

    /// Fetch `url`, failing on transport errors and non-2xx responses.
    pub async fn fetch(&self, url: &str) -> Result<FetchedDocument, FetchError> {
        let target = Url::parse(url).map_err(|e| FetchError::InvalidUrl(format!("{}: {}", url, e)))?;
        if !matches!(target.scheme(), "http" | "https") {
            return Err(FetchError::InvalidUrl(format!(
                "{}: unsupported scheme {}",
                url,
                target.scheme()
            )));
        }

        debug!(url = %target, "Fetching document");

        let response = self
            .client
            .get(target)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        let final_url = response.url().to_string();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("")
            .to_string();

        let body = response.bytes().await.map_err(|e| self.classify(e))?;

        debug!(
            url = %final_url,
            content_type = %content_type,
            bytes = body.len(),
            "Fetched document"
        );

        Ok(FetchedDocument {
            url: final_url,
            content_type,
            body,
        })
    }

    fn classify(&self, error: reqwest::Error) -> FetchError {
        if error.is_timeout() {
            FetchError::Timeout(self.timeout)
        } else {
            FetchError::Network(error.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document(content_type: &str) -> FetchedDocument {
        FetchedDocument {
            url: "https://example.com/".to_string(),
            content_type: content_type.to_string(),
            body: Bytes::from_static(b"<p>hi</p>"),
        }
    }

    #[test]
    fn test_html_detection() {
        assert!(document("text/html; charset=utf-8").is_html());
        assert!(document("Application/XHTML+XML").is_html());
        assert!(!document("application/json").is_html());
        assert!(!document("").is_html());
    }

    #[tokio::test]
    async fn test_rejects_malformed_url() {
        let fetcher = ContentFetcher::new(FetcherConfig::default()).unwrap();
        let err = fetcher.fetch("not a url").await.unwrap_err();
        assert!(matches!(err, FetchError::InvalidUrl(_)));
    }

    #[tokio::test]
    async fn test_rejects_non_http_scheme() {
        let fetcher = ContentFetcher::new(FetcherConfig::default()).unwrap();
        let err = fetcher.fetch("ftp://example.com/file").await.unwrap_err();
        assert!(matches!(err, FetchError::InvalidUrl(_)));
    }

    #[test]
    fn test_status_error_message() {
        let err = FetchError::Status {
            status: 404,
            reason: "Not Found".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 404: Not Found");
        assert_eq!(err.status_code(), Some(404));
    }
}
