//! Fetch-then-transform pipeline behind the proxy, extract and metadata endpoints.

use anyhow::Result;
use async_trait::async_trait;
use bytes::Bytes;
use tracing::info;

use super::error::FetchError;
use super::extractor::{ContentExtractor, ExtractedDocument};
use super::fetcher::ContentFetcher;
use super::metadata::{extract_metadata, WebsiteMetadata};
use super::sanitizer::HtmlSanitizer;
use crate::kernel::BasePageExtractor;

/// Result of proxying a document.
#[derive(Debug, Clone)]
pub enum ProxyOutcome {
    /// Sanitized HTML ready for the embedded frame.
    Html(String),
    /// Non-HTML body passed through with its upstream content type.
    Passthrough { content_type: String, body: Bytes },
}

/// Result of extracting a document.
#[derive(Debug, Clone)]
pub enum ExtractOutcome {
    Document(ExtractedDocument),
    NonHtml { content_type: String },
}

impl ExtractOutcome {
    pub fn into_document(self) -> ExtractedDocument {
        match self {
            ExtractOutcome::Document(document) => document,
            ExtractOutcome::NonHtml { content_type } => ExtractedDocument::non_html(&content_type),
        }
    }
}

pub struct ContentService {
    fetcher: ContentFetcher,
    sanitizer: HtmlSanitizer,
    extractor: ContentExtractor,
}

impl ContentService {
    pub fn new(fetcher: ContentFetcher, extractor: ContentExtractor) -> Self {
        Self {
            fetcher,
            sanitizer: HtmlSanitizer::new(),
            extractor,
        }
    }

    pub async fn proxy(&self, url: &str) -> Result<ProxyOutcome, FetchError> {
        let document = self.fetcher.fetch(url).await?;

        if !document.is_html() {
            info!(url = %url, content_type = %document.content_type, "Passing through non-HTML content");
            return Ok(ProxyOutcome::Passthrough {
                content_type: document.content_type,
                body: document.body,
            });
        }

        let html = document.text();
        Ok(ProxyOutcome::Html(self.sanitizer.sanitize(&html, &document.url)))
    }

    pub async fn extract(&self, url: &str) -> Result<ExtractOutcome, FetchError> {
        let document = self.fetcher.fetch(url).await?;

        if !document.is_html() {
            return Ok(ExtractOutcome::NonHtml {
                content_type: document.content_type,
            });
        }

        Ok(ExtractOutcome::Document(self.extractor.extract(&document.text())))
    }

    pub async fn metadata(&self, url: &str) -> Result<WebsiteMetadata> {
        let document = self.fetcher.fetch(url).await?;
        let mut metadata = extract_metadata(&document.text(), &document.url)?;
        metadata.url = url.to_string();
        Ok(metadata)
    }
}

#[async_trait]
impl BasePageExtractor for ContentService {
    async fn extract_page(&self, url: &str) -> Result<ExtractedDocument> {
        Ok(self.extract(url).await?.into_document())
    }
}
