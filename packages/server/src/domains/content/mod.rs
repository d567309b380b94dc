//! Content domain - fetches remote pages and rewrites them for the embedded frame.
//!
//! Pipeline: ContentFetcher → HtmlSanitizer (proxy) or ContentExtractor (extract).

pub mod error;
pub mod extractor;
pub mod fetcher;
pub mod html;
pub mod metadata;
pub mod sanitizer;
pub mod service;

pub use error::{FetchError, TransformError};
pub use extractor::{ContentExtractor, ExtractedDocument, DEFAULT_MAX_CONTENT_CHARS};
pub use fetcher::{ContentFetcher, FetchedDocument, FetcherConfig};
pub use metadata::{extract_metadata, WebsiteMetadata};
pub use sanitizer::HtmlSanitizer;
pub use service::{ContentService, ExtractOutcome, ProxyOutcome};
