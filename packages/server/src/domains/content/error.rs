use std::time::Duration;

use thiserror::Error;

/// Failure retrieving a remote document. Never retried.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("HTTP {status}: {reason}")]
    Status { status: u16, reason: String },

    #[error("Request timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    #[error("Network error: {0}")]
    Network(String),
}

impl FetchError {
    /// Upstream status code, when the failure came from a non-2xx response.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            FetchError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Internal fault while rewriting or extracting a document.
///
/// Callers degrade instead of propagating: the sanitizer falls back to the
/// original HTML and the extractor to an "Error" record.
#[derive(Error, Debug)]
pub enum TransformError {
    #[error("Invalid selector `{selector}`: {message}")]
    Selector { selector: String, message: String },

    #[error("Invalid base URL `{url}`: {source}")]
    BaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

/// Compile a CSS selector, mapping failures into a `TransformError`.
pub(crate) fn selector(source: &str) -> Result<scraper::Selector, TransformError> {
    scraper::Selector::parse(source).map_err(|err| TransformError::Selector {
        selector: source.to_string(),
        message: format!("{:?}", err),
    })
}
