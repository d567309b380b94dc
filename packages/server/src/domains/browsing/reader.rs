//! Reader acquisition: extract the page, ask the text generator, and fall back
//! to a templated explanation when either step fails.

use tracing::{debug, warn};

use super::models::ReaderContent;
use crate::common::{search_query_of, site_name};
use crate::domains::content::ExtractedDocument;
use crate::kernel::{BasePageExtractor, BaseTextGenerator};

/// Query sent to the generator for `address`, given what extraction produced.
pub fn build_query(address: &str, extracted: Option<&ExtractedDocument>) -> String {
    if let Some(document) = extracted.filter(|d| d.has_content()) {
        return format!(
            "Analyze and summarize this website content: {}",
            document.content
        );
    }

    match search_query_of(address) {
        Some(query) => query,
        None => format!("Summarize and explain the website: {}", address),
    }
}

/// Text shown when acquisition fails.
pub fn fallback_content(address: &str) -> ReaderContent {
    ReaderContent {
        text: format!(
            "Hello Net is optimizing your browsing experience for {}.\n\n\
             This site has been processed through our AI Reader to provide you with the most \
             relevant information in a mobile-friendly format.\n\n\
             For the full desktop experience, you can always open the site in a new tab using \
             the button above.",
            site_name(address)
        ),
        sources: vec![],
        fallback: true,
    }
}

/// Produce reader content for `address`. Never fails.
pub async fn acquire(
    extractor: &dyn BasePageExtractor,
    generator: &dyn BaseTextGenerator,
    address: &str,
) -> ReaderContent {
    let extracted = match extractor.extract_page(address).await {
        Ok(document) => Some(document),
        Err(e) => {
            warn!(url = %address, error = %e, "Reader extraction failed");
            None
        }
    };

    let query = build_query(address, extracted.as_ref());
    debug!(url = %address, query_len = query.len(), "Requesting reader summary");

    match generator.generate(&query).await {
        Ok(answer) => ReaderContent {
            text: answer.text,
            sources: answer.sources,
            fallback: false,
        },
        Err(e) => {
            warn!(url = %address, error = %e, "Reader generation failed, using fallback");
            fallback_content(address)
        }
    }
}
