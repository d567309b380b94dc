//! Free-form address bar input classification.
//!
//! Input is either a navigable address or a search query. Both come out as an
//! absolute, scheme-qualified URL. Search queries go to DuckDuckGo because it
//! allows being framed; Google refuses framing and must never be used here.

use serde::Serialize;
use url::Url;

/// Sentinel address of the start page.
pub const HOME_ADDRESS: &str = "hello://home";

/// Search endpoint used for non-address input. Must be frameable.
pub const SEARCH_ENDPOINT: &str = "https://duckduckgo.com/";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InputKind {
    Address,
    SearchQuery,
}

/// Result of classifying address bar input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassifiedInput {
    pub kind: InputKind,
    pub url: String,
}

impl ClassifiedInput {
    /// Title shown on the tab while the destination loads.
    pub fn display_title(&self, raw_input: &str) -> String {
        let raw_input = raw_input.trim();
        match self.kind {
            InputKind::Address => raw_input.to_string(),
            InputKind::SearchQuery => format!("Search: {}", raw_input),
        }
    }
}

/// Classify raw input and normalize it to an absolute URL.
///
/// Total and side-effect free: every input maps to some URL.
pub fn classify(input: &str) -> ClassifiedInput {
    let input = input.trim();

    if is_address_like(input) {
        ClassifiedInput {
            kind: InputKind::Address,
            url: normalize_address(input),
        }
    } else {
        ClassifiedInput {
            kind: InputKind::SearchQuery,
            url: search_url(input),
        }
    }
}

fn is_address_like(input: &str) -> bool {
    let dotted = input.contains('.') && !input.chars().any(char::is_whitespace);
    dotted || has_http_scheme(input)
}

/// True when the input already starts with `http://` or `https://`.
pub fn has_http_scheme(input: &str) -> bool {
    let lower = input.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Prefix `https://` onto addresses that carry no scheme. A typed scheme is
/// lower-cased so host matching sees the canonical form.
pub fn normalize_address(input: &str) -> String {
    let input = input.trim();
    match input.split_once("://") {
        Some((scheme, rest)) if has_http_scheme(input) => {
            format!("{}://{}", scheme.to_ascii_lowercase(), rest)
        }
        _ => format!("https://{}", input),
    }
}

/// Build the embeddable search URL for a query.
pub fn search_url(query: &str) -> String {
    format!("{}?q={}", SEARCH_ENDPOINT, urlencoding::encode(query))
}

/// Decode the literal query text when `url` is a known search results page.
pub fn search_query_of(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let host = parsed.host_str()?.to_ascii_lowercase();

    let is_search_page = host == "duckduckgo.com"
        || host.ends_with(".duckduckgo.com")
        || ((host.contains("google.") || host.ends_with("bing.com"))
            && parsed.path().starts_with("/search"));
    if !is_search_page {
        return None;
    }

    parsed
        .query_pairs()
        .find(|(key, _)| key == "q")
        .map(|(_, value)| value.into_owned())
        .filter(|q| !q.trim().is_empty())
}

/// Strip the scheme for the address bar.
pub fn format_url_for_display(url: &str) -> String {
    url.strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url)
        .to_string()
}

/// Host portion of an address as shown to the user.
pub fn site_name(url: &str) -> String {
    format_url_for_display(url)
        .split('/')
        .next()
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dotted_input_is_address() {
        let classified = classify("openai.com");
        assert_eq!(classified.kind, InputKind::Address);
        assert_eq!(classified.url, "https://openai.com");
    }

    #[test]
    fn test_scheme_is_preserved() {
        let classified = classify("http://localhost:3000/path");
        assert_eq!(classified.kind, InputKind::Address);
        assert_eq!(classified.url, "http://localhost:3000/path");
    }

    #[test]
    fn test_scheme_case_is_normalized() {
        assert_eq!(
            classify("HTTPS://www.youtube.com/watch?v=1").url,
            "https://www.youtube.com/watch?v=1"
        );
        assert_eq!(normalize_address("Http://x.com"), "http://x.com");
        assert_eq!(normalize_address("HTTP://Example.com/Path"), "http://Example.com/Path");
    }

    #[test]
    fn test_words_become_embeddable_search() {
        let classified = classify("quantum computing");
        assert_eq!(classified.kind, InputKind::SearchQuery);
        assert_eq!(
            classified.url,
            "https://duckduckgo.com/?q=quantum%20computing"
        );
        assert!(!classified.url.contains("google."));
    }

    #[test]
    fn test_dotted_input_with_space_is_search() {
        let classified = classify("what is node.js");
        assert_eq!(classified.kind, InputKind::SearchQuery);
        assert!(classified.url.starts_with(SEARCH_ENDPOINT));
    }

    #[test]
    fn test_single_word_is_search() {
        for input in ["rust", "localhost", "weather", "42"] {
            let classified = classify(input);
            assert_eq!(classified.kind, InputKind::SearchQuery, "{}", input);
            assert!(classified.url.starts_with("https://duckduckgo.com/?q="));
        }
    }

    #[test]
    fn test_display_title() {
        let address = classify("openai.com");
        assert_eq!(address.display_title("openai.com"), "openai.com");

        let search = classify("rust traits");
        assert_eq!(search.display_title("rust traits"), "Search: rust traits");
    }

    #[test]
    fn test_search_query_roundtrip() {
        let url = classify("quantum computing & you").url;
        assert_eq!(
            search_query_of(&url).as_deref(),
            Some("quantum computing & you")
        );
    }

    #[test]
    fn test_search_query_of_google_results_page() {
        assert_eq!(
            search_query_of("https://www.google.com/search?q=rust+lang&hl=en").as_deref(),
            Some("rust lang")
        );
        assert_eq!(search_query_of("https://www.google.com/maps?q=x"), None);
        assert_eq!(search_query_of("https://example.com/?q=hello"), None);
    }

    #[test]
    fn test_format_url_for_display() {
        assert_eq!(format_url_for_display("https://a.com/b"), "a.com/b");
        assert_eq!(format_url_for_display("http://a.com"), "a.com");
        assert_eq!(format_url_for_display(HOME_ADDRESS), HOME_ADDRESS);
        assert_eq!(site_name("https://news.ycombinator.com/item?id=1"), "news.ycombinator.com");
    }
}
