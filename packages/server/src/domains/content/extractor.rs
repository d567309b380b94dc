//! Main-content extraction for the reader and the extract endpoint.

use scraper::node::Element;
use scraper::{ElementRef, Html, Node};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::error::{selector, TransformError};
use super::html::is_ad_marker;

pub const DEFAULT_MAX_CONTENT_CHARS: usize = 8000;

const UNTITLED: &str = "Untitled";
const TRUNCATION_MARKER: &str = "...";

/// Candidate containers for the primary content, most specific first.
const CONTENT_SELECTORS: &[&str] = &[
    "main",
    "[role='main']",
    "article",
    ".content",
    ".main-content",
    ".post-content",
    ".entry-content",
    ".article-body",
    ".story-body",
    "#content",
    "#main",
];

/// Subtrees that never contribute text.
const EXCLUDED_TAGS: &[&str] = &[
    "script", "style", "noscript", "template", "nav", "header", "footer", "aside", "iframe",
];

const BLOCK_TAGS: &[&str] = &[
    "address", "article", "blockquote", "br", "dd", "div", "dl", "dt", "figcaption", "figure",
    "h1", "h2", "h3", "h4", "h5", "h6", "hr", "li", "main", "ol", "p", "pre", "section", "table",
    "td", "th", "tr", "ul",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedDocument {
    pub title: String,
    pub content: String,
    pub description: String,
    pub keywords: String,
    pub author: String,
    /// Character count of `content`.
    pub length: usize,
    pub word_count: usize,
}

impl ExtractedDocument {
    /// Record returned when extraction hits an internal fault.
    pub fn failed() -> Self {
        Self {
            title: "Error".to_string(),
            content: "Failed to extract content from this page.".to_string(),
            description: String::new(),
            keywords: String::new(),
            author: String::new(),
            length: 0,
            word_count: 0,
        }
    }

    /// Record describing a response that is not HTML.
    pub fn non_html(content_type: &str) -> Self {
        Self {
            title: "Non-HTML Content".to_string(),
            content: format!("This is a {} file.", content_type),
            description: String::new(),
            keywords: String::new(),
            author: String::new(),
            length: 0,
            word_count: 0,
        }
    }

    /// True when extraction produced readable text.
    pub fn has_content(&self) -> bool {
        self.length > 0 && !self.content.trim().is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct ContentExtractor {
    max_chars: usize,
}

impl Default for ContentExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CONTENT_CHARS)
    }
}

impl ContentExtractor {
    pub fn new(max_chars: usize) -> Self {
        Self { max_chars }
    }

    /// Extract readable text, degrading to [`ExtractedDocument::failed`].
    pub fn extract(&self, html: &str) -> ExtractedDocument {
        match self.try_extract(html) {
            Ok(document) => document,
            Err(e) => {
                warn!(error = %e, "Content extraction failed");
                ExtractedDocument::failed()
            }
        }
    }

    pub fn try_extract(&self, html: &str) -> Result<ExtractedDocument, TransformError> {
        let document = Html::parse_document(html);

        let title = document
            .select(&selector("title")?)
            .next()
            .map(|el| collapse_whitespace(&el.text().collect::<String>()))
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| UNTITLED.to_string());

        let mut body_text = None;
        'candidates: for source in CONTENT_SELECTORS {
            for candidate in document.select(&selector(source)?) {
                if inside_excluded(candidate) {
                    continue;
                }
                let text = collapse_whitespace(&visible_text(candidate));
                if !text.is_empty() {
                    body_text = Some(text);
                    break 'candidates;
                }
            }
        }

        let text = match body_text {
            Some(text) => text,
            None => {
                let body = document
                    .select(&selector("body")?)
                    .next()
                    .unwrap_or_else(|| document.root_element());
                collapse_whitespace(&visible_text(body))
            }
        };

        let content = truncate_chars(&text, self.max_chars);

        Ok(ExtractedDocument {
            title,
            length: content.chars().count(),
            word_count: content.split_whitespace().count(),
            content,
            description: meta_content(&document, "description")?,
            keywords: meta_content(&document, "keywords")?,
            author: meta_content(&document, "author")?,
        })
    }
}

fn is_excluded(element: &Element) -> bool {
    EXCLUDED_TAGS.contains(&element.name()) || is_ad_marker(element)
}

fn inside_excluded(element: ElementRef<'_>) -> bool {
    is_excluded(element.value())
        || element
            .ancestors()
            .filter_map(ElementRef::wrap)
            .any(|ancestor| is_excluded(ancestor.value()))
}

/// Concatenated text of the subtree, skipping excluded elements and
/// separating block elements with spaces.
fn visible_text(element: ElementRef<'_>) -> String {
    let mut out = String::new();
    collect_text(element, &mut out);
    out
}

fn collect_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(_) => {
                let Some(child) = ElementRef::wrap(child) else {
                    continue;
                };
                if is_excluded(child.value()) {
                    continue;
                }
                let block = BLOCK_TAGS.contains(&child.value().name());
                if block {
                    out.push(' ');
                }
                collect_text(child, out);
                if block {
                    out.push(' ');
                }
            }
            _ => {}
        }
    }
}

/// Collapse whitespace runs (including non-breaking spaces) to one space.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Cap `text` at `max_chars` characters, marking the cut with an ellipsis.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}{}", &text[..cut], TRUNCATION_MARKER),
        None => text.to_string(),
    }
}

fn meta_content(document: &Html, name: &str) -> Result<String, TransformError> {
    let query = format!("meta[name=\"{}\"]", name);
    Ok(document
        .select(&selector(&query)?)
        .find_map(|el| el.value().attr("content"))
        .map(|content| content.trim().to_string())
        .unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(html: &str) -> ExtractedDocument {
        ContentExtractor::default().try_extract(html).unwrap()
    }

    #[test]
    fn test_prefers_main_landmark() {
        let doc = extract(
            r#"<html><head><title> My  Page </title></head><body>
            <nav>Home | About</nav>
            <main><h1>Headline</h1><p>First paragraph.</p></main>
            <footer>Copyright</footer></body></html>"#,
        );
        assert_eq!(doc.title, "My Page");
        assert_eq!(doc.content, "Headline First paragraph.");
        assert_eq!(doc.word_count, 3);
        assert_eq!(doc.length, doc.content.chars().count());
    }

    #[test]
    fn test_falls_back_to_body_without_chrome() {
        let doc = extract(
            r#"<html><body><header>Site header</header><div>Body text here</div>
            <script>var x = 1;</script><aside>Related</aside><div class="ad">Ad copy</div></body></html>"#,
        );
        assert_eq!(doc.content, "Body text here");
    }

    #[test]
    fn test_skips_empty_candidates() {
        let doc = extract(
            r#"<html><body><main>   </main><article><p>Real article</p></article></body></html>"#,
        );
        assert_eq!(doc.content, "Real article");
    }

    #[test]
    fn test_skips_candidates_inside_chrome() {
        let doc = extract(
            r#"<html><body><footer><div class="content">Footer content</div></footer>
            <div id="content">Page content</div></body></html>"#,
        );
        assert_eq!(doc.content, "Page content");
    }

    #[test]
    fn test_collapses_non_breaking_spaces() {
        let doc = extract("<html><body><p>Hello &nbsp;&nbsp;World</p></body></html>");
        assert_eq!(doc.content, "Hello World");
        assert_eq!(doc.word_count, 2);
    }

    #[test]
    fn test_bare_article_without_title() {
        let doc = extract("<body><article>Hello &nbsp;&nbsp;World</article></body>");
        assert_eq!(doc.content, "Hello World");
        assert_eq!(doc.title, "Untitled");
        assert_eq!(doc.length, 11);
        assert_eq!(doc.word_count, 2);
    }

    #[test]
    fn test_missing_title_is_untitled() {
        let doc = extract("<html><body><p>Text</p></body></html>");
        assert_eq!(doc.title, "Untitled");
    }

    #[test]
    fn test_truncates_long_content() {
        let words = "word ".repeat(3000);
        let doc = ContentExtractor::new(100)
            .try_extract(&format!("<html><body><main>{}</main></body></html>", words))
            .unwrap();
        assert!(doc.content.ends_with("..."));
        assert_eq!(doc.length, 103);
    }

    #[test]
    fn test_truncation_counts_characters() {
        assert_eq!(truncate_chars("héllo wörld", 5), "héllo...");
        assert_eq!(truncate_chars("short", 5), "short");
    }

    #[test]
    fn test_reads_meta_tags() {
        let doc = extract(
            r#"<html><head>
            <meta name="description" content="A page about things">
            <meta name="keywords" content="things, stuff">
            <meta name="author" content="Jo Writer">
            </head><body><p>x</p></body></html>"#,
        );
        assert_eq!(doc.description, "A page about things");
        assert_eq!(doc.keywords, "things, stuff");
        assert_eq!(doc.author, "Jo Writer");
    }

    #[test]
    fn test_failed_and_non_html_records() {
        let failed = ExtractedDocument::failed();
        assert_eq!(failed.title, "Error");
        assert_eq!(failed.length, 0);
        assert!(!failed.has_content());

        let pdf = ExtractedDocument::non_html("application/pdf");
        assert_eq!(pdf.content, "This is a application/pdf file.");
        assert!(!pdf.has_content());
    }
}
