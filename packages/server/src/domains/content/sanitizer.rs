//! HTML rewriting for display inside the embedded frame.
//!
//! The sanitizer re-serializes a parsed document while:
//! - dropping script, embed, object, noscript and iframe elements plus ad containers
//! - rewriting relative `href`/`src`/`poster` references against the page URL
//! - injecting a mobile viewport meta tag and the compact stylesheet when absent
//!
//! Sanitizing its own output is a no-op apart from whitespace.

use scraper::node::Element;
use scraper::{ElementRef, Html, Node};
use tracing::warn;
use url::Url;

use super::error::TransformError;
use super::html::{escape_attr, escape_text, is_ad_marker, RAW_TEXT_ELEMENTS, VOID_ELEMENTS};

pub const VIEWPORT_CONTENT: &str =
    "width=device-width, initial-scale=1.0, maximum-scale=1.0, user-scalable=no";

/// Marker id of the injected stylesheet; its presence keeps injection idempotent.
pub const COMPACT_STYLESHEET_ID: &str = "hello-net-compact";

pub const COMPACT_STYLESHEET: &str = "body{max-width:100%!important;overflow-x:hidden!important;\
font-size:16px!important;line-height:1.5!important;margin:0!important;padding:8px!important}\
img,video{max-width:100%!important;height:auto!important}\
table{display:block!important;overflow-x:auto!important;max-width:100%!important}\
pre,code{white-space:pre-wrap!important;word-break:break-word!important}\
.sidebar,.ads,.advertisement{display:none!important}";

const STRIPPED_TAGS: &[&str] = &["script", "noscript", "iframe", "frame", "embed", "object"];

const REFERENCE_ATTRIBUTES: &[&str] = &["href", "src", "poster"];

#[derive(Debug, Clone, Default)]
pub struct HtmlSanitizer;

impl HtmlSanitizer {
    pub fn new() -> Self {
        Self
    }

    /// Rewrite `html` for the embedded frame, returning the input unchanged
    /// when the rewrite fails.
    pub fn sanitize(&self, html: &str, base_url: &str) -> String {
        match self.try_sanitize(html, base_url) {
            Ok(rewritten) => rewritten,
            Err(e) => {
                warn!(error = %e, base_url = %base_url, "Sanitize failed, passing HTML through");
                html.to_string()
            }
        }
    }

    pub fn try_sanitize(&self, html: &str, base_url: &str) -> Result<String, TransformError> {
        let base = Url::parse(base_url).map_err(|source| TransformError::BaseUrl {
            url: base_url.to_string(),
            source,
        })?;

        let document = Html::parse_document(html);

        let mut has_viewport = false;
        let mut has_stylesheet = false;
        for element in document.root_element().descendants().filter_map(ElementRef::wrap) {
            let value = element.value();
            match value.name() {
                "meta" => {
                    has_viewport |= value
                        .attr("name")
                        .is_some_and(|name| name.eq_ignore_ascii_case("viewport"));
                }
                "style" => has_stylesheet |= value.id() == Some(COMPACT_STYLESHEET_ID),
                _ => {}
            }
        }

        let mut writer = DocumentWriter {
            base: &base,
            insert_viewport: !has_viewport,
            insert_stylesheet: !has_stylesheet,
            out: String::with_capacity(html.len() + COMPACT_STYLESHEET.len()),
        };

        for child in document.tree.root().children() {
            match child.value() {
                Node::Doctype(doctype) => {
                    writer.out.push_str("<!DOCTYPE ");
                    writer.out.push_str(doctype.name());
                    writer.out.push('>');
                }
                Node::Comment(comment) => writer.write_comment(comment),
                Node::Element(_) => {
                    if let Some(element) = ElementRef::wrap(child) {
                        writer.write_element(element);
                    }
                }
                _ => {}
            }
        }

        Ok(writer.out)
    }
}

/// True for elements the sanitizer drops along with their subtree.
fn is_stripped(element: &Element) -> bool {
    STRIPPED_TAGS.contains(&element.name()) || is_ad_marker(element)
}

struct DocumentWriter<'a> {
    base: &'a Url,
    insert_viewport: bool,
    insert_stylesheet: bool,
    out: String,
}

impl DocumentWriter<'_> {
    fn write_element(&mut self, element: ElementRef<'_>) {
        let value = element.value();
        if is_stripped(value) {
            return;
        }

        let name = value.name();
        self.out.push('<');
        self.out.push_str(name);
        for (attr, attr_value) in value.attrs() {
            let rewritten = if REFERENCE_ATTRIBUTES.contains(&attr) {
                match self.absolutize(attr_value) {
                    Some(reference) => reference,
                    None => continue,
                }
            } else {
                attr_value.to_string()
            };
            self.out.push(' ');
            self.out.push_str(attr);
            self.out.push_str("=\"");
            self.out.push_str(&escape_attr(&rewritten));
            self.out.push('"');
        }
        self.out.push('>');

        if VOID_ELEMENTS.contains(&name) {
            return;
        }

        let raw_text = RAW_TEXT_ELEMENTS.contains(&name);
        for child in element.children() {
            match child.value() {
                Node::Text(text) => {
                    let text: &str = text;
                    if raw_text {
                        self.out.push_str(text);
                    } else {
                        self.out.push_str(&escape_text(text));
                    }
                }
                Node::Comment(comment) => self.write_comment(comment),
                Node::Element(_) => {
                    if let Some(child) = ElementRef::wrap(child) {
                        self.write_element(child);
                    }
                }
                _ => {}
            }
        }

        if name == "head" {
            self.inject_head_extras();
        }

        self.out.push_str("</");
        self.out.push_str(name);
        self.out.push('>');
    }

    fn write_comment(&mut self, comment: &str) {
        self.out.push_str("<!--");
        self.out.push_str(comment);
        self.out.push_str("-->");
    }

    fn inject_head_extras(&mut self) {
        if self.insert_viewport {
            self.out.push_str("<meta name=\"viewport\" content=\"");
            self.out.push_str(VIEWPORT_CONTENT);
            self.out.push_str("\">");
            self.insert_viewport = false;
        }
        if self.insert_stylesheet {
            self.out.push_str("<style id=\"");
            self.out.push_str(COMPACT_STYLESHEET_ID);
            self.out.push_str("\">");
            self.out.push_str(COMPACT_STYLESHEET);
            self.out.push_str("</style>");
            self.insert_stylesheet = false;
        }
    }

    /// Resolve a reference against the page URL. `None` drops the attribute.
    fn absolutize(&self, reference: &str) -> Option<String> {
        let trimmed = reference.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return Some(reference.to_string());
        }
        if Url::parse(trimmed).is_ok() {
            return Some(trimmed.to_string());
        }
        self.base.join(trimmed).ok().map(String::from)
    }
}
