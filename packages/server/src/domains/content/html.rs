//! Small HTML helpers shared by the sanitizer, the extractor and the error page.

use scraper::node::Element;

/// Class or id markers that identify advertisement containers.
pub const AD_MARKERS: &[&str] = &["ad", "ads", "advert", "advertisement", "adsbygoogle", "ad-banner"];

/// Elements that never carry a closing tag.
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Elements whose text children are emitted without escaping.
pub const RAW_TEXT_ELEMENTS: &[&str] = &["style", "script", "xmp", "noembed", "noframes"];

/// True when the element is tagged as an advertisement by class or id.
pub fn is_ad_marker(element: &Element) -> bool {
    let marked = |value: &str| AD_MARKERS.iter().any(|m| value.eq_ignore_ascii_case(m));
    element.classes().any(marked) || element.id().is_some_and(marked)
}

/// Escape text content for inclusion between tags.
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape an attribute value for inclusion inside double quotes.
pub fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            _ => out.push(c),
        }
    }
    out
}
