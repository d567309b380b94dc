//! Page metadata for link previews.

use scraper::Html;
use serde::Serialize;
use url::Url;

use super::error::{selector, TransformError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebsiteMetadata {
    pub url: String,
    pub title: String,
    pub description: String,
    pub keywords: String,
    pub author: String,
    pub image: String,
    pub site_name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub locale: String,
    pub favicon: String,
    pub canonical: String,
    pub robots: String,
    pub viewport: String,
    pub charset: String,
    pub language: String,
    pub generator: String,
    pub theme: String,
}

/// Read preview metadata from `html`, resolving image and favicon against `page_url`.
pub fn extract_metadata(html: &str, page_url: &str) -> Result<WebsiteMetadata, TransformError> {
    let document = Html::parse_document(html);
    let base = Url::parse(page_url).map_err(|source| TransformError::BaseUrl {
        url: page_url.to_string(),
        source,
    })?;

    let first_attr = |query: &str, attr: &str| -> Result<Option<String>, TransformError> {
        Ok(document
            .select(&selector(query)?)
            .find_map(|el| el.value().attr(attr))
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty()))
    };
    let first_of = |candidates: &[(&str, &str)]| -> Result<Option<String>, TransformError> {
        for &(query, attr) in candidates {
            if let Some(value) = first_attr(query, attr)? {
                return Ok(Some(value));
            }
        }
        Ok(None)
    };

    let title = document
        .select(&selector("title")?)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .unwrap_or_default();

    let image = first_of(&[
        ("meta[property=\"og:image\"]", "content"),
        ("meta[name=\"twitter:image\"]", "content"),
    ])?
    .map(|image| absolutize(&base, &image))
    .unwrap_or_default();

    let favicon = first_of(&[
        ("link[rel=\"icon\"]", "href"),
        ("link[rel=\"shortcut icon\"]", "href"),
    ])?
    .unwrap_or_else(|| "/favicon.ico".to_string());

    Ok(WebsiteMetadata {
        url: page_url.to_string(),
        title,
        description: first_of(&[
            ("meta[name=\"description\"]", "content"),
            ("meta[property=\"og:description\"]", "content"),
        ])?
        .unwrap_or_default(),
        keywords: first_attr("meta[name=\"keywords\"]", "content")?.unwrap_or_default(),
        author: first_attr("meta[name=\"author\"]", "content")?.unwrap_or_default(),
        image,
        site_name: first_attr("meta[property=\"og:site_name\"]", "content")?.unwrap_or_default(),
        kind: first_attr("meta[property=\"og:type\"]", "content")?
            .unwrap_or_else(|| "website".to_string()),
        locale: first_attr("meta[property=\"og:locale\"]", "content")?
            .unwrap_or_else(|| "en_US".to_string()),
        favicon: absolutize(&base, &favicon),
        canonical: first_attr("link[rel=\"canonical\"]", "href")?
            .unwrap_or_else(|| page_url.to_string()),
        robots: first_attr("meta[name=\"robots\"]", "content")?.unwrap_or_default(),
        viewport: first_attr("meta[name=\"viewport\"]", "content")?.unwrap_or_default(),
        charset: first_attr("meta[charset]", "charset")?.unwrap_or_else(|| "utf-8".to_string()),
        language: first_attr("html", "lang")?.unwrap_or_else(|| "en".to_string()),
        generator: first_attr("meta[name=\"generator\"]", "content")?.unwrap_or_default(),
        theme: first_attr("meta[name=\"theme-color\"]", "content")?.unwrap_or_default(),
    })
}

fn absolutize(base: &Url, reference: &str) -> String {
    base.join(reference)
        .map(String::from)
        .unwrap_or_else(|_| reference.to_string())
}
