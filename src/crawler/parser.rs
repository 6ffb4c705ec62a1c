//! HTML parsing and link extraction
//!
//! This module handles:
//! - Turning a fetched body into a `Document` analyzers can query
//! - Pulling raw `href` values out of a document
//! - Deciding which raw hrefs become frontier candidates

use crate::url::{validate_url, with_default_scheme};
use scraper::{Html, Selector};
use url::Url;

/// A parsed page handed to every analyzer
pub struct Document {
    /// The URL the page was served from (after redirects)
    url: Url,

    /// The parsed DOM
    html: Html,

    /// The page title (from <title> tag)
    title: Option<String>,
}

impl Document {
    /// Parses an HTML body
    ///
    /// # Arguments
    ///
    /// * `body` - The HTML content to parse
    /// * `url` - The URL the content was served from
    ///
    /// # Example
    ///
    /// ```
    /// use sumi_sweep::crawler::Document;
    /// use url::Url;
    ///
    /// let html = r#"<html><head><title>Test</title></head><body></body></html>"#;
    /// let document = Document::parse(html, Url::parse("https://example.com/").unwrap());
    /// assert_eq!(document.title(), Some("Test"));
    /// ```
    pub fn parse(body: &str, url: Url) -> Self {
        let html = Html::parse_document(body);
        let title = extract_title(&html);
        Self { url, html, title }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Returns the parsed DOM for selector queries
    pub fn html(&self) -> &Html {
        &self.html
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }
}

/// Extracts the page title from the HTML document
fn extract_title(document: &Html) -> Option<String> {
    let title_selector = Selector::parse("title").ok()?;

    document
        .select(&title_selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Pulls outbound link candidates out of a document
///
/// Implementations return raw href strings in document order. They may
/// include empty or malformed values; admission is decided by the crawler.
pub trait LinkExtractor: Send + Sync {
    fn extract_links(&self, document: &Document) -> Vec<String>;
}

/// Default extractor: every `<a href>` that is not a download link
#[derive(Debug, Default, Clone, Copy)]
pub struct AnchorLinkExtractor;

impl LinkExtractor for AnchorLinkExtractor {
    fn extract_links(&self, document: &Document) -> Vec<String> {
        let Ok(a_selector) = Selector::parse("a[href]") else {
            return Vec::new();
        };

        document
            .html()
            .select(&a_selector)
            .filter(|element| element.value().attr("download").is_none())
            .filter_map(|element| element.value().attr("href"))
            .map(|href| href.trim().to_string())
            .collect()
    }
}

/// Turns a raw href into a frontier candidate
///
/// Returns None if the link should be excluded:
/// - empty hrefs and fragment-only (same page) anchors
/// - `javascript:`, `mailto:`, `tel:` and `data:` links
/// - anything failing the default-scheme URL check
///
/// Relative references (`/path`, `./page`, `../up`, `?query`) are resolved
/// against `base_url` and must pass the same check as absolute links. Every other href is treated the way the root URL is:
/// `http://` is prefixed when it has no `://`, and the result must be
/// well-formed. The returned string is the candidate as written, not the
/// serialized `Url`, so no further normalization happens.
///
/// # Example
///
/// ```
/// use sumi_sweep::crawler::resolve_link;
/// use url::Url;
///
/// let base = Url::parse("https://example.com/docs/").unwrap();
/// assert_eq!(resolve_link("/about", &base), Some("https://example.com/about".to_string()));
/// assert_eq!(resolve_link("other.org", &base), Some("http://other.org".to_string()));
/// assert_eq!(resolve_link("mailto:me@example.com", &base), None);
/// ```
pub fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();

    // Skip empty hrefs and same page anchors
    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    // Skip special schemes
    let lowered = href.to_ascii_lowercase();
    if lowered.starts_with("javascript:")
        || lowered.starts_with("mailto:")
        || lowered.starts_with("tel:")
        || lowered.starts_with("data:")
    {
        return None;
    }

    if href.starts_with('/') || href.starts_with('.') || href.starts_with('?') {
        // The joiner would percent-encode spaces and drop tabs
        if href.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return None;
        }
        let absolute = base_url.join(href).ok()?.to_string();
        validate_url(&absolute).ok()?;
        return Some(absolute);
    }

    validate_url(href).ok()?;
    Some(with_default_scheme(href).into_owned())
}
