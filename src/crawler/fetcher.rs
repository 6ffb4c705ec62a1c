//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building HTTP clients with proper user agent strings
//! - GET requests to fetch page content
//! - Error classification
//!
//! The crawler only cares whether a page is available. The error variants
//! exist so the reason shows up in logs.

use crate::config::Config;
use async_trait::async_trait;
use reqwest::{redirect::Policy, Client};
use std::time::Duration;
use thiserror::Error;

/// A successfully fetched HTML page
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Final URL after redirects
    pub final_url: String,
    /// HTTP status code
    pub status_code: u16,
    /// Page body content
    pub body: String,
}

/// Reasons a page could not be acquired
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection refused, DNS failure, TLS error, timeout
    #[error("Network error for {url}: {message}")]
    Network { url: String, message: String },

    /// Non-success HTTP status
    #[error("HTTP {status_code} for {url}")]
    Status { url: String, status_code: u16 },

    /// Page is not HTML
    #[error("Expected HTML from {url}, got {content_type}")]
    ContentMismatch { url: String, content_type: String },

    /// Body could not be read
    #[error("Failed to read body of {url}: {message}")]
    Body { url: String, message: String },
}

/// Result of a fetch operation
pub type FetchResult = Result<FetchedPage, FetchError>;

/// Page acquisition seam used by the crawler
///
/// Every `Err` is treated the same way: the URL is skipped and the crawl
/// moves on. There are no retries.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> FetchResult;
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The crawler configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use sumi_sweep::config::Config;
/// use sumi_sweep::crawler::build_http_client;
///
/// let client = build_http_client(&Config::default()).unwrap();
/// ```
pub fn build_http_client(config: &Config) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.header_value())
        .timeout(Duration::from_secs(config.crawler.request_timeout))
        .connect_timeout(Duration::from_secs(config.crawler.connect_timeout))
        .redirect(Policy::limited(config.crawler.max_redirects))
        .gzip(true)
        .brotli(true)
        .build()
}

/// `PageFetcher` backed by a reqwest client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Builds a fetcher from the crawler configuration
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(config)?,
        })
    }

    /// Wraps an already configured client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> FetchResult {
        fetch_url(&self.client, url).await
    }
}

/// Fetches a URL and classifies the outcome
///
/// # Classification
///
/// | Condition | Result |
/// |-----------|--------|
/// | Timeout / connection failure | `Network` |
/// | Non-2xx status | `Status` |
/// | Content-Type present and not HTML | `ContentMismatch` |
/// | Body read failure | `Body` |
/// | Otherwise | `Ok(FetchedPage)` |
///
/// A missing Content-Type header is accepted as HTML.
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The URL to fetch
pub async fn fetch_url(client: &Client, url: &str) -> FetchResult {
    let response = client.get(url).send().await.map_err(|e| {
        // Classify error
        let message = if e.is_timeout() {
            "Request timeout".to_string()
        } else if e.is_connect() {
            format!("Connection failed: {}", e)
        } else if e.is_redirect() {
            format!("Redirect error: {}", e)
        } else {
            e.to_string()
        };
        FetchError::Network {
            url: url.to_string(),
            message,
        }
    })?;

    let status = response.status();
    let final_url = response.url().to_string();

    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status_code: status.as_u16(),
        });
    }

    // Check Content-Type
    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    if !content_type.is_empty() && !is_html_content_type(&content_type) {
        return Err(FetchError::ContentMismatch {
            url: url.to_string(),
            content_type,
        });
    }

    let body = response.text().await.map_err(|e| FetchError::Body {
        url: url.to_string(),
        message: e.to_string(),
    })?;

    Ok(FetchedPage {
        final_url,
        status_code: status.as_u16(),
        body,
    })
}

/// Returns true for `text/html` and `application/xhtml+xml` content types
fn is_html_content_type(content_type: &str) -> bool {
    let lowered = content_type.to_ascii_lowercase();
    lowered.contains("text/html") || lowered.contains("application/xhtml+xml")
}
