//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - The bounded, duplicate-free frontier
//! - HTTP fetching behind the `PageFetcher` seam
//! - HTML parsing, link extraction and link admission
//! - Overall crawl orchestration

mod coordinator;
mod fetcher;
mod frontier;
mod parser;

pub use coordinator::{run_crawl, Crawler};
pub use fetcher::{
    build_http_client, fetch_url, FetchError, FetchResult, FetchedPage, HttpFetcher, PageFetcher,
};
pub use frontier::Frontier;
pub use parser::{resolve_link, AnchorLinkExtractor, Document, LinkExtractor};

use crate::analyzer::AnalyzerRegistry;
use crate::config::Config;
use crate::output::CrawlStatistics;
use crate::SweepError;

/// Runs a complete crawl with an empty analyzer registry
///
/// This is the simplest entry point. It will:
/// 1. Validate the root and seed the frontier
/// 2. Build the HTTP client from the configuration
/// 3. Fetch pages breadth-first, following admissible links
/// 4. Return the crawl statistics
///
/// # Arguments
///
/// * `root` - Starting address
/// * `config` - The crawler configuration
///
/// # Returns
///
/// * `Ok(CrawlStatistics)` - Crawl completed
/// * `Err(SweepError)` - The crawler could not be constructed
pub async fn crawl(root: &str, config: &Config) -> Result<CrawlStatistics, SweepError> {
    run_crawl(root, AnalyzerRegistry::new(), config).await
}
