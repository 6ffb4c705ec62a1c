//! Crawler - main crawl orchestration logic
//!
//! This module contains the traversal loop that ties together:
//! - The frontier (what to visit, in what order)
//! - The analyzer registry (what to do with each page)
//! - Page fetching and link extraction
//! - Cancellation and lifecycle checks
//!
//! The loop is sequential. The only suspension point is the fetch, and the
//! parsed document never lives across it.

use crate::analyzer::AnalyzerRegistry;
use crate::config::{validate, Config};
use crate::crawler::fetcher::{FetchedPage, HttpFetcher, PageFetcher};
use crate::crawler::frontier::Frontier;
use crate::crawler::parser::{resolve_link, AnchorLinkExtractor, Document, LinkExtractor};
use crate::output::CrawlStatistics;
use crate::state::{CrawlState, PageOutcome};
use crate::url::{validate_url, with_default_scheme};
use crate::{Result, SweepError};
use std::sync::Arc;
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use url::Url;

/// Breadth-first crawler over a single root
///
/// A crawler is single use. It is created `Idle` with its frontier seeded
/// with the root, and one call to [`Crawler::crawl`] consumes the frontier.
pub struct Crawler {
    root: String,
    frontier: Frontier,
    registry: AnalyzerRegistry,
    fetcher: Arc<dyn PageFetcher>,
    extractor: Arc<dyn LinkExtractor>,
    state: CrawlState,
}

impl Crawler {
    /// Creates a crawler that fetches over HTTP
    ///
    /// # Arguments
    ///
    /// * `root` - Starting address; `http://` is prefixed when it has no scheme
    /// * `registry` - Analyzers to run on every page; `None` starts with an empty registry
    /// * `config` - Supplies `max-crawls` and the HTTP client settings
    ///
    /// # Returns
    ///
    /// * `Ok(Crawler)` - Root accepted, frontier seeded
    /// * `Err(SweepError::InvalidRoot)` - The root is not a well-formed URL
    /// * `Err(SweepError::Config)` - The configuration fails validation
    /// * `Err(SweepError::Reqwest)` - The HTTP client could not be built
    ///
    /// # Example
    ///
    /// ```
    /// use sumi_sweep::{Config, Crawler};
    ///
    /// let crawler = Crawler::new("example.com", None, &Config::default()).unwrap();
    /// assert_eq!(crawler.root(), "http://example.com");
    /// assert_eq!(crawler.frontier().len(), 1);
    /// ```
    pub fn new(root: &str, registry: Option<AnalyzerRegistry>, config: &Config) -> Result<Self> {
        let root = checked_root(root)?;
        validate(config)?;
        let fetcher = HttpFetcher::new(config)?;

        Ok(Self::seeded(
            root,
            registry,
            config.crawler.max_crawls,
            Arc::new(fetcher),
            Arc::new(AnchorLinkExtractor),
        ))
    }

    /// Creates a crawler with caller-supplied fetching and link extraction
    ///
    /// # Arguments
    ///
    /// * `root` - Starting address; `http://` is prefixed when it has no scheme
    /// * `registry` - Analyzers to run on every page
    /// * `max_crawls` - Frontier capacity; zero or negative means unbounded
    /// * `fetcher` - Page acquisition
    /// * `extractor` - Outbound link discovery
    pub fn with_collaborators(
        root: &str,
        registry: Option<AnalyzerRegistry>,
        max_crawls: i64,
        fetcher: Arc<dyn PageFetcher>,
        extractor: Arc<dyn LinkExtractor>,
    ) -> Result<Self> {
        let root = checked_root(root)?;
        Ok(Self::seeded(root, registry, max_crawls, fetcher, extractor))
    }

    fn seeded(
        root: String,
        registry: Option<AnalyzerRegistry>,
        max_crawls: i64,
        fetcher: Arc<dyn PageFetcher>,
        extractor: Arc<dyn LinkExtractor>,
    ) -> Self {
        let mut frontier = Frontier::from_max_crawls(max_crawls);
        frontier.add(&root);

        tracing::debug!(
            "Crawler created for {} (frontier capacity: {:?})",
            root,
            frontier.capacity()
        );

        Self {
            root,
            frontier,
            registry: registry.unwrap_or_default(),
            fetcher,
            extractor,
            state: CrawlState::Idle,
        }
    }

    /// Returns the root as seeded into the frontier
    pub fn root(&self) -> &str {
        &self.root
    }

    /// Replaces the root and reseeds the frontier
    ///
    /// Only legal before the crawl starts. An invalid root leaves the crawler
    /// untouched.
    pub fn set_root(&mut self, root: &str) -> Result<()> {
        if !self.state.is_idle() {
            return Err(SweepError::InvalidTransition {
                from: self.state,
                to: CrawlState::Idle,
            });
        }

        let root = checked_root(root)?;

        let mut frontier = Frontier::new(self.frontier.capacity());
        frontier.add(&root);
        self.frontier = frontier;
        self.root = root;

        Ok(())
    }

    pub fn state(&self) -> CrawlState {
        self.state
    }

    pub fn frontier(&self) -> &Frontier {
        &self.frontier
    }

    pub fn registry(&self) -> &AnalyzerRegistry {
        &self.registry
    }

    /// Gives access to the registry for adding or removing analyzers
    pub fn registry_mut(&mut self) -> &mut AnalyzerRegistry {
        &mut self.registry
    }

    /// Runs the traversal to completion
    ///
    /// Equivalent to [`Crawler::crawl_with_cancellation`] with a token that is
    /// never cancelled.
    pub async fn crawl(&mut self) -> Result<CrawlStatistics> {
        self.crawl_with_cancellation(CancellationToken::new()).await
    }

    /// Runs the traversal until the frontier is exhausted or `cancel` fires
    ///
    /// For each frontier entry in order:
    /// 1. Fetches the page; any failure marks it unavailable and moves on
    /// 2. Runs every analyzer against the parsed page
    /// 3. Extracts links, keeps the admissible ones and adds them to the frontier
    ///
    /// Links added in step 3 are visited later in the same traversal. The
    /// token is checked before every fetch and while a fetch is in flight.
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlStatistics)` - The traversal ran (possibly cancelled)
    /// * `Err(SweepError::InvalidTransition)` - This crawler was already used
    pub async fn crawl_with_cancellation(
        &mut self,
        cancel: CancellationToken,
    ) -> Result<CrawlStatistics> {
        self.transition(CrawlState::Traversing)?;

        tracing::info!("Starting crawl from {}", self.root);

        let mut stats = CrawlStatistics::new();
        let mut cancelled = false;
        let start_time = Instant::now();

        while self.frontier.valid() {
            if cancel.is_cancelled() {
                cancelled = true;
                break;
            }

            let Some(url) = self.frontier.current().map(str::to_string) else {
                break;
            };
            tracing::debug!("Processing URL: {}", url);

            let fetched = tokio::select! {
                biased;
                _ = cancel.cancelled() => None,
                result = self.fetcher.fetch(&url) => Some(result),
            };

            let Some(fetched) = fetched else {
                tracing::info!("Crawl cancelled while fetching {}", url);
                cancelled = true;
                break;
            };

            let outcome = match fetched {
                Ok(page) => self.process_page(&url, page, &mut stats),
                Err(e) => {
                    tracing::info!("Skipping {}: {}", url, e);
                    PageOutcome::Unavailable
                }
            };
            stats.record_page(outcome);

            self.frontier.next();

            let visited = stats.pages_visited();
            if visited % 10 == 0 {
                let rate = visited as f64 / start_time.elapsed().as_secs_f64();
                tracing::info!(
                    "Progress: {} pages visited, {} pending in frontier, {:.2} pages/sec",
                    visited,
                    self.frontier.pending(),
                    rate
                );
            }
        }

        if cancelled {
            tracing::info!("Crawl cancelled");
        }

        self.transition(CrawlState::Finished)?;
        stats.finish(self.frontier.len(), cancelled);

        tracing::info!(
            "Crawl completed: {} pages visited ({} unavailable) in {:?}",
            stats.pages_visited(),
            stats.pages_unavailable,
            start_time.elapsed()
        );

        Ok(stats)
    }

    /// Runs analyzers and link admission for one fetched page
    ///
    /// Kept synchronous: the parsed document is not `Send` and must be
    /// dropped before the next fetch is awaited.
    fn process_page(
        &mut self,
        url: &str,
        page: FetchedPage,
        stats: &mut CrawlStatistics,
    ) -> PageOutcome {
        let base = match Url::parse(&page.final_url) {
            Ok(base) => base,
            Err(e) => {
                tracing::warn!("Unusable final URL {} for {}: {}", page.final_url, url, e);
                return PageOutcome::Unavailable;
            }
        };

        let document = Document::parse(&page.body, base);

        let report = self.registry.execute(url, &document);
        stats.analyzer_failures += report.failures.len() as u64;

        let raw_links = self.extractor.extract_links(&document);
        stats.links_discovered += raw_links.len() as u64;

        let candidates: Vec<String> = raw_links
            .iter()
            .filter_map(|href| {
                let candidate = resolve_link(href, document.url());
                if candidate.is_none() {
                    tracing::trace!("Ignoring link {:?} on {}", href, url);
                }
                candidate
            })
            .collect();

        let admitted = candidates.len() as u64;
        match self.frontier.add_from(&candidates) {
            Ok(()) => stats.links_enqueued += admitted,
            Err(rejected) => {
                tracing::trace!("Frontier refused {} links from {}", rejected.len(), url);
                stats.links_rejected += rejected.len() as u64;
                stats.links_enqueued += admitted - rejected.len() as u64;
            }
        }

        PageOutcome::Processed
    }

    fn transition(&mut self, next: CrawlState) -> Result<()> {
        if !self.state.can_transition_to(next) {
            return Err(SweepError::InvalidTransition {
                from: self.state,
                to: next,
            });
        }
        self.state = next;
        Ok(())
    }
}

impl std::fmt::Debug for Crawler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Crawler")
            .field("root", &self.root)
            .field("state", &self.state)
            .field("frontier", &self.frontier)
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

/// Applies the default scheme and checks the result is a usable URL
fn checked_root(root: &str) -> Result<String> {
    match validate_url(root) {
        Ok(_) => Ok(with_default_scheme(root).into_owned()),
        Err(e) => {
            tracing::debug!("Rejected root {:?}: {}", root, e);
            Err(SweepError::InvalidRoot {
                url: root.to_string(),
            })
        }
    }
}

/// Runs a complete crawl from `root` with the HTTP fetcher
///
/// # Arguments
///
/// * `root` - Starting address
/// * `registry` - Analyzers to run on every page
/// * `config` - The crawler configuration
///
/// # Example
///
/// ```no_run
/// use sumi_sweep::analyzer::{AnalyzerRegistry, EchoUrlAnalyzer};
/// use sumi_sweep::config::Config;
/// use std::sync::Arc;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let mut registry = AnalyzerRegistry::new();
/// registry.add(Arc::new(EchoUrlAnalyzer::stdout()), Some("echo"), false)?;
/// let stats = sumi_sweep::crawler::run_crawl("example.com", registry, &Config::default()).await?;
/// println!("{} pages visited", stats.pages_visited());
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(
    root: &str,
    registry: AnalyzerRegistry,
    config: &Config,
) -> Result<CrawlStatistics> {
    let mut crawler = Crawler::new(root, Some(registry), config)?;
    crawler.crawl().await
}
