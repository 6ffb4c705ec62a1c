//! Crawl statistics
//!
//! Counters collected by the crawler during one traversal and a plain-text
//! renderer for them.

use crate::state::PageOutcome;
use chrono::{DateTime, Utc};

/// Crawl statistics summary
#[derive(Debug, Clone)]
pub struct CrawlStatistics {
    /// When the traversal started
    pub started_at: DateTime<Utc>,

    /// When the traversal returned
    pub finished_at: Option<DateTime<Utc>>,

    /// Pages fetched and run through the analyzer pipeline
    pub pages_processed: u64,

    /// Pages skipped because they could not be fetched or parsed
    pub pages_unavailable: u64,

    /// Analyzer invocations that returned an error or panicked
    pub analyzer_failures: u64,

    /// Raw hrefs returned by the link extractor
    pub links_discovered: u64,

    /// Links newly accepted into the frontier
    pub links_enqueued: u64,

    /// Admissible links the frontier refused (duplicates or over capacity)
    pub links_rejected: u64,

    /// Frontier size when the traversal returned
    pub frontier_size: usize,

    /// Whether the traversal was stopped by cancellation
    pub cancelled: bool,
}

impl CrawlStatistics {
    /// Creates zeroed statistics stamped with the current time
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            finished_at: None,
            pages_processed: 0,
            pages_unavailable: 0,
            analyzer_failures: 0,
            links_discovered: 0,
            links_enqueued: 0,
            links_rejected: 0,
            frontier_size: 0,
            cancelled: false,
        }
    }

    /// Counts one visited frontier entry
    pub fn record_page(&mut self, outcome: PageOutcome) {
        match outcome {
            PageOutcome::Processed => self.pages_processed += 1,
            PageOutcome::Unavailable => self.pages_unavailable += 1,
        }
    }

    /// Stamps the finish time and final frontier size
    pub fn finish(&mut self, frontier_size: usize, cancelled: bool) {
        self.finished_at = Some(Utc::now());
        self.frontier_size = frontier_size;
        self.cancelled = cancelled;
    }

    /// Returns the number of frontier entries visited
    pub fn pages_visited(&self) -> u64 {
        self.pages_processed + self.pages_unavailable
    }

    /// Returns the share of visited pages that were processed, as a percentage
    pub fn success_rate(&self) -> f64 {
        let visited = self.pages_visited();
        if visited == 0 {
            return 0.0;
        }
        (self.pages_processed as f64 / visited as f64) * 100.0
    }

    /// Returns the traversal duration in seconds, once finished
    pub fn duration_seconds(&self) -> Option<i64> {
        self.finished_at
            .map(|finished| (finished - self.started_at).num_seconds())
    }
}

impl Default for CrawlStatistics {
    fn default() -> Self {
        Self::new()
    }
}

/// Prints statistics to stdout in a formatted manner
///
/// # Arguments
///
/// * `stats` - The statistics to display
pub fn print_statistics(stats: &CrawlStatistics) {
    println!("=== Crawl Statistics ===\n");

    println!("Overview:");
    println!("  Started: {}", stats.started_at.to_rfc3339());
    if let Some(finished) = stats.finished_at {
        println!("  Finished: {}", finished.to_rfc3339());
    }
    if let Some(duration) = stats.duration_seconds() {
        println!("  Duration: {}s", duration);
    }
    if stats.cancelled {
        println!("  Stopped early: cancelled");
    }
    println!();

    println!("Pages:");
    println!("  Visited: {}", stats.pages_visited());
    println!("  Processed: {}", stats.pages_processed);
    println!("  Unavailable: {}", stats.pages_unavailable);
    println!("  Analyzer failures: {}", stats.analyzer_failures);
    println!();

    println!("Links:");
    println!("  Discovered: {}", stats.links_discovered);
    println!("  Enqueued: {}", stats.links_enqueued);
    println!("  Rejected by frontier: {}", stats.links_rejected);
    println!("  Final frontier size: {}", stats.frontier_size);
    println!();

    println!(
        "Success Rate: {:.1}% ({} / {} pages successfully processed)",
        stats.success_rate(),
        stats.pages_processed,
        stats.pages_visited()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_statistics_are_zeroed() {
        let stats = CrawlStatistics::new();
        assert_eq!(stats.pages_visited(), 0);
        assert_eq!(stats.success_rate(), 0.0);
        assert!(stats.finished_at.is_none());
        assert!(stats.duration_seconds().is_none());
    }

    #[test]
    fn test_record_page() {
        let mut stats = CrawlStatistics::new();
        stats.record_page(PageOutcome::Processed);
        stats.record_page(PageOutcome::Processed);
        stats.record_page(PageOutcome::Processed);
        stats.record_page(PageOutcome::Unavailable);

        assert_eq!(stats.pages_processed, 3);
        assert_eq!(stats.pages_unavailable, 1);
        assert_eq!(stats.pages_visited(), 4);
        assert!((stats.success_rate() - 75.0).abs() < 0.01);
    }

    #[test]
    fn test_finish() {
        let mut stats = CrawlStatistics::new();
        stats.finish(12, true);

        assert_eq!(stats.frontier_size, 12);
        assert!(stats.cancelled);
        assert!(stats.finished_at.is_some());
        assert!(stats.duration_seconds().unwrap() >= 0);
    }
}
