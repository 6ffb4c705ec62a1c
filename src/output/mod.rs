//! Output module for analyzer text and crawl statistics
//!
//! This module handles:
//! - The `OutputSink` seam analyzers write through
//! - Stdout, file and in-memory sinks
//! - Recording and printing crawl statistics

mod sinks;
pub mod stats;
mod traits;

pub use sinks::{MemorySink, StdoutSink, WriterSink};
pub use stats::{print_statistics, CrawlStatistics};
pub use traits::{OutputError, OutputResult, OutputSink};
