//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `CrawlState`: Lifecycle of a crawler instance (idle, traversing, finished)
//! - `PageOutcome`: What happened to one visited frontier entry

mod crawl_state;
mod page_outcome;

// Re-export main types
pub use crawl_state::CrawlState;
pub use page_outcome::PageOutcome;
