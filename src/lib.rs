//! Sumi-Sweep: a breadth-first web crawler with pluggable page analyzers
//!
//! Starting from a root address, the crawler fetches a page, runs every
//! registered analyzer against it, discovers outbound links and enqueues the
//! unseen ones, until the frontier is exhausted, its capacity bound is hit,
//! or the crawl is cancelled.

pub mod analyzer;
pub mod config;
pub mod crawler;
pub mod output;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Sumi-Sweep operations
#[derive(Debug, Error)]
pub enum SweepError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("The supplied root URL {{{url}}} is invalid")]
    InvalidRoot { url: String },

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Invalid state transition: {from:?} -> {to:?}")]
    InvalidTransition {
        from: state::CrawlState,
        to: state::CrawlState,
    },
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Missing host in URL: {0}")]
    MissingHost(String),

    #[error("Malformed URL: {0}")]
    Malformed(String),
}

/// Result type alias for Sumi-Sweep operations
pub type Result<T> = std::result::Result<T, SweepError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use analyzer::{Analyzer, AnalyzerRegistry, EchoUrlAnalyzer};
pub use config::Config;
pub use crawler::{Crawler, Frontier};
pub use output::CrawlStatistics;
pub use state::CrawlState;
pub use crate::url::{is_valid_url, validate_url, with_default_scheme};
