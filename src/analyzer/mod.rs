//! Page analyzers and the registry that runs them
//!
//! An analyzer is anything that wants to look at every fetched page. The
//! crawler hands each successfully parsed page to an [`AnalyzerRegistry`],
//! which runs the registered analyzers in order.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use sumi_sweep::analyzer::{Analyzer, AnalyzerRegistry, EchoUrlAnalyzer};
//! use sumi_sweep::crawler::Document;
//! use sumi_sweep::output::MemorySink;
//!
//! let sink = Arc::new(MemorySink::new());
//! let mut registry = AnalyzerRegistry::new();
//! registry
//!     .add(Arc::new(EchoUrlAnalyzer::new(sink.clone())), Some("echo"), false)
//!     .unwrap();
//!
//! let document = Document::parse("<html></html>", url::Url::parse("http://a.com/").unwrap());
//! registry.execute("http://a.com/", &document);
//! assert_eq!(sink.lines(), vec!["http://a.com/"]);
//! ```

mod echo;
mod registry;

pub use echo::EchoUrlAnalyzer;
pub use registry::{AnalyzerRegistry, HandlerFailure, Lookup, PipelineReport, RegistryError};

use crate::crawler::Document;

/// Per-page processing step run by the crawler
///
/// `process` receives the URL as it sits in the frontier and the parsed page.
/// An `Err` (or a panic) is reported and logged; it never stops the crawl or
/// the analyzers registered after this one.
pub trait Analyzer: Send + Sync {
    fn process(&self, url: &str, document: &Document) -> anyhow::Result<()>;

    /// Name used in logs and failure reports
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

impl<F> Analyzer for F
where
    F: Fn(&str, &Document) -> anyhow::Result<()> + Send + Sync,
{
    fn process(&self, url: &str, document: &Document) -> anyhow::Result<()> {
        self(url, document)
    }
}
