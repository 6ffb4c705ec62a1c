use crate::analyzer::Analyzer;
use crate::crawler::Document;
use crate::output::{OutputSink, StdoutSink};
use std::fmt;
use std::sync::Arc;

/// Writes every visited URL to an output sink, one per line
#[derive(Clone)]
pub struct EchoUrlAnalyzer {
    sink: Arc<dyn OutputSink>,
}

impl EchoUrlAnalyzer {
    pub fn new(sink: Arc<dyn OutputSink>) -> Self {
        Self { sink }
    }

    /// Echoes to standard output
    pub fn stdout() -> Self {
        Self::new(Arc::new(StdoutSink))
    }
}

impl fmt::Debug for EchoUrlAnalyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EchoUrlAnalyzer").finish_non_exhaustive()
    }
}

impl Analyzer for EchoUrlAnalyzer {
    fn process(&self, url: &str, _document: &Document) -> anyhow::Result<()> {
        self.sink.write_line(url)?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "echo-url"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::{MemorySink, OutputError, OutputResult};
    use url::Url;

    struct BrokenSink;

    impl OutputSink for BrokenSink {
        fn write_line(&self, _line: &str) -> OutputResult<()> {
            Err(OutputError::Write("sink closed".to_string()))
        }
    }

    fn document() -> Document {
        Document::parse("<html></html>", Url::parse("http://example.com/").unwrap())
    }

    #[test]
    fn test_echo_writes_frontier_url() {
        let sink = Arc::new(MemorySink::new());
        let analyzer = EchoUrlAnalyzer::new(sink.clone());

        // The frontier string is echoed, not the document's final URL
        analyzer.process("example.com", &document()).unwrap();
        analyzer.process("http://example.com/next", &document()).unwrap();

        assert_eq!(sink.lines(), vec!["example.com", "http://example.com/next"]);
    }

    #[test]
    fn test_echo_surfaces_sink_error() {
        let analyzer = EchoUrlAnalyzer::new(Arc::new(BrokenSink));
        let err = analyzer.process("http://example.com/", &document()).unwrap_err();
        assert!(err.to_string().contains("sink closed"));
    }

    #[test]
    fn test_echo_name() {
        assert_eq!(EchoUrlAnalyzer::stdout().name(), "echo-url");
    }
}
