//! Output sink trait and error types
//!
//! Analyzers that produce text write it through an `OutputSink` handed to
//! them at construction, so where the text ends up is a property of the
//! analyzer instance rather than a process-wide side effect.

use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write output: {0}")]
    Write(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Destination for line-oriented analyzer output
///
/// Implementations must be thread-safe; a sink may be shared by several
/// analyzers through an `Arc`.
pub trait OutputSink: Send + Sync {
    /// Writes a single line
    ///
    /// # Arguments
    ///
    /// * `line` - The text to write, without a trailing newline
    fn write_line(&self, line: &str) -> OutputResult<()>;

    /// Flushes any buffered output
    fn flush(&self) -> OutputResult<()> {
        Ok(())
    }
}
