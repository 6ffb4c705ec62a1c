//! Concrete output sinks

use crate::output::traits::{OutputError, OutputResult, OutputSink};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::sync::Mutex;

/// Writes lines to the process's standard output
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutSink;

impl OutputSink for StdoutSink {
    fn write_line(&self, line: &str) -> OutputResult<()> {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{}", line)?;
        Ok(())
    }

    fn flush(&self) -> OutputResult<()> {
        io::stdout().lock().flush()?;
        Ok(())
    }
}

/// Writes lines to any `Write` implementation
pub struct WriterSink<W: Write + Send> {
    writer: Mutex<W>,
}

impl<W: Write + Send> WriterSink<W> {
    /// Wraps a writer
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Unwraps the sink, returning the inner writer
    pub fn into_inner(self) -> OutputResult<W> {
        self.writer
            .into_inner()
            .map_err(|_| OutputError::Write("writer lock poisoned".to_string()))
    }
}

impl WriterSink<BufWriter<File>> {
    /// Creates (or truncates) a file and writes lines to it
    ///
    /// # Arguments
    ///
    /// * `path` - The output file path
    ///
    /// # Returns
    ///
    /// * `Ok(WriterSink)` - The file was created
    /// * `Err(OutputError)` - The file could not be created
    pub fn create(path: &Path) -> OutputResult<Self> {
        let file = File::create(path)?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write + Send> OutputSink for WriterSink<W> {
    fn write_line(&self, line: &str) -> OutputResult<()> {
        let mut writer = self
            .writer
            .lock()
            .map_err(|_| OutputError::Write("writer lock poisoned".to_string()))?;
        writeln!(writer, "{}", line)?;
        Ok(())
    }

    fn flush(&self) -> OutputResult<()> {
        let mut writer = self
            .writer
            .lock()
            .map_err(|_| OutputError::Write("writer lock poisoned".to_string()))?;
        writer.flush()?;
        Ok(())
    }
}

/// Collects lines in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of every line written so far
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .map(|lines| lines.clone())
            .unwrap_or_default()
    }
}

impl OutputSink for MemorySink {
    fn write_line(&self, line: &str) -> OutputResult<()> {
        self.lines
            .lock()
            .map_err(|_| OutputError::Write("line buffer lock poisoned".to_string()))?
            .push(line.to_string());
        Ok(())
    }
}
