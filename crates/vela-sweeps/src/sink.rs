//! # Notification Sinks
//!
//! Append-only text destinations for sweep events: one line per event,
//! each carrying a timestamp, an identifying field and an outcome.
//!
//! A failed sink write is logged and swallowed - it never rolls back the
//! domain mutation that produced the event and never fails the sweep.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::warn;

// =============================================================================
// Sink Trait
// =============================================================================

/// An append-only destination for one-line event records.
pub trait Sink: Send + Sync {
    /// Appends one line (newline added by the sink).
    fn append(&self, line: &str) -> io::Result<()>;
}

/// Appends a line, logging instead of propagating on failure.
pub fn emit(sink: &dyn Sink, line: &str) {
    if let Err(err) = sink.append(line) {
        warn!(error = %err, line, "Sink write failed");
    }
}

// =============================================================================
// File Sink
// =============================================================================

/// Appends lines to a file, creating it on first write.
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    /// Creates a sink writing to the given path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileSink { path: path.into() }
    }

    /// The sink's target path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Sink for FileSink {
    fn append(&self, line: &str) -> io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", line)
    }
}

// =============================================================================
// Memory Sink (tests)
// =============================================================================

/// Collects lines in memory; used by tests to assert on sweep output.
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<String>>,
}

impl MemorySink {
    /// Creates an empty memory sink.
    pub fn new() -> Self {
        MemorySink::default()
    }

    /// Returns a copy of everything appended so far.
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().expect("sink lock poisoned").clone()
    }
}

impl Sink for MemorySink {
    fn append(&self, line: &str) -> io::Result<()> {
        self.lines
            .lock()
            .expect("sink lock poisoned")
            .push(line.to_string());
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_sink_appends_lines() {
        let path = std::env::temp_dir().join(format!("vela_sink_test_{}.log", std::process::id()));
        let _ = std::fs::remove_file(&path);

        let sink = FileSink::new(&path);
        sink.append("first").unwrap();
        sink.append("second").unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "first\nsecond\n");

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_memory_sink_collects() {
        let sink = MemorySink::new();
        emit(&sink, "one line");
        assert_eq!(sink.lines(), vec!["one line".to_string()]);
    }

    #[test]
    fn test_emit_swallows_failures() {
        // Directory path: every append fails, emit must not panic.
        let sink = FileSink::new(std::env::temp_dir());
        emit(&sink, "dropped");
    }
}
