//! Log sinks for serializer traces.
//!
//! An engine with a logger attached emits one line per primitive, array and
//! object operation, for example:
//!
//! ```text
//! (READ) 0x00000000:  (Object: Header) Header
//! (READ) 0x00000000:    (u32) Magic: 1179403647
//! (READ) 0x00000004:    (u8[4]) Padding: 00 00 00 00
//! ```
//!
//! Sinks never report failures back to the engine. A sink that cannot write
//! drops the line.

use parking_lot::Mutex;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, warn};

/// Destination for serializer trace lines.
pub trait SerializerLogger {
    /// Write one log line (without trailing newline).
    fn write_log_line(&mut self, line: &str);
}

impl<L: SerializerLogger + ?Sized> SerializerLogger for Box<L> {
    fn write_log_line(&mut self, line: &str) {
        (**self).write_log_line(line);
    }
}

/// Writes log lines to a file or any other `io::Write`.
///
/// Output is buffered and flushed when the logger is dropped.
pub struct FileLogger<W: Write = File> {
    out: BufWriter<W>,
    failed: bool,
}

impl FileLogger<File> {
    /// Create (or truncate) a log file at `path`.
    pub fn create(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        debug!("Creating serializer log at {}", path.display());
        Ok(FileLogger::new(File::create(path)?))
    }
}

impl<W: Write> FileLogger<W> {
    /// Log into an existing writer.
    pub fn new(out: W) -> Self {
        FileLogger {
            out: BufWriter::new(out),
            failed: false,
        }
    }

    /// Flush buffered lines.
    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    /// Flush and give back the underlying writer.
    pub fn into_inner(self) -> io::Result<W> {
        self.out.into_inner().map_err(|e| e.into_error())
    }
}

impl<W: Write> SerializerLogger for FileLogger<W> {
    fn write_log_line(&mut self, line: &str) {
        if let Err(e) = writeln!(self.out, "{}", line) {
            // report once, then stay quiet
            if !self.failed {
                warn!("Serializer log output failed, dropping lines: {}", e);
                self.failed = true;
            }
        }
    }
}

/// Collects log lines in memory.
///
/// Clones share the same buffer, so one clone can be handed to an engine
/// while another is kept to inspect the output.
#[derive(Debug, Clone, Default)]
pub struct MemoryLogger {
    lines: Arc<Mutex<Vec<String>>>,
}

impl MemoryLogger {
    /// Create an empty logger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all lines logged so far.
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }

    /// Number of lines logged so far.
    pub fn len(&self) -> usize {
        self.lines.lock().len()
    }

    /// Check if nothing was logged.
    pub fn is_empty(&self) -> bool {
        self.lines.lock().is_empty()
    }

    /// All lines joined with newlines.
    pub fn contents(&self) -> String {
        self.lines.lock().join("\n")
    }

    /// Remove all lines.
    pub fn clear(&self) {
        self.lines.lock().clear();
    }
}

impl SerializerLogger for MemoryLogger {
    fn write_log_line(&mut self, line: &str) {
        self.lines.lock().push(line.to_string());
    }
}

/// Forwards log lines to `tracing` at debug level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl SerializerLogger for TracingLogger {
    fn write_log_line(&mut self, line: &str) {
        debug!(target: "symbin::trace", "{}", line);
    }
}
