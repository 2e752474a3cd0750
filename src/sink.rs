//! Output sinks
//!
//! A `SharedSink` wraps any `Write` destination behind a mutex so clones can be
//! handed to several loggers and threads. Each log line is written with a single
//! `write_all` and flushed while the lock is held, so lines never interleave.

use std::fmt;
use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};

/// Cloneable handle to a log destination
///
/// Clones refer to the same writer; compare handles with [`SharedSink::ptr_eq`].
#[derive(Clone)]
pub struct SharedSink {
    writer: Arc<Mutex<dyn Write + Send>>,
    label: &'static str,
}

impl SharedSink {
    /// Wrap an arbitrary writer
    pub fn new<W: Write + Send + 'static>(writer: W) -> Self {
        Self::labeled(writer, "writer")
    }

    /// Wrap a writer with a short label shown by `Debug`
    pub fn labeled<W: Write + Send + 'static>(writer: W, label: &'static str) -> Self {
        Self {
            writer: Arc::new(Mutex::new(writer)),
            label,
        }
    }

    /// The process's standard error stream
    pub fn stderr() -> Self {
        Self::labeled(io::stderr(), "stderr")
    }

    /// The process's standard output stream
    pub fn stdout() -> Self {
        Self::labeled(io::stdout(), "stdout")
    }

    /// True when both handles point at the same writer
    pub fn ptr_eq(&self, other: &SharedSink) -> bool {
        // Compare data pointers only; vtable pointers may differ across codegen units
        std::ptr::eq(
            Arc::as_ptr(&self.writer) as *const (),
            Arc::as_ptr(&other.writer) as *const (),
        )
    }

    /// Write `line` followed by a newline, then flush
    pub fn write_line(&self, line: &str) -> io::Result<()> {
        let mut buf = String::with_capacity(line.len() + 1);
        buf.push_str(line);
        buf.push('\n');

        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        writer.write_all(buf.as_bytes())?;
        writer.flush()
    }
}

impl fmt::Debug for SharedSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedSink")
            .field("label", &self.label)
            .field("writer", &Arc::as_ptr(&self.writer))
            .finish()
    }
}
