//! Shared, clonable output destination.

use std::fmt;
use std::io::{self, Write};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::sync_buffer::BufferWriter;

/// A clonable handle to a writer shared between printers and redraw tasks.
///
/// Each write is applied and flushed while holding the sink's own lock,
/// so concurrent redraws never interleave within one write.
#[derive(Clone)]
pub struct OutputSink {
    inner: Arc<Mutex<Box<dyn Write + Send>>>,
}

impl OutputSink {
    /// Wrap an arbitrary writer.
    pub fn new<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Box::new(writer))),
        }
    }

    /// Sink writing to the process's standard output.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }

    /// Sink writing to the process's standard error.
    #[must_use]
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }

    /// Sink that discards everything.
    #[must_use]
    pub fn discard() -> Self {
        Self::new(io::sink())
    }

    /// Write `text` and flush.
    pub fn write_str(&self, text: &str) -> io::Result<()> {
        self.write_bytes(text.as_bytes())
    }

    /// Write raw bytes and flush.
    pub fn write_bytes(&self, bytes: &[u8]) -> io::Result<()> {
        let mut writer = self.inner.lock();
        writer.write_all(bytes)?;
        writer.flush()
    }

    /// Whether two sinks share the same underlying writer.
    #[must_use]
    pub fn same_as(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Default for OutputSink {
    fn default() -> Self {
        Self::stdout()
    }
}

impl fmt::Debug for OutputSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OutputSink").finish_non_exhaustive()
    }
}

impl From<BufferWriter> for OutputSink {
    fn from(writer: BufferWriter) -> Self {
        Self::new(writer)
    }
}
