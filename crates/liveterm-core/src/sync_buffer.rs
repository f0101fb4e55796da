//! Append-only capture buffer shared between writers and a snapshot reader.

use std::io::{self, Write};
use std::sync::Arc;

use parking_lot::RwLock;

/// Thread-safe append-only byte buffer.
///
/// Writers append under the write lock, so a snapshot never observes a
/// partially applied write.
#[derive(Debug, Default)]
pub struct SyncBuffer {
    buf: RwLock<Vec<u8>>,
}

impl SyncBuffer {
    /// Create an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append bytes to the buffer.
    pub fn append(&self, bytes: &[u8]) {
        self.buf.write().extend_from_slice(bytes);
    }

    /// Everything appended so far, decoded as (lossy) UTF-8.
    #[must_use]
    pub fn snapshot(&self) -> String {
        String::from_utf8_lossy(&self.buf.read()).into_owned()
    }

    /// Number of bytes appended so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.read().len()
    }

    /// Whether nothing has been appended yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Write-only handle to a [`SyncBuffer`].
///
/// Handed out by a multiplexer so a printer can redirect its output into
/// an off-screen buffer instead of the terminal.
#[derive(Debug, Clone)]
pub struct BufferWriter {
    buffer: Arc<SyncBuffer>,
}

impl BufferWriter {
    /// Create a writer appending to `buffer`.
    #[must_use]
    pub fn new(buffer: Arc<SyncBuffer>) -> Self {
        Self { buffer }
    }

    /// The buffer this writer appends to.
    #[must_use]
    pub fn buffer(&self) -> &Arc<SyncBuffer> {
        &self.buffer
    }
}

impl Write for BufferWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.append(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
