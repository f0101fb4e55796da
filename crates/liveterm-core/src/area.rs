//! A redrawable region of terminal output.

use std::io;

use crossterm::cursor::{MoveToColumn, MoveUp};
use crossterm::queue;
use crossterm::terminal::{Clear, ClearType};

use crate::sink::OutputSink;

/// Something that can display a block of text and replace it later.
pub trait AreaRenderer: Send {
    /// Replace the previously displayed content with `content`.
    fn update(&mut self, content: &str) -> io::Result<()>;

    /// Release the area; subsequent output scrolls normally below it.
    fn stop(&mut self) -> io::Result<()>;
}

/// Area renderer that redraws in place using cursor movement.
///
/// Lines wider than the terminal wrap and are not accounted for.
#[derive(Debug)]
pub struct TerminalArea {
    sink: OutputSink,
    /// Line breaks emitted by the last update; the cursor sits that many
    /// rows below the top of the area.
    rows_below_top: usize,
    ends_with_newline: bool,
}

impl TerminalArea {
    /// Create an area drawing to `sink`.
    #[must_use]
    pub fn new(sink: OutputSink) -> Self {
        Self {
            sink,
            rows_below_top: 0,
            ends_with_newline: true,
        }
    }

    /// Number of terminal rows currently occupied by the area.
    #[must_use]
    pub fn height(&self) -> usize {
        if self.ends_with_newline {
            self.rows_below_top
        } else {
            self.rows_below_top + 1
        }
    }

    /// Erase the area without releasing it.
    pub fn clear(&mut self) -> io::Result<()> {
        let mut frame = Vec::new();
        self.queue_rewind(&mut frame)?;
        self.rows_below_top = 0;
        self.ends_with_newline = true;
        self.sink.write_bytes(&frame)
    }

    fn queue_rewind(&self, frame: &mut Vec<u8>) -> io::Result<()> {
        if self.rows_below_top == 0 && self.ends_with_newline {
            return Ok(());
        }
        queue!(frame, MoveToColumn(0))?;
        if self.rows_below_top > 0 {
            let rows = u16::try_from(self.rows_below_top).unwrap_or(u16::MAX);
            queue!(frame, MoveUp(rows))?;
        }
        queue!(frame, Clear(ClearType::FromCursorDown))
    }
}

impl AreaRenderer for TerminalArea {
    fn update(&mut self, content: &str) -> io::Result<()> {
        let mut frame = Vec::with_capacity(content.len() + 16);
        self.queue_rewind(&mut frame)?;
        frame.extend_from_slice(content.as_bytes());

        self.rows_below_top = content.matches('\n').count();
        self.ends_with_newline = content.is_empty() || content.ends_with('\n');
        self.sink.write_bytes(&frame)
    }

    fn stop(&mut self) -> io::Result<()> {
        let pending_newline = !self.ends_with_newline;
        self.rows_below_top = 0;
        self.ends_with_newline = true;
        if pending_newline {
            self.sink.write_str("\n")?;
        }
        Ok(())
    }
}
