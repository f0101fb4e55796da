//! Terminal probing and cursor visibility.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};

use crossterm::{cursor, execute, terminal};
use tracing::trace;

use crate::constants::FALLBACK_TERMINAL_WIDTH;

/// Terminal capabilities needed by live printers.
pub trait Terminal: Send + Sync {
    /// Current width of the terminal, in columns.
    fn width(&self) -> usize;

    /// Hide the text cursor.
    fn hide_cursor(&self);

    /// Show the text cursor.
    fn show_cursor(&self);
}

/// The terminal attached to standard output.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutTerminal;

impl Terminal for StdoutTerminal {
    fn width(&self) -> usize {
        match terminal::size() {
            Ok((cols, _)) if cols > 0 => usize::from(cols),
            _ => FALLBACK_TERMINAL_WIDTH,
        }
    }

    fn hide_cursor(&self) {
        if let Err(err) = execute!(io::stdout(), cursor::Hide) {
            trace!(%err, "failed to hide cursor");
        }
    }

    fn show_cursor(&self) {
        if let Err(err) = execute!(io::stdout(), cursor::Show) {
            trace!(%err, "failed to show cursor");
        }
    }
}

/// A terminal of fixed width that never touches the real cursor.
///
/// Useful for headless output and tests; cursor visibility is tracked so
/// callers can check it was restored.
#[derive(Debug)]
pub struct FixedTerminal {
    width: usize,
    cursor_hidden: AtomicBool,
}

impl FixedTerminal {
    /// Create a terminal reporting `width` columns.
    #[must_use]
    pub fn new(width: usize) -> Self {
        Self {
            width,
            cursor_hidden: AtomicBool::new(false),
        }
    }

    /// Whether the cursor is currently hidden.
    #[must_use]
    pub fn cursor_hidden(&self) -> bool {
        self.cursor_hidden.load(Ordering::SeqCst)
    }
}

impl Terminal for FixedTerminal {
    fn width(&self) -> usize {
        self.width
    }

    fn hide_cursor(&self) {
        self.cursor_hidden.store(true, Ordering::SeqCst);
    }

    fn show_cursor(&self) {
        self.cursor_hidden.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_terminal_width() {
        assert_eq!(FixedTerminal::new(42).width(), 42);
    }

    #[test]
    fn fixed_terminal_tracks_cursor() {
        let term = FixedTerminal::new(80);
        assert!(!term.cursor_hidden());
        term.hide_cursor();
        assert!(term.cursor_hidden());
        term.show_cursor();
        assert!(!term.cursor_hidden());
    }

    #[test]
    fn stdout_terminal_width_is_positive() {
        assert!(StdoutTerminal.width() > 0);
    }
}
