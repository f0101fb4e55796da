//! Progress indicator configuration.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::style::{Color, ContentStyle};

use liveterm_core::constants::{DEFAULT_MAX_WIDTH, DEFAULT_TOTAL};
use liveterm_core::sink::OutputSink;
use liveterm_core::style::{fg, paint, Rgb};
use liveterm_core::terminal::{StdoutTerminal, Terminal};

use crate::registry::ActiveIndicators;

/// Default glyph for filled bar cells.
pub const DEFAULT_BAR_CHARACTER: &str = "█";

/// Color of the percentage label at 0%.
pub const PERCENTAGE_START_COLOR: Rgb = Rgb::new(255, 0, 0);

/// Color of the percentage label at 100%.
pub const PERCENTAGE_END_COLOR: Rgb = Rgb::new(0, 255, 0);

/// Configuration of a [`ProgressIndicator`](crate::ProgressIndicator).
///
/// Built with `Default` plus the by-value `with_*` setters; an indicator is
/// constructed once from finalized options and never mutates them.
#[derive(Clone)]
pub struct ProgressbarOptions {
    /// Title shown before the bar.
    pub title: String,
    /// Value at which the indicator completes. Zero disables the indicator.
    pub total: u64,
    /// Initial progress.
    pub current: u64,
    /// Glyph for filled cells.
    pub bar_character: String,
    /// Glyph drawn after the last filled cell.
    pub last_character: String,
    /// Glyph (possibly styled) for empty cells.
    pub bar_filler: String,
    /// Granularity the elapsed time is rounded to.
    pub elapsed_rounding: Duration,
    /// Maximum line width in columns; zero uses the full terminal width.
    pub max_width: usize,
    pub show_title: bool,
    pub show_count: bool,
    pub show_percentage: bool,
    pub show_elapsed_time: bool,
    /// Clear the line on stop instead of leaving the final state visible.
    pub remove_when_done: bool,
    /// Non-interactive output: print the title on its own line at start.
    pub raw_output: bool,
    pub title_style: ContentStyle,
    pub bar_style: ContentStyle,
    /// Percentage color at 0% and at 100%.
    pub percentage_colors: (Rgb, Rgb),
    /// Use this instant instead of the start call as the time origin.
    pub started_at: Option<Instant>,
    pub writer: OutputSink,
    pub terminal: Arc<dyn Terminal>,
    pub registry: Arc<ActiveIndicators>,
}

impl Default for ProgressbarOptions {
    fn default() -> Self {
        Self {
            title: String::new(),
            total: DEFAULT_TOTAL,
            current: 0,
            bar_character: DEFAULT_BAR_CHARACTER.to_string(),
            last_character: DEFAULT_BAR_CHARACTER.to_string(),
            bar_filler: paint(DEFAULT_BAR_CHARACTER, fg(Color::DarkGrey)),
            elapsed_rounding: Duration::from_secs(1),
            max_width: DEFAULT_MAX_WIDTH,
            show_title: true,
            show_count: true,
            show_percentage: true,
            show_elapsed_time: true,
            remove_when_done: false,
            raw_output: false,
            title_style: fg(Color::Cyan),
            bar_style: fg(Color::DarkCyan),
            percentage_colors: (PERCENTAGE_START_COLOR, PERCENTAGE_END_COLOR),
            started_at: None,
            writer: OutputSink::stdout(),
            terminal: Arc::new(StdoutTerminal),
            registry: ActiveIndicators::global(),
        }
    }
}

impl ProgressbarOptions {
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    #[must_use]
    pub fn with_total(mut self, total: u64) -> Self {
        self.total = total;
        self
    }

    #[must_use]
    pub fn with_current(mut self, current: u64) -> Self {
        self.current = current;
        self
    }

    #[must_use]
    pub fn with_bar_character(mut self, glyph: impl Into<String>) -> Self {
        self.bar_character = glyph.into();
        self
    }

    #[must_use]
    pub fn with_last_character(mut self, glyph: impl Into<String>) -> Self {
        self.last_character = glyph.into();
        self
    }

    #[must_use]
    pub fn with_bar_filler(mut self, glyph: impl Into<String>) -> Self {
        self.bar_filler = glyph.into();
        self
    }

    /// Set the elapsed-time rounding granularity.
    #[must_use]
    pub fn with_elapsed_rounding(mut self, granularity: Duration) -> Self {
        self.elapsed_rounding = granularity;
        self
    }

    /// Set the maximum width. If the terminal is narrower, its width is
    /// used instead; zero always uses the terminal width.
    #[must_use]
    pub fn with_max_width(mut self, max_width: usize) -> Self {
        self.max_width = max_width;
        self
    }

    #[must_use]
    pub fn with_show_title(mut self, show: bool) -> Self {
        self.show_title = show;
        self
    }

    #[must_use]
    pub fn with_show_count(mut self, show: bool) -> Self {
        self.show_count = show;
        self
    }

    #[must_use]
    pub fn with_show_percentage(mut self, show: bool) -> Self {
        self.show_percentage = show;
        self
    }

    #[must_use]
    pub fn with_show_elapsed_time(mut self, show: bool) -> Self {
        self.show_elapsed_time = show;
        self
    }

    #[must_use]
    pub fn with_remove_when_done(mut self, remove: bool) -> Self {
        self.remove_when_done = remove;
        self
    }

    #[must_use]
    pub fn with_raw_output(mut self, raw: bool) -> Self {
        self.raw_output = raw;
        self
    }

    #[must_use]
    pub fn with_title_style(mut self, style: ContentStyle) -> Self {
        self.title_style = style;
        self
    }

    #[must_use]
    pub fn with_bar_style(mut self, style: ContentStyle) -> Self {
        self.bar_style = style;
        self
    }

    #[must_use]
    pub fn with_percentage_colors(mut self, start: Rgb, end: Rgb) -> Self {
        self.percentage_colors = (start, end);
        self
    }

    #[must_use]
    pub fn with_started_at(mut self, instant: Instant) -> Self {
        self.started_at = Some(instant);
        self
    }

    /// Redirect output, e.g. into a multiplexer channel.
    #[must_use]
    pub fn with_writer(mut self, writer: impl Into<OutputSink>) -> Self {
        self.writer = writer.into();
        self
    }

    #[must_use]
    pub fn with_terminal(mut self, terminal: Arc<dyn Terminal>) -> Self {
        self.terminal = terminal;
        self
    }

    /// Register started indicators in `registry` instead of the global one.
    #[must_use]
    pub fn with_registry(mut self, registry: Arc<ActiveIndicators>) -> Self {
        self.registry = registry;
        self
    }

    /// Normalize options, replacing empty glyphs with defaults.
    #[must_use]
    pub fn normalize(mut self) -> Self {
        if self.bar_character.is_empty() {
            self.bar_character = DEFAULT_BAR_CHARACTER.to_string();
        }
        if self.bar_filler.is_empty() {
            self.bar_filler = " ".to_string();
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use liveterm_core::terminal::FixedTerminal;

    #[test]
    fn default_options() {
        let opts = ProgressbarOptions::default();
        assert_eq!(opts.total, DEFAULT_TOTAL);
        assert_eq!(opts.current, 0);
        assert_eq!(opts.max_width, DEFAULT_MAX_WIDTH);
        assert_eq!(opts.elapsed_rounding, Duration::from_secs(1));
        assert!(opts.show_title && opts.show_count && opts.show_percentage);
        assert!(opts.show_elapsed_time);
        assert!(!opts.remove_when_done);
        assert!(opts.started_at.is_none());
    }

    #[test]
    fn with_setters_return_modified_copy() {
        let template = ProgressbarOptions::default().with_title("template");
        let derived = template.clone().with_title("derived").with_total(7);
        assert_eq!(template.title, "template");
        assert_eq!(template.total, DEFAULT_TOTAL);
        assert_eq!(derived.title, "derived");
        assert_eq!(derived.total, 7);
    }

    #[test]
    fn with_terminal_and_registry() {
        let registry = Arc::new(ActiveIndicators::new());
        let opts = ProgressbarOptions::default()
            .with_terminal(Arc::new(FixedTerminal::new(40)))
            .with_registry(Arc::clone(&registry));
        assert_eq!(opts.terminal.width(), 40);
        assert!(Arc::ptr_eq(&opts.registry, &registry));
    }

    #[test]
    fn normalize_empty_glyphs() {
        let opts = ProgressbarOptions::default()
            .with_bar_character("")
            .with_bar_filler("")
            .normalize();
        assert_eq!(opts.bar_character, DEFAULT_BAR_CHARACTER);
        assert_eq!(opts.bar_filler, " ");
    }
}
