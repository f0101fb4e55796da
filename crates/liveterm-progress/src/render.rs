//! Single-line layout of a progress indicator.
//!
//! The line is `before + bar + after`:
//! `<title> [007/100] ██████████████░░░░░░░░   7% | 3s`.
//! The bar takes whatever width the labels leave free.

use std::time::Duration;

use crossterm::style::Color;

use liveterm_core::style::{fg, paint, visible_width};

use crate::elapsed::{format_elapsed, round_duration};
use crate::options::ProgressbarOptions;

/// Width of the line for a configured maximum and the terminal width.
#[must_use]
pub fn line_width(max_width: usize, terminal_width: usize) -> usize {
    if max_width == 0 {
        terminal_width
    } else {
        max_width.min(terminal_width)
    }
}

/// Digits needed to print `total`, used to zero-pad the current count.
#[must_use]
pub fn count_padding(total: u64) -> usize {
    total.checked_ilog10().map_or(1, |log| log as usize + 1)
}

/// Completion percentage, rounded to the nearest integer.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn percentage(current: u64, total: u64) -> u64 {
    if total == 0 {
        return 0;
    }
    ((current as f64 / total as f64) * 100.0).round() as u64
}

/// Number of filled cells for a bar `bar_area` cells wide.
///
/// Never exceeds `bar_area`.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn filled_cells(current: u64, total: u64, bar_area: usize) -> usize {
    if total == 0 {
        return 0;
    }
    let filled = u128::from(current) * bar_area as u128 / u128::from(total);
    (filled as usize).min(bar_area)
}

/// Snapshot of everything needed to lay out one line.
pub(crate) struct LineLayout<'a> {
    pub options: &'a ProgressbarOptions,
    pub title: &'a str,
    pub current: u64,
    pub total: u64,
    pub elapsed: Duration,
}

impl LineLayout<'_> {
    /// Lay out the line for a terminal `terminal_width` columns wide.
    #[allow(clippy::cast_precision_loss)]
    pub fn render(&self, terminal_width: usize) -> String {
        let opts = self.options;
        if self.total == 0 {
            return String::new();
        }
        let width = line_width(opts.max_width, terminal_width);
        let punctuation = fg(Color::DarkGrey);
        let digits = fg(Color::White);

        let mut before = String::new();
        if opts.show_title {
            before.push_str(&paint(self.title, opts.title_style));
            before.push(' ');
        }
        if opts.show_count {
            let padding = count_padding(self.total);
            before.push_str(&paint("[", punctuation));
            before.push_str(&paint(format!("{:0padding$}", self.current), digits));
            before.push_str(&paint("/", punctuation));
            before.push_str(&paint(self.total, digits));
            before.push_str(&paint("]", punctuation));
            before.push(' ');
        }

        let mut after = String::from(" ");
        if opts.show_percentage {
            let (start, end) = opts.percentage_colors;
            let color = start.fade(0.0, self.total as f64, self.current as f64, &[end]);
            let label = format!("{:3}%", percentage(self.current, self.total));
            after.push_str(&paint(label, color.style()));
            after.push(' ');
        }
        if opts.show_elapsed_time {
            after.push_str("| ");
            after.push_str(&format_elapsed(round_duration(
                self.elapsed,
                opts.elapsed_rounding,
            )));
        }

        let bar_area = width.saturating_sub(visible_width(&before) + visible_width(&after) + 1);
        let filled = filled_cells(self.current, self.total, bar_area);

        let mut line = before;
        if filled > 0 {
            let mut bar = opts.bar_character.repeat(filled);
            bar.push_str(&opts.last_character);
            line.push_str(&paint(bar, opts.bar_style));
        }
        line.push_str(&opts.bar_filler.repeat(bar_area - filled));
        line.push_str(&after);
        line
    }
}
