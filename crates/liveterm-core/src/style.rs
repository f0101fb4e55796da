//! Styling helpers: painting text, measuring visible width, color fades.

use std::fmt::Display;

use crossterm::style::{Color, ContentStyle};

/// A 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Create a color from its components.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Interpolate from `self` through `stops` as `current` moves from
    /// `min` to `max`.
    ///
    /// With a single stop this is a linear fade between two colors; with
    /// several stops the range is split evenly between consecutive colors.
    /// `current` is clamped to `[min, max]`.
    #[must_use]
    pub fn fade(self, min: f64, max: f64, current: f64, stops: &[Rgb]) -> Rgb {
        if stops.is_empty() || max <= min {
            return self;
        }
        let fraction = ((current - min) / (max - min)).clamp(0.0, 1.0);

        let mut colors = Vec::with_capacity(stops.len() + 1);
        colors.push(self);
        colors.extend_from_slice(stops);

        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            clippy::cast_precision_loss
        )]
        let (index, t) = {
            let position = fraction * (colors.len() - 1) as f64;
            let index = (position.floor() as usize).min(colors.len() - 2);
            (index, position - index as f64)
        };
        let (from, to) = (colors[index], colors[index + 1]);
        Rgb::new(lerp(from.r, to.r, t), lerp(from.g, to.g, t), lerp(from.b, to.b, t))
    }

    /// The color as a terminal foreground style.
    #[must_use]
    pub fn style(self) -> ContentStyle {
        fg(Color::from(self))
    }
}

impl From<Rgb> for Color {
    fn from(c: Rgb) -> Self {
        Color::Rgb {
            r: c.r,
            g: c.g,
            b: c.b,
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn lerp(a: u8, b: u8, t: f64) -> u8 {
    let (a, b) = (f64::from(a), f64::from(b));
    (a + (b - a) * t).round().clamp(0.0, 255.0) as u8
}

/// A style with only a foreground color set.
#[must_use]
pub fn fg(color: Color) -> ContentStyle {
    ContentStyle {
        foreground_color: Some(color),
        ..ContentStyle::default()
    }
}

/// Render `text` with `style` applied.
pub fn paint(text: impl Display, style: ContentStyle) -> String {
    style.apply(text).to_string()
}

/// Display width of `text`, ignoring embedded escape sequences.
#[must_use]
pub fn visible_width(text: &str) -> usize {
    console::measure_text_width(text)
}

/// `text` with all escape sequences removed.
#[must_use]
pub fn strip_styles(text: &str) -> String {
    console::strip_ansi_codes(text).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgb = Rgb::new(255, 0, 0);
    const GREEN: Rgb = Rgb::new(0, 255, 0);

    #[test]
    fn fade_endpoints() {
        assert_eq!(RED.fade(0.0, 10.0, 0.0, &[GREEN]), RED);
        assert_eq!(RED.fade(0.0, 10.0, 10.0, &[GREEN]), GREEN);
    }

    #[test]
    fn fade_midpoint() {
        let mid = RED.fade(0.0, 100.0, 50.0, &[GREEN]);
        assert_eq!(mid, Rgb::new(128, 128, 0));
    }

    #[test]
    fn fade_clamps_out_of_range() {
        assert_eq!(RED.fade(0.0, 10.0, 25.0, &[GREEN]), GREEN);
        assert_eq!(RED.fade(0.0, 10.0, -5.0, &[GREEN]), RED);
    }

    #[test]
    fn fade_multiple_stops() {
        let blue = Rgb::new(0, 0, 255);
        assert_eq!(RED.fade(0.0, 2.0, 1.0, &[GREEN, blue]), GREEN);
        assert_eq!(RED.fade(0.0, 2.0, 2.0, &[GREEN, blue]), blue);
    }

    #[test]
    fn fade_degenerate_range_returns_start() {
        assert_eq!(RED.fade(5.0, 5.0, 5.0, &[GREEN]), RED);
        assert_eq!(RED.fade(0.0, 1.0, 0.5, &[]), RED);
    }

    #[test]
    fn visible_width_ignores_styles() {
        let styled = paint("hello", GREEN.style());
        assert_eq!(visible_width(&styled), 5);
        assert_eq!(strip_styles(&styled), "hello");
    }

    #[test]
    fn visible_width_counts_block_glyphs_once() {
        assert_eq!(visible_width("███"), 3);
    }
}
