//! Multiplexer configuration.

use std::time::Duration;

use liveterm_core::area::AreaRenderer;
use liveterm_core::constants::DEFAULT_UPDATE_DELAY;
use liveterm_core::sink::OutputSink;

/// Options for a [`BufferMultiplexer`](crate::BufferMultiplexer).
pub struct MultiPrinterOptions {
    /// Destination of the merged area when no custom renderer is given.
    pub writer: OutputSink,
    /// Interval between merged redraws.
    pub update_delay: Duration,
    /// Custom area renderer; takes precedence over `writer`.
    pub area: Option<Box<dyn AreaRenderer>>,
}

impl Default for MultiPrinterOptions {
    fn default() -> Self {
        Self {
            writer: OutputSink::stdout(),
            update_delay: DEFAULT_UPDATE_DELAY,
            area: None,
        }
    }
}

impl MultiPrinterOptions {
    #[must_use]
    pub fn with_writer(mut self, writer: impl Into<OutputSink>) -> Self {
        self.writer = writer.into();
        self
    }

    #[must_use]
    pub fn with_update_delay(mut self, delay: Duration) -> Self {
        self.update_delay = delay;
        self
    }

    #[must_use]
    pub fn with_area(mut self, area: Box<dyn AreaRenderer>) -> Self {
        self.area = Some(area);
        self
    }

    /// Normalize options, replacing a zero update delay with the default.
    #[must_use]
    pub fn normalize(mut self) -> Self {
        if self.update_delay.is_zero() {
            self.update_delay = DEFAULT_UPDATE_DELAY;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options() {
        let opts = MultiPrinterOptions::default();
        assert_eq!(opts.update_delay, DEFAULT_UPDATE_DELAY);
        assert!(opts.area.is_none());
    }

    #[test]
    fn with_update_delay() {
        let opts = MultiPrinterOptions::default().with_update_delay(Duration::from_millis(50));
        assert_eq!(opts.update_delay, Duration::from_millis(50));
    }

    #[test]
    fn normalize_zero_delay() {
        let opts = MultiPrinterOptions::default()
            .with_update_delay(Duration::ZERO)
            .normalize();
        assert_eq!(opts.update_delay, DEFAULT_UPDATE_DELAY);
    }
}
