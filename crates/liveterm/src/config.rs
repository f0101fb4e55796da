//! Application configuration from CLI flags and environment.

use std::time::Duration;

use clap::Parser;

use liveterm_core::constants::{DEFAULT_MAX_WIDTH, MIN_UPDATE_DELAY};
use liveterm_core::error::LiveError;

/// Several progress bars sharing one live terminal area.
#[derive(Parser, Debug)]
#[command(name = "liveterm", version, about)]
#[allow(clippy::struct_excessive_bools)]
pub struct AppConfig {
    /// Number of simulated workers, one progress bar each.
    #[arg(short, long, default_value = "3", env = "LIVETERM_WORKERS")]
    pub workers: usize,

    /// Steps each worker has to complete.
    #[arg(short, long, default_value = "100", env = "LIVETERM_TOTAL")]
    pub total: u64,

    /// Delay between two steps of the fastest worker (e.g., "20ms", "1s").
    #[arg(long, default_value = "20ms", env = "LIVETERM_STEP_DELAY")]
    pub step_delay: String,

    /// Interval between merged redraws (e.g., "200ms").
    #[arg(long, default_value = "200ms", env = "LIVETERM_UPDATE_DELAY")]
    pub update_delay: String,

    /// Drive a single bar writing straight to the terminal.
    #[arg(long)]
    pub single: bool,

    /// Non-interactive output: print titles on their own line.
    #[arg(long, env = "LIVETERM_RAW")]
    pub raw: bool,

    /// Clear each bar once it completes.
    #[arg(long)]
    pub remove_when_done: bool,

    /// Hide the elapsed time.
    #[arg(long)]
    pub no_elapsed: bool,

    /// Maximum line width in columns (0 = terminal width).
    #[arg(long, default_value_t = DEFAULT_MAX_WIDTH, env = "LIVETERM_MAX_WIDTH")]
    pub max_width: usize,

    /// Quiet mode (no header and no summary).
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate shell completion.
    #[arg(long, value_enum)]
    pub completion: Option<clap_complete::Shell>,
}

impl AppConfig {
    /// Parse CLI arguments.
    #[must_use]
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Delay between two steps of the fastest worker.
    pub fn step_delay_duration(&self) -> Result<Duration, LiveError> {
        parse_duration(&self.step_delay)
            .ok_or_else(|| LiveError::Config(format!("invalid step delay: {:?}", self.step_delay)))
    }

    /// Multiplexer redraw interval; must be at least one millisecond.
    pub fn update_delay_duration(&self) -> Result<Duration, LiveError> {
        let delay = parse_duration(&self.update_delay).ok_or_else(|| {
            LiveError::Config(format!("invalid update delay: {:?}", self.update_delay))
        })?;
        if delay < MIN_UPDATE_DELAY {
            return Err(LiveError::Config(format!(
                "update delay must be at least {MIN_UPDATE_DELAY:?}"
            )));
        }
        Ok(delay)
    }

    /// Check flag combinations that clap cannot express.
    pub fn validate(&self) -> Result<(), LiveError> {
        if !self.single && self.workers == 0 {
            return Err(LiveError::Config("at least one worker is required".into()));
        }
        self.step_delay_duration()?;
        self.update_delay_duration()?;
        Ok(())
    }
}

/// Parse a duration string like "200ms", "30s", "5m", "1h".
fn parse_duration(s: &str) -> Option<Duration> {
    let s = s.trim();
    if let Some(ms) = s.strip_suffix("ms") {
        let n: u64 = ms.parse().ok()?;
        Some(Duration::from_millis(n))
    } else if let Some(mins) = s.strip_suffix('m') {
        let n: u64 = mins.parse().ok()?;
        Some(Duration::from_secs(n.checked_mul(60)?))
    } else if let Some(hours) = s.strip_suffix('h') {
        let n: u64 = hours.parse().ok()?;
        Some(Duration::from_secs(n.checked_mul(3600)?))
    } else if let Some(secs) = s.strip_suffix('s') {
        let n: u64 = secs.parse().ok()?;
        Some(Duration::from_secs(n))
    } else {
        let n: u64 = s.parse().ok()?;
        Some(Duration::from_millis(n))
    }
}
