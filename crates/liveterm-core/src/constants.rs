//! Defaults and timing constants for live output.

use std::time::Duration;

/// Default interval between two merged redraws of a multiplexer.
pub const DEFAULT_UPDATE_DELAY: Duration = Duration::from_millis(200);

/// Pause between stopping sub-printers and the final multiplexer flush,
/// so writes issued by their `stop` land in the buffers.
pub const STOP_GRACE_PERIOD: Duration = Duration::from_millis(20);

/// Interval of the self-redraw task that keeps the elapsed time current.
pub const ELAPSED_REDRAW_INTERVAL: Duration = Duration::from_secs(1);

/// Smallest update delay accepted after normalization.
pub const MIN_UPDATE_DELAY: Duration = Duration::from_millis(1);

/// Default maximum width of a progress line, in columns.
pub const DEFAULT_MAX_WIDTH: usize = 80;

/// Default total of a progress indicator.
pub const DEFAULT_TOTAL: u64 = 100;

/// Width assumed when the terminal size cannot be probed.
pub const FALLBACK_TERMINAL_WIDTH: usize = 80;

/// Process exit codes used by the `liveterm` binary.
pub mod exit_codes {
    /// Successful execution.
    pub const SUCCESS: i32 = 0;
    /// Generic error.
    pub const ERROR_GENERIC: i32 = 1;
    /// Terminal I/O failure.
    pub const ERROR_IO: i32 = 2;
    /// Invalid configuration.
    pub const ERROR_CONFIG: i32 = 4;
    /// Interrupted by the user (Ctrl+C).
    pub const ERROR_CANCELED: i32 = 130;
}
