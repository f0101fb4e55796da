//! # liveterm-core
//!
//! Shared building blocks for live terminal output: the `LivePrinter`
//! capability, thread-safe capture buffers, output sinks, the redrawable
//! terminal area, styling helpers, and periodic task scheduling.

pub mod area;
pub mod constants;
pub mod error;
pub mod live;
pub mod schedule;
pub mod sink;
pub mod style;
pub mod sync_buffer;
pub mod terminal;

// Re-exports
pub use area::{AreaRenderer, TerminalArea};
pub use constants::{
    exit_codes, DEFAULT_MAX_WIDTH, DEFAULT_TOTAL, DEFAULT_UPDATE_DELAY, ELAPSED_REDRAW_INTERVAL,
    FALLBACK_TERMINAL_WIDTH, STOP_GRACE_PERIOD,
};
pub use error::LiveError;
pub use live::{LivePrinter, PrinterGroup};
pub use schedule::{every, TaskHandle};
pub use sink::OutputSink;
pub use style::{paint, visible_width, Rgb};
pub use sync_buffer::{BufferWriter, SyncBuffer};
pub use terminal::{FixedTerminal, StdoutTerminal, Terminal};
