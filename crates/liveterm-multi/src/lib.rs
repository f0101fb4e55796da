//! # liveterm-multi
//!
//! Shares one terminal area between several live printers. Each printer
//! writes into its own capture buffer; a periodic tick collapses every
//! buffer to its latest line and redraws the merged block in place.

pub mod merge;
pub mod multiplexer;
pub mod options;

pub use merge::{merge_streams, visible_line};
pub use multiplexer::BufferMultiplexer;
pub use options::MultiPrinterOptions;
