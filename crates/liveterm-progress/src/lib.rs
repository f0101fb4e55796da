//! # liveterm-progress
//!
//! A self-rendering progress indicator: title, zero-padded counter,
//! animated bar, color-faded percentage, and elapsed time on one line.
//!
//! ```no_run
//! use liveterm_progress::{ProgressIndicator, ProgressbarOptions};
//!
//! let bar = ProgressIndicator::new(ProgressbarOptions::default().with_total(3));
//! bar.start_with_title("Working").unwrap();
//! for _ in 0..3 {
//!     bar.increment();
//! }
//! assert!(!bar.is_active());
//! ```

pub mod elapsed;
pub mod indicator;
pub mod options;
pub mod registry;
pub mod render;

pub use indicator::{Phase, ProgressIndicator};
pub use options::ProgressbarOptions;
pub use registry::ActiveIndicators;
