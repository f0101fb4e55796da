//! liveterm library: application logic for the live rendering demo.

pub mod app;
pub mod completion;
pub mod config;
pub mod errors;
pub mod ui;
pub mod version;
