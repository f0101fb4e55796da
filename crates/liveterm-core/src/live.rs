//! The `LivePrinter` capability and lifecycle fan-out.
//!
//! Anything that can be started and stopped generically implements
//! `LivePrinter`, which lets a coordinator drive heterogeneous printers
//! without knowing their concrete types.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use crate::error::LiveError;

/// A printer with a start/stop lifecycle that can be driven uniformly.
pub trait LivePrinter: Send + Sync {
    /// Start the printer.
    fn generic_start(&self) -> Result<(), LiveError>;

    /// Stop the printer. Stopping an inactive printer is a no-op.
    fn generic_stop(&self) -> Result<(), LiveError>;

    /// Whether the printer is currently running.
    fn is_active(&self) -> bool;
}

/// An ordered list of printers that are started and stopped together.
pub struct PrinterGroup {
    printers: RwLock<Vec<Arc<dyn LivePrinter>>>,
}

impl PrinterGroup {
    /// Create an empty group.
    #[must_use]
    pub fn new() -> Self {
        Self {
            printers: RwLock::new(Vec::new()),
        }
    }

    /// Register a printer.
    pub fn register(&self, printer: Arc<dyn LivePrinter>) {
        self.printers.write().push(printer);
    }

    /// Start every printer in registration order.
    ///
    /// All printers are attempted; the first error is returned.
    pub fn start_all(&self) -> Result<(), LiveError> {
        self.fan_out("start", |p| p.generic_start())
    }

    /// Stop every printer in registration order.
    pub fn stop_all(&self) -> Result<(), LiveError> {
        self.fan_out("stop", |p| p.generic_stop())
    }

    /// Number of registered printers.
    #[must_use]
    pub fn count(&self) -> usize {
        self.printers.read().len()
    }

    /// Number of registered printers that report themselves active.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.printers.read().iter().filter(|p| p.is_active()).count()
    }

    fn fan_out<F>(&self, action: &str, f: F) -> Result<(), LiveError>
    where
        F: Fn(&dyn LivePrinter) -> Result<(), LiveError>,
    {
        // Clone the handles so printers are driven without holding the lock.
        let printers: Vec<_> = self.printers.read().iter().map(Arc::clone).collect();
        debug!(count = printers.len(), action, "fanning out to sub-printers");

        let mut first_error = None;
        for printer in &printers {
            if let Err(err) = f(printer.as_ref()) {
                first_error.get_or_insert(err);
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}

impl Default for PrinterGroup {
    fn default() -> Self {
        Self::new()
    }
}
