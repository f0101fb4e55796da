//! Registry of running progress indicators.

use std::sync::{Arc, LazyLock};

use parking_lot::RwLock;

use liveterm_core::error::LiveError;

use crate::indicator::ProgressIndicator;

static GLOBAL: LazyLock<Arc<ActiveIndicators>> =
    LazyLock::new(|| Arc::new(ActiveIndicators::new()));

/// The set of currently running indicators.
///
/// Indicators register on start and deregister on stop. Tests and embedders
/// can inject their own registry through
/// [`ProgressbarOptions::with_registry`](crate::ProgressbarOptions::with_registry);
/// everything else shares [`ActiveIndicators::global`].
pub struct ActiveIndicators {
    entries: RwLock<Vec<ProgressIndicator>>,
}

impl ActiveIndicators {
    /// Create an empty, isolated registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
        }
    }

    /// The process-wide registry.
    #[must_use]
    pub fn global() -> Arc<Self> {
        Arc::clone(&GLOBAL)
    }

    /// Add an indicator. Registering the same indicator twice is a no-op.
    pub fn register(&self, indicator: ProgressIndicator) {
        let mut entries = self.entries.write();
        if !entries.iter().any(|e| e.ptr_eq(&indicator)) {
            entries.push(indicator);
        }
    }

    /// Remove an indicator, returning whether it was registered.
    pub fn deregister(&self, indicator: &ProgressIndicator) -> bool {
        let mut entries = self.entries.write();
        match entries.iter().position(|e| e.ptr_eq(indicator)) {
            Some(index) => {
                entries.remove(index);
                true
            }
            None => false,
        }
    }

    /// Whether `indicator` is registered.
    #[must_use]
    pub fn contains(&self, indicator: &ProgressIndicator) -> bool {
        self.entries.read().iter().any(|e| e.ptr_eq(indicator))
    }

    /// Number of registered indicators.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Handles to all registered indicators, in start order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<ProgressIndicator> {
        self.entries.read().clone()
    }

    /// Stop every registered indicator.
    pub fn stop_all(&self) -> Result<(), LiveError> {
        // Stopping deregisters, so iterate over a snapshot.
        let mut first_error = None;
        for indicator in self.snapshot() {
            if let Err(err) = indicator.stop() {
                first_error.get_or_insert(err);
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}

impl Default for ActiveIndicators {
    fn default() -> Self {
        Self::new()
    }
}
