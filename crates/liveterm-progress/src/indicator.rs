//! The self-rendering progress indicator.
//!
//! Lifecycle: `Uninitialized -> Active -> Stopped`. Every state change
//! redraws the line synchronously as `"\r" + line`; while elapsed time is
//! shown a background task also redraws once per second. Reaching the total
//! stops the indicator automatically.

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tracing::{debug, trace};

use liveterm_core::constants::ELAPSED_REDRAW_INTERVAL;
use liveterm_core::error::LiveError;
use liveterm_core::live::LivePrinter;
use liveterm_core::schedule::{self, TaskHandle};

use crate::options::ProgressbarOptions;
use crate::render::{percentage, LineLayout};

/// Lifecycle phase of an indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Constructed, not yet started.
    Uninitialized,
    /// Started and rendering.
    Active,
    /// Stopped; cannot be started again.
    Stopped,
}

struct State {
    title: String,
    current: u64,
    total: u64,
    phase: Phase,
    started_at: Instant,
    stopped_at: Option<Instant>,
    rerender: Option<TaskHandle>,
}

impl State {
    fn elapsed(&self) -> Duration {
        self.stopped_at
            .unwrap_or_else(Instant::now)
            .saturating_duration_since(self.started_at)
    }
}

struct Inner {
    options: ProgressbarOptions,
    state: Mutex<State>,
    /// Serializes line redraws with the final write of `stop`.
    output: Mutex<()>,
}

/// A progress bar that renders itself to its writer.
///
/// Cloning yields another handle to the same indicator.
#[derive(Clone)]
pub struct ProgressIndicator {
    inner: Arc<Inner>,
}

impl ProgressIndicator {
    /// Create an indicator from finalized options.
    #[must_use]
    pub fn new(options: ProgressbarOptions) -> Self {
        let options = options.normalize();
        let state = State {
            title: options.title.clone(),
            current: options.current,
            total: options.total,
            phase: Phase::Uninitialized,
            started_at: options.started_at.unwrap_or_else(Instant::now),
            stopped_at: None,
            rerender: None,
        };
        Self {
            inner: Arc::new(Inner {
                options,
                state: Mutex::new(state),
                output: Mutex::new(()),
            }),
        }
    }

    /// A new, not yet started indicator with the same options.
    #[must_use]
    pub fn fresh(&self) -> Self {
        Self::new(self.inner.options.clone())
    }

    /// Start rendering.
    ///
    /// Starting an active indicator is a no-op; starting a stopped one fails
    /// with [`LiveError::AlreadyStopped`].
    pub fn start(&self) -> Result<(), LiveError> {
        self.start_inner(None)
    }

    /// Start rendering with `title` replacing the configured title.
    pub fn start_with_title(&self, title: impl Into<String>) -> Result<(), LiveError> {
        self.start_inner(Some(title.into()))
    }

    fn start_inner(&self, title: Option<String>) -> Result<(), LiveError> {
        let opts = &self.inner.options;
        let raw_title = {
            let mut state = self.inner.state.lock();
            match state.phase {
                Phase::Active => return Ok(()),
                Phase::Stopped => return Err(LiveError::AlreadyStopped),
                Phase::Uninitialized => {}
            }
            if let Some(title) = title {
                state.title = title;
            }
            state.phase = Phase::Active;
            state.started_at = opts.started_at.unwrap_or_else(Instant::now);
            (opts.raw_output && opts.show_title).then(|| state.title.clone())
        };

        match raw_title {
            Some(title) => self.write(&format!("{title}\n")),
            None if !opts.raw_output => opts.terminal.hide_cursor(),
            None => {}
        }
        opts.registry.register(self.clone());
        debug!(title = %self.title(), total = self.total(), "progress indicator started");

        self.update_progress();

        if opts.show_elapsed_time {
            let weak = Arc::downgrade(&self.inner);
            let task = schedule::every(ELAPSED_REDRAW_INTERVAL, move || {
                let Some(inner) = weak.upgrade() else {
                    return false;
                };
                let indicator = ProgressIndicator { inner };
                if !indicator.is_active() {
                    return false;
                }
                indicator.update_progress();
                true
            });
            let task = match task {
                Ok(task) => task,
                Err(err) => {
                    self.abort_start();
                    return Err(err.into());
                }
            };

            let mut state = self.inner.state.lock();
            if state.phase == Phase::Active {
                state.rerender = Some(task);
            } else {
                task.stop();
            }
        }
        Ok(())
    }

    /// Undo a start that could not schedule its redraw task, leaving the
    /// indicator unstarted.
    fn abort_start(&self) {
        let opts = &self.inner.options;
        {
            let mut state = self.inner.state.lock();
            state.phase = Phase::Uninitialized;
            state.rerender = None;
        }
        if !opts.raw_output {
            opts.terminal.show_cursor();
        }
        opts.registry.deregister(self);
        debug!(title = %self.title(), "progress indicator start aborted");
    }

    /// Stop rendering. Stopping an inactive indicator is a no-op.
    ///
    /// The final line stays visible followed by a newline, or is blanked
    /// out when `remove_when_done` is set.
    pub fn stop(&self) -> Result<(), LiveError> {
        let opts = &self.inner.options;
        let task = {
            let mut state = self.inner.state.lock();
            if state.phase != Phase::Active {
                return Ok(());
            }
            state.phase = Phase::Stopped;
            state.stopped_at = Some(Instant::now());
            state.rerender.take()
        };
        if let Some(task) = task {
            task.stop();
        }

        if !opts.raw_output {
            opts.terminal.show_cursor();
        }
        {
            let _output = self.inner.output.lock();
            if opts.remove_when_done {
                let blank = " ".repeat(opts.terminal.width());
                self.write(&format!("\r{blank}\r"));
            } else {
                self.write("\n");
            }
        }

        opts.registry.deregister(self);
        debug!(title = %self.title(), elapsed = ?self.elapsed(), "progress indicator stopped");
        Ok(())
    }

    /// Advance by `count`.
    ///
    /// Does nothing while the total is zero. Once the total is reached the
    /// total is raised to the current value and the indicator stops.
    pub fn add(&self, count: u64) -> &Self {
        let reached_total = {
            let mut state = self.inner.state.lock();
            if state.total == 0 {
                return self;
            }
            state.current = state.current.saturating_add(count);
            state.current >= state.total
        };
        self.update_progress();

        if reached_total {
            {
                let mut state = self.inner.state.lock();
                state.total = state.total.max(state.current);
            }
            self.update_progress();
            if let Err(err) = self.stop() {
                debug!(%err, "failed to stop completed indicator");
            }
        }
        self
    }

    /// Advance by one.
    pub fn increment(&self) -> &Self {
        self.add(1)
    }

    /// Replace the title and redraw.
    pub fn update_title(&self, title: impl Into<String>) -> &Self {
        self.inner.state.lock().title = title.into();
        self.update_progress();
        self
    }

    /// Restart the elapsed-time clock from now.
    pub fn reset_timer(&self) {
        self.inner.state.lock().started_at = Instant::now();
    }

    /// Use `instant` as the origin of the elapsed time.
    pub fn set_started_at(&self, instant: Instant) {
        self.inner.state.lock().started_at = instant;
    }

    /// Time since start; frozen once the indicator has stopped.
    pub fn elapsed(&self) -> Duration {
        self.inner.state.lock().elapsed()
    }

    /// The current line, or an empty string when inactive or disabled.
    pub fn render_string(&self) -> String {
        // Probe outside the lock.
        let width = self.inner.options.terminal.width();
        let state = self.inner.state.lock();
        if state.phase != Phase::Active {
            return String::new();
        }
        LineLayout {
            options: &self.inner.options,
            title: &state.title,
            current: state.current,
            total: state.total,
            elapsed: state.elapsed(),
        }
        .render(width)
    }

    fn update_progress(&self) {
        // A frame rendered before `stop` must not land after its final write.
        let _output = self.inner.output.lock();
        let line = self.render_string();
        if !line.is_empty() {
            self.write(&format!("\r{line}"));
        }
    }

    fn write(&self, text: &str) {
        if let Err(err) = self.inner.options.writer.write_str(text) {
            trace!(%err, "dropped progress output");
        }
    }

    pub fn current(&self) -> u64 {
        self.inner.state.lock().current
    }

    pub fn total(&self) -> u64 {
        self.inner.state.lock().total
    }

    pub fn title(&self) -> String {
        self.inner.state.lock().title.clone()
    }

    /// Rounded completion percentage.
    pub fn percentage(&self) -> u64 {
        let state = self.inner.state.lock();
        percentage(state.current, state.total)
    }

    pub fn phase(&self) -> Phase {
        self.inner.state.lock().phase
    }

    pub fn is_active(&self) -> bool {
        self.phase() == Phase::Active
    }

    /// Whether the elapsed-time redraw task is running.
    pub fn is_rerendering(&self) -> bool {
        self.inner
            .state
            .lock()
            .rerender
            .as_ref()
            .is_some_and(TaskHandle::is_active)
    }

    /// The options this indicator was built from.
    pub fn options(&self) -> &ProgressbarOptions {
        &self.inner.options
    }

    /// Whether both handles refer to the same indicator.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl LivePrinter for ProgressIndicator {
    fn generic_start(&self) -> Result<(), LiveError> {
        self.start()
    }

    fn generic_stop(&self) -> Result<(), LiveError> {
        self.stop()
    }

    fn is_active(&self) -> bool {
        ProgressIndicator::is_active(self)
    }
}

impl fmt::Debug for ProgressIndicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.state.lock();
        f.debug_struct("ProgressIndicator")
            .field("title", &state.title)
            .field("current", &state.current)
            .field("total", &state.total)
            .field("phase", &state.phase)
            .finish_non_exhaustive()
    }
}
