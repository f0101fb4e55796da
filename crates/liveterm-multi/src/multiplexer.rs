//! The buffer multiplexer.
//!
//! A [`BufferMultiplexer`] owns one capture buffer per output channel and a
//! list of registered printers. While active, a background tick collapses
//! every buffer to its visible line and redraws the merged block through an
//! [`AreaRenderer`].

use std::sync::{Arc, Weak};
use std::thread;
use std::time::Duration;

use parking_lot::{Mutex, RwLock};
use tracing::{debug, trace};

use liveterm_core::area::{AreaRenderer, TerminalArea};
use liveterm_core::constants::STOP_GRACE_PERIOD;
use liveterm_core::error::LiveError;
use liveterm_core::live::{LivePrinter, PrinterGroup};
use liveterm_core::schedule::{self, TaskHandle};
use liveterm_core::sink::OutputSink;
use liveterm_core::sync_buffer::{BufferWriter, SyncBuffer};

use crate::merge::merge_streams;
use crate::options::MultiPrinterOptions;

struct State {
    active: bool,
    update_delay: Duration,
    buffers: Vec<Arc<SyncBuffer>>,
}

struct Inner {
    state: RwLock<State>,
    printers: PrinterGroup,
    area: Mutex<Box<dyn AreaRenderer>>,
    task: Mutex<Option<TaskHandle>>,
}

impl Inner {
    fn merged(&self) -> String {
        let buffers = self.state.read().buffers.clone();
        merge_streams(buffers.iter().map(|buffer| buffer.snapshot()))
    }

    /// Redraw from the background tick. Returns `false` once inactive.
    ///
    /// The active flag is checked while the area lock is held, so no tick
    /// can draw after the final flush in [`BufferMultiplexer::stop`].
    fn tick(&self) -> bool {
        let mut area = self.area.lock();
        if !self.state.read().active {
            return false;
        }
        let content = self.merged();
        if let Err(err) = area.update(&content) {
            trace!(error = %err, "multiplexer redraw failed");
        }
        true
    }
}

/// Coordinates several live printers on one shared terminal area.
///
/// Cloning yields another handle to the same multiplexer.
#[derive(Clone)]
pub struct BufferMultiplexer {
    inner: Arc<Inner>,
}

impl BufferMultiplexer {
    /// Create an inactive multiplexer with no channels and no printers.
    #[must_use]
    pub fn new(options: MultiPrinterOptions) -> Self {
        let options = options.normalize();
        let area: Box<dyn AreaRenderer> = match options.area {
            Some(area) => area,
            None => Box::new(TerminalArea::new(options.writer)),
        };
        Self {
            inner: Arc::new(Inner {
                state: RwLock::new(State {
                    active: false,
                    update_delay: options.update_delay,
                    buffers: Vec::new(),
                }),
                printers: PrinterGroup::new(),
                area: Mutex::new(area),
                task: Mutex::new(None),
            }),
        }
    }

    /// Allocate a new capture buffer and return a writer into it.
    ///
    /// Channels render in the order they were created.
    pub fn new_output_channel(&self) -> BufferWriter {
        let buffer = Arc::new(SyncBuffer::new());
        self.inner.state.write().buffers.push(Arc::clone(&buffer));
        BufferWriter::new(buffer)
    }

    /// Register a printer to be started and stopped with the multiplexer.
    pub fn register(&self, printer: Arc<dyn LivePrinter>) {
        self.inner.printers.register(printer);
    }

    /// Start every registered printer and the periodic redraw.
    ///
    /// Starting an active multiplexer is a no-op. If any printer fails to
    /// start, the printers that did start are stopped again, the multiplexer
    /// stays inactive and the first error is returned.
    pub fn start(&self) -> Result<(), LiveError> {
        let delay = {
            let mut state = self.inner.state.write();
            if state.active {
                return Ok(());
            }
            state.active = true;
            state.update_delay
        };

        if let Err(err) = self.inner.printers.start_all() {
            self.inner.state.write().active = false;
            if let Err(stop_err) = self.inner.printers.stop_all() {
                trace!(error = %stop_err, "rollback stop failed");
            }
            debug!(error = %err, "multiplexer start rolled back");
            return Err(err);
        }

        let weak: Weak<Inner> = Arc::downgrade(&self.inner);
        let task = schedule::every(delay, move || match weak.upgrade() {
            Some(inner) => inner.tick(),
            None => false,
        });
        match task {
            Ok(task) => *self.inner.task.lock() = Some(task),
            Err(err) => {
                self.inner.state.write().active = false;
                if let Err(stop_err) = self.inner.printers.stop_all() {
                    trace!(error = %stop_err, "rollback stop failed");
                }
                return Err(err.into());
            }
        }
        debug!(
            printers = self.printer_count(),
            channels = self.buffer_count(),
            delay_ms = delay.as_millis(),
            "multiplexer started"
        );
        Ok(())
    }

    /// Stop every registered printer, flush the final merged frame and
    /// finalize the area.
    ///
    /// Stopping an inactive multiplexer is a no-op.
    pub fn stop(&self) -> Result<(), LiveError> {
        {
            let mut state = self.inner.state.write();
            if !state.active {
                return Ok(());
            }
            state.active = false;
        }

        let fanout = self.inner.printers.stop_all();

        // Printers write their last line on stop; let it land in the buffers.
        thread::sleep(STOP_GRACE_PERIOD);

        if let Some(task) = self.inner.task.lock().take() {
            task.stop();
        }

        let content = self.inner.merged();
        {
            let mut area = self.inner.area.lock();
            if let Err(err) = area.update(&content) {
                trace!(error = %err, "multiplexer final redraw failed");
            }
            if let Err(err) = area.stop() {
                trace!(error = %err, "multiplexer area stop failed");
            }
        }
        debug!(
            still_active = self.inner.printers.active_count(),
            "multiplexer stopped"
        );

        fanout
    }

    /// Redirect the merged area to another sink.
    ///
    /// The previous area is replaced without being finalized.
    pub fn set_writer(&self, writer: impl Into<OutputSink>) {
        *self.inner.area.lock() = Box::new(TerminalArea::new(writer.into()));
    }

    /// The merged block as it would be drawn now.
    pub fn render_string(&self) -> String {
        self.inner.merged()
    }

    pub fn is_active(&self) -> bool {
        self.inner.state.read().active
    }

    pub fn buffer_count(&self) -> usize {
        self.inner.state.read().buffers.len()
    }

    pub fn printer_count(&self) -> usize {
        self.inner.printers.count()
    }
}

impl Default for BufferMultiplexer {
    fn default() -> Self {
        Self::new(MultiPrinterOptions::default())
    }
}

impl LivePrinter for BufferMultiplexer {
    fn generic_start(&self) -> Result<(), LiveError> {
        self.start()
    }

    fn generic_stop(&self) -> Result<(), LiveError> {
        self.stop()
    }

    fn is_active(&self) -> bool {
        BufferMultiplexer::is_active(self)
    }
}

impl std::fmt::Debug for BufferMultiplexer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.inner.state.read();
        f.debug_struct("BufferMultiplexer")
            .field("active", &state.active)
            .field("update_delay", &state.update_delay)
            .field("channels", &state.buffers.len())
            .field("printers", &self.inner.printers.count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, Write};
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::time::Instant;

    use liveterm_core::terminal::FixedTerminal;
    use liveterm_progress::{ActiveIndicators, ProgressIndicator, ProgressbarOptions};

    #[derive(Clone, Default)]
    struct RecordingArea {
        frames: Arc<Mutex<Vec<String>>>,
        stops: Arc<AtomicUsize>,
    }

    impl AreaRenderer for RecordingArea {
        fn update(&mut self, content: &str) -> io::Result<()> {
            self.frames.lock().push(content.to_string());
            Ok(())
        }

        fn stop(&mut self) -> io::Result<()> {
            self.stops.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    impl RecordingArea {
        fn last(&self) -> Option<String> {
            self.frames.lock().last().cloned()
        }
    }

    #[derive(Default)]
    struct FlagPrinter {
        active: AtomicBool,
    }

    impl LivePrinter for FlagPrinter {
        fn generic_start(&self) -> Result<(), LiveError> {
            self.active.store(true, Ordering::SeqCst);
            Ok(())
        }

        fn generic_stop(&self) -> Result<(), LiveError> {
            self.active.store(false, Ordering::SeqCst);
            Ok(())
        }

        fn is_active(&self) -> bool {
            self.active.load(Ordering::SeqCst)
        }
    }

    fn recorded(delay: Duration) -> (BufferMultiplexer, RecordingArea) {
        let area = RecordingArea::default();
        let multi = BufferMultiplexer::new(
            MultiPrinterOptions::default()
                .with_update_delay(delay)
                .with_area(Box::new(area.clone())),
        );
        (multi, area)
    }

    fn wait_until(limit: Duration, cond: impl Fn() -> bool) -> bool {
        let deadline = Instant::now() + limit;
        while Instant::now() < deadline {
            if cond() {
                return true;
            }
            thread::sleep(Duration::from_millis(2));
        }
        cond()
    }

    #[test]
    fn new_multiplexer_is_inactive() {
        let multi = BufferMultiplexer::default();
        assert!(!multi.is_active());
        assert_eq!(multi.buffer_count(), 0);
        assert_eq!(multi.printer_count(), 0);
        assert_eq!(multi.render_string(), "");
    }

    #[test]
    fn channels_render_in_creation_order() {
        let (multi, _) = recorded(Duration::from_secs(60));
        let mut first = multi.new_output_channel();
        let mut second = multi.new_output_channel();
        second.write_all(b"second").unwrap();
        first.write_all(b"first").unwrap();
        assert_eq!(multi.render_string(), "first\nsecond\n");
    }

    #[test]
    fn channels_collapse_to_latest_line() {
        let (multi, _) = recorded(Duration::from_secs(60));
        let mut channel = multi.new_output_channel();
        channel.write_all(b"\r10%\r20%\r30%").unwrap();
        assert_eq!(multi.render_string(), "30%\n");
    }

    #[test]
    fn start_and_stop_fan_out() {
        let (multi, area) = recorded(Duration::from_secs(60));
        let printer = Arc::new(FlagPrinter::default());
        multi.register(printer.clone());

        multi.start().unwrap();
        assert!(multi.is_active());
        assert!(printer.is_active());

        multi.stop().unwrap();
        assert!(!multi.is_active());
        assert!(!printer.is_active());
        assert_eq!(area.stops.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn tick_redraws_merged_content() {
        let (multi, area) = recorded(Duration::from_millis(5));
        let mut channel = multi.new_output_channel();
        multi.start().unwrap();
        channel.write_all(b"\rworking").unwrap();

        assert!(wait_until(Duration::from_secs(2), || {
            area.last().as_deref() == Some("working\n")
        }));
        multi.stop().unwrap();
    }

    #[test]
    fn stop_flushes_final_frame() {
        let (multi, area) = recorded(Duration::from_secs(60));
        let mut channel = multi.new_output_channel();
        multi.start().unwrap();
        channel.write_all(b"\rdone").unwrap();
        multi.stop().unwrap();
        assert_eq!(area.last().as_deref(), Some("done\n"));
    }

    #[test]
    fn no_redraw_after_stop() {
        let (multi, area) = recorded(Duration::from_millis(5));
        multi.new_output_channel();
        multi.start().unwrap();
        multi.stop().unwrap();
        let frames = area.frames.lock().len();
        thread::sleep(Duration::from_millis(30));
        assert_eq!(area.frames.lock().len(), frames);
    }

    #[test]
    fn double_start_is_noop() {
        let (multi, _) = recorded(Duration::from_secs(60));
        let printer = Arc::new(FlagPrinter::default());
        multi.register(printer);
        multi.start().unwrap();
        multi.start().unwrap();
        assert!(multi.is_active());
        multi.stop().unwrap();
    }

    #[test]
    fn stop_while_inactive_is_noop() {
        let (multi, area) = recorded(Duration::from_secs(60));
        multi.stop().unwrap();
        assert!(area.frames.lock().is_empty());
        assert_eq!(area.stops.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn restart_after_stop() {
        let (multi, area) = recorded(Duration::from_secs(60));
        multi.start().unwrap();
        multi.stop().unwrap();
        multi.start().unwrap();
        assert!(multi.is_active());
        multi.stop().unwrap();
        assert_eq!(area.stops.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn failed_restart_leaves_multiplexer_inactive() {
        let (multi, area) = recorded(Duration::from_millis(5));
        let flag = Arc::new(FlagPrinter::default());
        let bar = ProgressIndicator::new(
            ProgressbarOptions::default()
                .with_show_elapsed_time(false)
                .with_writer(multi.new_output_channel())
                .with_terminal(Arc::new(FixedTerminal::new(40)))
                .with_registry(Arc::new(ActiveIndicators::new())),
        );
        multi.register(flag.clone());
        multi.register(Arc::new(bar));

        multi.start().unwrap();
        multi.stop().unwrap();
        let frames = area.frames.lock().len();

        assert!(matches!(multi.start(), Err(LiveError::AlreadyStopped)));
        assert!(!multi.is_active());
        assert!(!flag.is_active());
        assert!(multi.inner.task.lock().is_none());

        thread::sleep(Duration::from_millis(30));
        assert_eq!(area.frames.lock().len(), frames);
        assert_eq!(area.stops.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn printers_and_channels_are_independent() {
        let (multi, area) = recorded(Duration::from_secs(60));
        let printer = Arc::new(FlagPrinter::default());
        multi.register(printer.clone());
        multi.new_output_channel();
        multi.new_output_channel();
        assert_eq!(multi.printer_count(), 1);
        assert_eq!(multi.buffer_count(), 2);

        multi.start().unwrap();
        multi.stop().unwrap();
        assert_eq!(area.last().as_deref(), Some("\n\n"));
    }

    #[test]
    fn set_writer_redirects_area() {
        let (multi, area) = recorded(Duration::from_secs(60));
        let output = Arc::new(SyncBuffer::new());
        multi.set_writer(BufferWriter::new(Arc::clone(&output)));

        let mut channel = multi.new_output_channel();
        multi.start().unwrap();
        channel.write_all(b"hello").unwrap();
        multi.stop().unwrap();

        assert!(area.frames.lock().is_empty());
        assert!(output.snapshot().contains("hello\n"));
    }

    #[test]
    fn drives_progress_indicators() {
        let (multi, area) = recorded(Duration::from_secs(60));
        let registry = Arc::new(ActiveIndicators::new());
        let terminal = Arc::new(FixedTerminal::new(40));
        let bars: Vec<ProgressIndicator> = ["a", "b"]
            .into_iter()
            .map(|title| {
                let bar = ProgressIndicator::new(
                    ProgressbarOptions::default()
                        .with_title(title)
                        .with_total(10)
                        .with_show_elapsed_time(false)
                        .with_writer(multi.new_output_channel())
                        .with_terminal(terminal.clone())
                        .with_registry(Arc::clone(&registry)),
                );
                multi.register(Arc::new(bar.clone()));
                bar
            })
            .collect();

        multi.start().unwrap();
        assert_eq!(registry.len(), 2);
        bars[0].add(3);
        bars[1].add(7);
        multi.stop().unwrap();

        assert!(registry.is_empty());
        let frame = area.last().unwrap();
        let lines: Vec<&str> = frame.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(liveterm_core::style::visible_width(lines[0]) <= 40);
        assert!(lines[0].contains("a"));
        assert!(lines[0].contains("03/10"));
        assert!(lines[1].contains("07/10"));
    }

    #[test]
    fn as_live_printer() {
        let (multi, _) = recorded(Duration::from_secs(60));
        let printer: Arc<dyn LivePrinter> = Arc::new(multi.clone());
        printer.generic_start().unwrap();
        assert!(multi.is_active());
        printer.generic_stop().unwrap();
        assert!(!printer.is_active());
    }
}
