//! Periodic background tasks with cooperative cancellation.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crossbeam_channel::{bounded, RecvTimeoutError, Sender};
use tracing::trace;

/// Handle to a task started with [`every`].
///
/// Dropping the handle cancels the task as well.
#[derive(Debug)]
pub struct TaskHandle {
    stop_tx: Sender<()>,
    active: Arc<AtomicBool>,
}

impl TaskHandle {
    /// Ask the task to stop. It exits before its next tick.
    pub fn stop(&self) {
        self.active.store(false, Ordering::SeqCst);
        let _ = self.stop_tx.try_send(());
    }

    /// Whether the task is still scheduled.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }
}

/// Run `tick` every `interval` on a background thread until it returns
/// `false` or the returned handle is stopped or dropped.
///
/// The first tick happens one `interval` after the call.
pub fn every<F>(interval: Duration, mut tick: F) -> io::Result<TaskHandle>
where
    F: FnMut() -> bool + Send + 'static,
{
    let (stop_tx, stop_rx) = bounded::<()>(1);
    let active = Arc::new(AtomicBool::new(true));
    let task_active = Arc::clone(&active);

    thread::Builder::new()
        .name("liveterm-tick".to_string())
        .spawn(move || {
            loop {
                match stop_rx.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => {
                        if !task_active.load(Ordering::SeqCst) || !tick() {
                            break;
                        }
                    }
                    // Explicit stop, or the handle was dropped.
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            }
            task_active.store(false, Ordering::SeqCst);
            trace!("periodic task finished");
        })?;

    Ok(TaskHandle { stop_tx, active })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::time::Instant;

    fn wait_until(deadline: Duration, cond: impl Fn() -> bool) -> bool {
        let start = Instant::now();
        while start.elapsed() < deadline {
            if cond() {
                return true;
            }
            thread::sleep(Duration::from_millis(2));
        }
        cond()
    }

    #[test]
    fn ticks_until_closure_returns_false() {
        let count = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&count);
        let handle = every(Duration::from_millis(2), move || {
            c.fetch_add(1, Ordering::SeqCst) < 2
        })
        .unwrap();

        assert!(wait_until(Duration::from_secs(2), || !handle.is_active()));
        assert_eq!(count.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn stop_cancels_task() {
        let count = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&count);
        let handle = every(Duration::from_millis(2), move || {
            c.fetch_add(1, Ordering::SeqCst);
            true
        })
        .unwrap();

        assert!(wait_until(Duration::from_secs(2), || count.load(Ordering::SeqCst) > 0));
        handle.stop();
        assert!(!handle.is_active());

        thread::sleep(Duration::from_millis(20));
        let after_stop = count.load(Ordering::SeqCst);
        thread::sleep(Duration::from_millis(20));
        assert_eq!(count.load(Ordering::SeqCst), after_stop);
    }

    #[test]
    fn dropping_handle_cancels_task() {
        let count = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&count);
        let handle = every(Duration::from_millis(50), move || {
            c.fetch_add(1, Ordering::SeqCst);
            true
        })
        .unwrap();
        drop(handle);

        thread::sleep(Duration::from_millis(120));
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn first_tick_waits_one_interval() {
        let count = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&count);
        let handle = every(Duration::from_secs(60), move || {
            c.fetch_add(1, Ordering::SeqCst);
            true
        })
        .unwrap();
        thread::sleep(Duration::from_millis(20));
        assert_eq!(count.load(Ordering::SeqCst), 0);
        handle.stop();
    }
}
