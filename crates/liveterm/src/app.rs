//! Application entry point and dispatch.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use tracing::{debug, warn};

use liveterm_core::constants::exit_codes;
use liveterm_multi::{BufferMultiplexer, MultiPrinterOptions};
use liveterm_progress::{ActiveIndicators, ProgressIndicator, ProgressbarOptions};

use crate::config::AppConfig;
use crate::ui::{self, Tone};
use crate::{completion, version};

/// Run the application and return the process exit code.
pub fn run(config: &AppConfig) -> Result<i32> {
    // Handle shell completion
    if let Some(shell) = config.completion {
        completion::write_completion(shell, &mut std::io::stdout());
        return Ok(exit_codes::SUCCESS);
    }

    config.validate()?;
    let step = config.step_delay_duration()?;

    let cancel = Arc::new(AtomicBool::new(false));
    install_ctrlc_handler(Arc::clone(&cancel));

    if !config.quiet {
        ui::print(Tone::Info, &version::full_version());
    }

    let started = Instant::now();
    let finished = if config.single {
        run_single(config, step, &cancel)?
    } else {
        run_multi(config, step, &cancel)?
    };
    debug!(finished, elapsed = ?started.elapsed(), "demo finished");

    if cancel.load(Ordering::SeqCst) {
        ui::print(Tone::Warning, "interrupted");
        return Ok(exit_codes::ERROR_CANCELED);
    }
    if !config.quiet {
        let bars = if config.single { 1 } else { config.workers };
        ui::print(Tone::Success, &ui::summary(finished, bars, started.elapsed()));
    }
    Ok(exit_codes::SUCCESS)
}

fn bar_options(config: &AppConfig, title: impl Into<String>) -> ProgressbarOptions {
    ProgressbarOptions::default()
        .with_title(title)
        .with_total(config.total)
        .with_max_width(config.max_width)
        .with_show_elapsed_time(!config.no_elapsed)
        .with_remove_when_done(config.remove_when_done)
        .with_raw_output(config.raw)
}

/// One bar writing straight to stdout.
fn run_single(config: &AppConfig, step: Duration, cancel: &AtomicBool) -> Result<usize> {
    let bar = ProgressIndicator::new(bar_options(config, "working"));
    bar.start().context("starting progress bar")?;
    drive(&bar, step, cancel);
    bar.stop()?;
    Ok(usize::from(is_complete(&bar)))
}

/// One bar per worker, merged into a single area by a multiplexer.
fn run_multi(config: &AppConfig, step: Duration, cancel: &AtomicBool) -> Result<usize> {
    let multi = BufferMultiplexer::new(
        MultiPrinterOptions::default().with_update_delay(config.update_delay_duration()?),
    );
    let bars: Vec<ProgressIndicator> = (1..=config.workers)
        .map(|worker| {
            let bar = ProgressIndicator::new(
                bar_options(config, format!("worker {worker}"))
                    .with_writer(multi.new_output_channel()),
            );
            multi.register(Arc::new(bar.clone()));
            bar
        })
        .collect();

    multi.start().context("starting multiplexer")?;
    thread::scope(|scope| {
        for (index, bar) in bars.iter().enumerate() {
            // Later workers are slower so the bars visibly diverge.
            let slowdown = u32::try_from(index)
                .ok()
                .and_then(|index| (step / 2).checked_mul(index))
                .unwrap_or_default();
            let delay = step.saturating_add(slowdown);
            scope.spawn(move || drive(bar, delay, cancel));
        }
    });
    multi.stop().context("stopping multiplexer")?;

    Ok(bars.iter().filter(|bar| is_complete(bar)).count())
}

/// Advance `bar` one step per `step` until it completes or is cancelled.
fn drive(bar: &ProgressIndicator, step: Duration, cancel: &AtomicBool) {
    for _ in bar.current()..bar.total() {
        if cancel.load(Ordering::SeqCst) {
            break;
        }
        thread::sleep(step);
        bar.increment();
    }
}

fn is_complete(bar: &ProgressIndicator) -> bool {
    bar.total() > 0 && bar.current() >= bar.total()
}

/// First Ctrl+C lets the workers wind down; a second one restores the
/// cursor of every live bar and exits immediately.
fn install_ctrlc_handler(cancel: Arc<AtomicBool>) {
    let result = ctrlc::set_handler(move || {
        if cancel.swap(true, Ordering::SeqCst) {
            if let Err(err) = ActiveIndicators::global().stop_all() {
                warn!(error = %err, "failed to stop progress bars");
            }
            std::process::exit(exit_codes::ERROR_CANCELED);
        }
    });
    if let Err(err) = result {
        warn!(error = %err, "could not install Ctrl+C handler");
    }
}
