#![no_main]

use std::sync::Arc;

use libfuzzer_sys::fuzz_target;

use liveterm_core::style::visible_width;
use liveterm_core::sync_buffer::{BufferWriter, SyncBuffer};
use liveterm_core::terminal::FixedTerminal;
use liveterm_progress::{ActiveIndicators, ProgressIndicator, ProgressbarOptions};

fuzz_target!(|data: &[u8]| {
    if data.len() < 12 {
        return;
    }
    let total = u64::from(u32::from_le_bytes([data[0], data[1], data[2], data[3]]));
    let step = u64::from(u32::from_le_bytes([data[4], data[5], data[6], data[7]]));
    let width = usize::from(u16::from_le_bytes([data[8], data[9]])) % 400;
    let max_width = usize::from(data[10]);
    let title = String::from_utf8_lossy(&data[11..]).into_owned();

    let bar = ProgressIndicator::new(
        ProgressbarOptions::default()
            .with_title(title)
            .with_total(total)
            .with_max_width(max_width)
            .with_show_elapsed_time(false)
            .with_writer(BufferWriter::new(Arc::new(SyncBuffer::new())))
            .with_terminal(Arc::new(FixedTerminal::new(width)))
            .with_registry(Arc::new(ActiveIndicators::new())),
    );
    if bar.start().is_err() {
        return;
    }
    bar.add(step);

    // Rendering never panics, whatever the title or the widths.
    let _ = visible_width(&bar.render_string());
    let _ = bar.stop();
});
