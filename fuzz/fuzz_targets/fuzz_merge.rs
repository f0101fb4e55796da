#![no_main]

use libfuzzer_sys::fuzz_target;

use liveterm_multi::{merge_streams, visible_line};

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);
    // Treat NUL as a stream separator so one input covers several buffers.
    let streams: Vec<&str> = text.split('\0').collect();

    let merged = merge_streams(&streams);
    assert!(merged.matches('\n').count() >= streams.len());

    for stream in &streams {
        assert!(!visible_line(stream).contains('\r'));
    }
});
