#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Bound input size: a valid "1-4000000000" expands to billions of scans.
    if data.len() > 64 {
        return;
    }
    if let Ok(text) = std::str::from_utf8(data) {
        if text.contains('-') && text.len() > 8 {
            return;
        }
        // Must either parse or fail cleanly, never panic
        let _ = mzextract::scan_range::parse_scan_ids(text);
        let _ = mzextract::scan_range::parse_ms_levels(text);
    }
});
