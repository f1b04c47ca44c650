#![no_main]

use fps_report::filter::TraceFilter;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        // First line is the pattern, the rest are trace names
        let mut lines = input.lines();
        let pattern = lines.next().unwrap_or_default();
        if let Ok(filter) = TraceFilter::new(&[pattern], &[] as &[&str]) {
            for name in lines {
                let _ = filter.should_keep(name);
            }
        }
    }
});
