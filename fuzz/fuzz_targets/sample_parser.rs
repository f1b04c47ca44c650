#![no_main]

use fps_report::filter::TraceFilter;
use fps_report::regression::{compare_samples, CompareConfig};
use fps_report::samples::SampleStore;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Any input must either parse or be rejected, never panic
    if let Ok(store) = SampleStore::from_reader(data, "fuzz.csv", &TraceFilter::all()) {
        let _ = compare_samples(&store, &SampleStore::new(), &CompareConfig::default());
    }
});
