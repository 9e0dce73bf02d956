#![no_main]

use libfuzzer_sys::fuzz_target;
use mzextract::precursor::window_intensity;
use mzextract::source::PeakArrays;

fuzz_target!(|input: (Vec<f64>, Vec<f64>, f64, f64)| {
    let (mz, intensity, center, half_width) = input;
    // Arbitrary (unsorted, mismatched, NaN) arrays must never index out of bounds
    let peaks = PeakArrays::new(mz, intensity);
    let _ = window_intensity(&peaks, center, half_width);
});
