//! Precursor ion resolution and intensity aggregation.
//!
//! - [`resolve_selected_ion_mz`] reconciles the recorded precursor m/z with the
//!   trailer's monoisotopic m/z
//! - [`aggregate_intensity`] sums precursor scan peaks in a window around an m/z
//! - [`PrecursorExtractor`] runs both for MSn scans of a [`ScanSource`](crate::source::ScanSource)

pub mod extractor;
pub mod intensity;
pub mod reaction;
pub mod resolver;

pub use extractor::{
    ExtractionConfig, PrecursorExtractor, PrecursorInfo, PrecursorWarning, ScanExtraction,
};
pub use intensity::{
    aggregate_intensity, precursor_peaks, try_aggregate_intensity, window_half_width,
    window_intensity, DEFAULT_HALF_WIDTH,
};
pub use reaction::{Reaction, TrailerValues};
pub use resolver::{effective_half_width, resolve_selected_ion_mz};
