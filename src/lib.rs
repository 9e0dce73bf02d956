//! # mzextract - Precursor Extraction for Tandem MS Scans
//!
//! `mzextract` determines, for every fragmentation (MSn) scan of a run, which
//! precursor ion was selected and how intense it was in the precursor scan.
//!
//! ## Key Features
//!
//! - **Selected-ion resolution**: Reconciles the recorded precursor m/z with the
//!   instrument's refined monoisotopic m/z and isolation width.
//!
//! - **Precursor intensity**: Sums precursor scan peaks in a window around the
//!   selected m/z, using profile, centroid-stream or vendor-centroided peaks.
//!
//! - **Scan selection**: Compact range specifications (`"1-100,250"`) for the
//!   scans and MS levels to process.
//!
//! - **Pluggable data sources**: Anything implementing [`source::ScanSource`];
//!   Thermo RAW files are supported with the `thermo` feature.
//!
//! ## Quick Start
//!
//! ```rust
//! use mzextract::prelude::*;
//!
//! let mut source = MemoryScanSource::new();
//! source.push(ScanRecord::ms1(PeakArrays::new(
//!     vec![444.5, 445.12, 445.62],
//!     vec![2.0e4, 1.0e5, 5.0e4],
//! )));
//! let ms2 = source.push(
//!     ScanRecord::msn(Reaction::new(445.62, 1.6, 2), PeakArrays::default()).with_trailer(
//!         TrailerValues {
//!             monoisotopic_mz: Some(445.12),
//!             isolation_width: Some(1.6),
//!             ..Default::default()
//!         },
//!     ),
//! );
//!
//! let extractor = PrecursorExtractor::new(&source, ExtractionConfig::default());
//! let precursor = extractor.extract(ms2)?.precursor.expect("MS2 has a precursor");
//! assert_eq!(precursor.selected_ion_mz, 445.12);
//! assert_eq!(precursor.intensity, Some(1.7e5));
//! # Ok::<(), mzextract::source::SourceError>(())
//! ```
//!
//! ## Architecture
//!
//! - [`precursor`]: Selected-ion resolution, intensity aggregation and per-scan extraction
//! - [`scan_range`]: Scan range specification parsing
//! - [`source`]: The scan data abstraction and an in-memory implementation
//! - `thermo` (feature `thermo`): Thermo RAW file backend

// Documentation lints - enforce complete documentation for publication
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod precursor;
pub mod scan_range;
pub mod source;

#[cfg(feature = "thermo")]
pub mod thermo;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::precursor::{
        aggregate_intensity, resolve_selected_ion_mz, window_intensity, ExtractionConfig,
        PrecursorExtractor, PrecursorInfo, PrecursorWarning, Reaction, ScanExtraction,
        TrailerValues,
    };
    pub use crate::scan_range::{
        count_scan_ids, parse_ms_levels, parse_scan_ids, MsLevelRange, ScanRange, ScanRangeError,
    };
    pub use crate::source::{
        MemoryScanSource, PeakArrays, ScanDataType, ScanRecord, ScanSource, SourceError,
    };

    #[cfg(feature = "thermo")]
    pub use crate::thermo::{ThermoError, ThermoScanSource};
}
