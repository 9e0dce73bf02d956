//! Thermo RAW backend for precursor extraction.
//!
//! This module exposes Thermo Fisher RAW files as a [`ScanSource`](crate::source::ScanSource)
//! using the `thermorawfilereader` crate, which wraps the official .NET RawFileReader library.
//!
//! # Requirements
//!
//! - .NET 8 runtime must be installed on the system
//! - Thermo's RawFileReader license terms apply (bundled via thermorawfilereader)
//!
//! # Platform Support
//!
//! | Platform         | Support Status |
//! |------------------|----------------|
//! | Windows x86_64   | ✅ Full        |
//! | Linux x86_64     | ✅ Full        |
//! | macOS x86_64     | ✅ Full        |
//! | macOS ARM64      | ❌ Not supported - Thermo's RawFileReader .NET assemblies require x86 |
//! | Linux ARM64      | ❌ Not supported |
//!
//! On unsupported platforms, opening a file fails with a `PlatformNotSupported` error.
//!
//! # Example
//!
//! ```no_run
//! use mzextract::precursor::{ExtractionConfig, PrecursorExtractor};
//! use mzextract::thermo::ThermoScanSource;
//!
//! let source = ThermoScanSource::open("sample.raw")?;
//! let extractor = PrecursorExtractor::new(&source, ExtractionConfig::default());
//! let scans = extractor.select_scans(None, None);
//! for extraction in extractor.extract_many(&scans)? {
//!     if let Some(precursor) = extraction.precursor {
//!         println!("{} {:.4}", extraction.scan, precursor.selected_ion_mz);
//!     }
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod error;
pub mod source;

pub use error::ThermoError;
pub use source::ThermoScanSource;
