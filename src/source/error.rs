//! Error types for scan data sources.

use thiserror::Error;

/// Errors a [`ScanSource`](super::ScanSource) reports when scan data cannot be obtained.
#[derive(Error, Debug)]
pub enum SourceError {
    /// The scan number is outside the run
    #[error("Scan {0} not found")]
    ScanNotFound(u32),

    /// The scan exists but carries no peak data of the requested kind
    #[error("No peak data for scan {0}")]
    NoPeakData(u32),

    /// Centroiding a profile scan failed
    #[error("Centroiding failed for scan {scan}: {reason}")]
    Centroiding {
        /// Scan being centroided
        scan: u32,
        /// Backend-specific failure description
        reason: String,
    },

    /// Peak arrays whose lengths disagree
    #[error("Mismatched peak arrays for scan {scan}: {mz_len} m/z values, {intensity_len} intensities")]
    MismatchedArrays {
        /// Scan the arrays belong to
        scan: u32,
        /// Length of the m/z array
        mz_len: usize,
        /// Length of the intensity array
        intensity_len: usize,
    },

    /// Any other failure inside the instrument-data backend
    #[error("Backend error: {0}")]
    Backend(String),
}
