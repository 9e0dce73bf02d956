//! Access to instrument scan data.
//!
//! The precursor extraction code never decodes vendor files itself. It reads
//! reactions, trailer values and peak arrays through the [`ScanSource`] trait,
//! which is implemented by the Thermo backend (feature `thermo`) and by the
//! in-memory [`MemoryScanSource`] used for tests and synthetic runs.

use std::ops::RangeInclusive;

use serde::Serialize;

use crate::precursor::{Reaction, TrailerValues};

pub mod error;
pub mod memory;

pub use error::SourceError;
pub use memory::{MemoryScanSource, ScanRecord};

/// How the peaks of a scan were acquired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanDataType {
    /// Continuous peak shapes that still need centroiding
    Profile,
    /// Discrete (m/z, intensity) points
    Centroid,
}

/// Index-aligned m/z and intensity arrays for one scan.
///
/// `mz` is expected to be strictly ascending. Consumers must not assume the
/// invariant holds; they only rely on it for meaningful results.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PeakArrays {
    /// Mass-to-charge values, ascending
    pub mz: Vec<f64>,
    /// Intensities, one per m/z value
    pub intensity: Vec<f64>,
}

impl PeakArrays {
    /// Create peak arrays from parallel vectors.
    pub fn new(mz: Vec<f64>, intensity: Vec<f64>) -> Self {
        Self { mz, intensity }
    }

    /// Build peak arrays from `(mz, intensity)` pairs.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        let (mz, intensity) = pairs.into_iter().unzip();
        Self { mz, intensity }
    }

    /// Number of peaks.
    pub fn len(&self) -> usize {
        self.mz.len()
    }

    /// Whether there are no peaks.
    pub fn is_empty(&self) -> bool {
        self.mz.is_empty()
    }

    /// Check that both arrays have the same length.
    pub fn validate(&self, scan: u32) -> Result<(), SourceError> {
        if self.mz.len() != self.intensity.len() {
            return Err(SourceError::MismatchedArrays {
                scan,
                mz_len: self.mz.len(),
                intensity_len: self.intensity.len(),
            });
        }
        Ok(())
    }
}

/// Instrument data collaborator consulted by precursor extraction.
///
/// Scan numbers are the instrument's native, 1-based numbers.
pub trait ScanSource {
    /// All scan numbers present in the run.
    fn scan_numbers(&self) -> RangeInclusive<u32>;

    /// MS level of `scan`, or `None` if the scan does not exist.
    fn ms_level(&self, scan: u32) -> Option<u8>;

    /// The fragmentation reaction recorded for `scan`.
    ///
    /// `Ok(None)` means the scan exists but has no reaction (e.g. an MS1 scan).
    fn reaction(&self, scan: u32) -> Result<Option<Reaction>, SourceError>;

    /// Refined precursor values from the scan's trailer metadata.
    fn trailer_values(&self, scan: u32) -> Result<TrailerValues, SourceError>;

    /// The raw peak arrays of `scan` when `profile` is set, the centroid stream otherwise.
    fn peak_arrays(&self, scan: u32, profile: bool) -> Result<PeakArrays, SourceError>;

    /// Whether the instrument stored a separate centroid stream for `scan`.
    fn has_centroid_data(&self, scan: u32) -> bool;

    /// Native acquisition mode of `scan`.
    fn scan_data_type(&self, scan: u32) -> Result<ScanDataType, SourceError>;

    /// Reduce profile `peaks` of `scan` to centroids.
    fn centroid(&self, scan: u32, peaks: PeakArrays) -> Result<PeakArrays, SourceError>;
}

impl<S: ScanSource + ?Sized> ScanSource for &S {
    fn scan_numbers(&self) -> RangeInclusive<u32> {
        (**self).scan_numbers()
    }

    fn ms_level(&self, scan: u32) -> Option<u8> {
        (**self).ms_level(scan)
    }

    fn reaction(&self, scan: u32) -> Result<Option<Reaction>, SourceError> {
        (**self).reaction(scan)
    }

    fn trailer_values(&self, scan: u32) -> Result<TrailerValues, SourceError> {
        (**self).trailer_values(scan)
    }

    fn peak_arrays(&self, scan: u32, profile: bool) -> Result<PeakArrays, SourceError> {
        (**self).peak_arrays(scan, profile)
    }

    fn has_centroid_data(&self, scan: u32) -> bool {
        (**self).has_centroid_data(scan)
    }

    fn scan_data_type(&self, scan: u32) -> Result<ScanDataType, SourceError> {
        (**self).scan_data_type(scan)
    }

    fn centroid(&self, scan: u32, peaks: PeakArrays) -> Result<PeakArrays, SourceError> {
        (**self).centroid(scan, peaks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_pairs() {
        let peaks = PeakArrays::from_pairs([(100.0, 1.0), (200.0, 2.0)]);
        assert_eq!(peaks.mz, vec![100.0, 200.0]);
        assert_eq!(peaks.intensity, vec![1.0, 2.0]);
        assert_eq!(peaks.len(), 2);
        assert!(!peaks.is_empty());
    }

    #[test]
    fn test_validate_mismatch() {
        let peaks = PeakArrays::new(vec![1.0, 2.0], vec![1.0]);
        assert!(matches!(
            peaks.validate(7),
            Err(SourceError::MismatchedArrays {
                scan: 7,
                mz_len: 2,
                intensity_len: 1
            })
        ));
        assert!(PeakArrays::default().validate(1).is_ok());
    }
}
