//! Per-scan precursor extraction over a [`ScanSource`].
//!
//! For each MSn scan the extractor reads the reaction and trailer values,
//! resolves the selected-ion m/z, locates the precursor scan and optionally sums
//! the precursor intensity there. Missing data never aborts a run: it is
//! returned as [`PrecursorWarning`] values for the caller to report.

use std::collections::BTreeSet;
use std::fmt;

use log::debug;
use serde::Serialize;

use super::intensity::try_aggregate_intensity;
use super::resolver::{effective_half_width, resolve_selected_ion_mz};
use crate::source::{ScanSource, SourceError};

/// Options controlling precursor extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractionConfig {
    /// Sum intensity over raw profile arrays instead of centroids
    pub use_profile: bool,
    /// Compute the precursor intensity at all
    pub include_intensity: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            use_profile: false,
            include_intensity: true,
        }
    }
}

/// Resolved precursor of one MSn scan.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrecursorInfo {
    /// Scan the precursor was isolated from, if it could be located
    pub precursor_scan: Option<u32>,
    /// Precursor m/z recorded with the reaction
    pub recorded_mz: f64,
    /// Selected-ion m/z to report
    pub selected_ion_mz: f64,
    /// Full isolation width used for resolution
    pub isolation_width: f64,
    /// Charge state from the trailer
    pub charge: Option<i32>,
    /// Summed precursor intensity
    pub intensity: Option<f64>,
}

/// A non-fatal problem found while extracting a precursor.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PrecursorWarning {
    /// An MSn scan without a fragmentation reaction
    MissingReaction {
        /// Affected scan
        scan: u32,
    },
    /// No scan of the preceding MS level was found
    MissingPrecursorScan {
        /// Affected scan
        scan: u32,
    },
    /// Peaks of the precursor scan could not be read
    IntensityUnavailable {
        /// Affected scan
        scan: u32,
        /// Precursor scan whose peaks were requested
        precursor_scan: u32,
        /// Source error description
        reason: String,
    },
}

impl fmt::Display for PrecursorWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingReaction { scan } => {
                write!(f, "Scan {}: no reaction found, precursor information skipped", scan)
            }
            Self::MissingPrecursorScan { scan } => {
                write!(f, "Scan {}: precursor scan not found", scan)
            }
            Self::IntensityUnavailable {
                scan,
                precursor_scan,
                reason,
            } => write!(
                f,
                "Scan {}: precursor intensity unavailable from scan {}: {}",
                scan, precursor_scan, reason
            ),
        }
    }
}

/// Extraction result for a single scan.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanExtraction {
    /// Scan number
    pub scan: u32,
    /// MS level of the scan
    pub ms_level: u8,
    /// Precursor, for MSn scans with a reaction
    pub precursor: Option<PrecursorInfo>,
    /// Problems encountered along the way
    pub warnings: Vec<PrecursorWarning>,
}

/// Precursor extraction over a scan source.
///
/// # Example
///
/// ```
/// use mzextract::precursor::{ExtractionConfig, PrecursorExtractor, Reaction};
/// use mzextract::source::{MemoryScanSource, PeakArrays, ScanRecord};
///
/// let mut source = MemoryScanSource::new();
/// source.push(ScanRecord::ms1(PeakArrays::from_pairs([(500.0, 1e4)])));
/// let ms2 = source.push(ScanRecord::msn(Reaction::new(500.0, 2.0, 2), PeakArrays::default()));
///
/// let extractor = PrecursorExtractor::new(&source, ExtractionConfig::default());
/// let result = extractor.extract(ms2)?;
/// let precursor = result.precursor.expect("MS2 scan has a reaction");
/// assert_eq!(precursor.selected_ion_mz, 500.0);
/// assert_eq!(precursor.precursor_scan, Some(1));
/// # Ok::<(), mzextract::source::SourceError>(())
/// ```
#[derive(Debug, Clone)]
pub struct PrecursorExtractor<S> {
    source: S,
    config: ExtractionConfig,
}

impl<S: ScanSource> PrecursorExtractor<S> {
    /// Create an extractor over `source`.
    pub fn new(source: S, config: ExtractionConfig) -> Self {
        Self { source, config }
    }

    /// The underlying scan source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// The extraction options.
    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Scans of the run to process, restricted to `scans` and `ms_levels` when given.
    pub fn select_scans(
        &self,
        scans: Option<&BTreeSet<u32>>,
        ms_levels: Option<&BTreeSet<u8>>,
    ) -> Vec<u32> {
        let range = self.source.scan_numbers();
        if range.is_empty() {
            return Vec::new();
        }
        let candidates: Vec<u32> = match scans {
            Some(scans) => scans.range(range).copied().collect(),
            None => range.collect(),
        };

        match ms_levels {
            Some(levels) => candidates
                .into_iter()
                .filter(|scan| {
                    self.source
                        .ms_level(*scan)
                        .is_some_and(|level| levels.contains(&level))
                })
                .collect(),
            None => candidates,
        }
    }

    /// Find the precursor scan of `scan`: the trailer's master scan when it is
    /// valid, otherwise the closest earlier scan one MS level down.
    pub fn find_precursor_scan(
        &self,
        scan: u32,
        ms_level: u8,
        master_scan: Option<u32>,
    ) -> Option<u32> {
        let parent_level = ms_level.checked_sub(1).filter(|l| *l > 0)?;

        if let Some(master) = master_scan.filter(|m| *m < scan) {
            if self.source.ms_level(master) == Some(parent_level) {
                return Some(master);
            }
            debug!(
                "Scan {}: master scan {} is not at MS level {}, searching backwards",
                scan, master, parent_level
            );
        }

        let first = *self.source.scan_numbers().start();
        (first..scan)
            .rev()
            .find(|candidate| self.source.ms_level(*candidate) == Some(parent_level))
    }

    /// Extract the precursor of `scan`.
    ///
    /// MS1 scans yield no precursor and no warnings.
    ///
    /// # Errors
    /// Source errors other than missing peak data, e.g. an unknown scan number.
    pub fn extract(&self, scan: u32) -> Result<ScanExtraction, SourceError> {
        let ms_level = self
            .source
            .ms_level(scan)
            .ok_or(SourceError::ScanNotFound(scan))?;

        let mut extraction = ScanExtraction {
            scan,
            ms_level,
            precursor: None,
            warnings: Vec::new(),
        };

        if ms_level < 2 {
            return Ok(extraction);
        }

        let Some(reaction) = self.source.reaction(scan)? else {
            extraction
                .warnings
                .push(PrecursorWarning::MissingReaction { scan });
            return Ok(extraction);
        };

        let trailer = self.source.trailer_values(scan)?;
        let selected_ion_mz =
            resolve_selected_ion_mz(&reaction, trailer.monoisotopic_mz, trailer.isolation_width);
        let isolation_width = effective_half_width(&reaction, trailer.isolation_width) * 2.0;

        let precursor_scan = self.find_precursor_scan(scan, ms_level, trailer.master_scan);
        if precursor_scan.is_none() {
            extraction
                .warnings
                .push(PrecursorWarning::MissingPrecursorScan { scan });
        }

        let intensity = match precursor_scan {
            Some(precursor_scan) if self.config.include_intensity => {
                match try_aggregate_intensity(
                    &self.source,
                    precursor_scan,
                    selected_ion_mz,
                    trailer.isolation_width,
                    self.config.use_profile,
                ) {
                    Ok(intensity) => Some(intensity),
                    Err(e) => {
                        extraction
                            .warnings
                            .push(PrecursorWarning::IntensityUnavailable {
                                scan,
                                precursor_scan,
                                reason: e.to_string(),
                            });
                        None
                    }
                }
            }
            _ => None,
        };

        debug!(
            "Scan {}: recorded m/z {:.4}, selected m/z {:.4}, precursor scan {:?}",
            scan, reaction.precursor_mass, selected_ion_mz, precursor_scan
        );

        extraction.precursor = Some(PrecursorInfo {
            precursor_scan,
            recorded_mz: reaction.precursor_mass,
            selected_ion_mz,
            isolation_width,
            charge: trailer.charge,
            intensity,
        });
        Ok(extraction)
    }

    /// Extract precursors for every scan in `scans`, in input order.
    #[cfg(not(feature = "parallel"))]
    pub fn extract_many(&self, scans: &[u32]) -> Result<Vec<ScanExtraction>, SourceError> {
        scans.iter().map(|scan| self.extract(*scan)).collect()
    }
}

#[cfg(feature = "parallel")]
impl<S: ScanSource + Sync> PrecursorExtractor<S> {
    /// Extract precursors for every scan in `scans` in parallel, in input order.
    pub fn extract_many(&self, scans: &[u32]) -> Result<Vec<ScanExtraction>, SourceError> {
        use rayon::prelude::*;

        scans.par_iter().map(|scan| self.extract(*scan)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::precursor::{Reaction, TrailerValues};
    use crate::source::{MemoryScanSource, PeakArrays, ScanDataType, ScanRecord};

    fn ms1_peaks() -> PeakArrays {
        PeakArrays::new(
            vec![498.0, 499.5, 500.0, 500.5, 501.0, 503.0],
            vec![5.0, 10.0, 100.0, 50.0, 25.0, 1.0],
        )
    }

    fn run() -> MemoryScanSource {
        let mut source = MemoryScanSource::new();
        source.push(ScanRecord::ms1(ms1_peaks()));
        source.push(
            ScanRecord::msn(Reaction::new(500.2, 2.0, 2), PeakArrays::default()).with_trailer(
                TrailerValues {
                    monoisotopic_mz: Some(500.0),
                    isolation_width: Some(2.0),
                    charge: Some(2),
                    master_scan: None,
                },
            ),
        );
        source.push(
            ScanRecord::msn(Reaction::new(500.0, 2.0, 2), PeakArrays::default())
                .without_reaction(),
        );
        source
    }

    #[test]
    fn test_ms1_has_no_precursor() {
        let source = run();
        let extractor = PrecursorExtractor::new(&source, ExtractionConfig::default());
        let result = extractor.extract(1).unwrap();
        assert_eq!(result.ms_level, 1);
        assert!(result.precursor.is_none());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_ms2_resolution_and_intensity() {
        let source = run();
        let extractor = PrecursorExtractor::new(&source, ExtractionConfig::default());
        let result = extractor.extract(2).unwrap();
        let precursor = result.precursor.unwrap();

        assert_eq!(precursor.selected_ion_mz, 500.0);
        assert_eq!(precursor.recorded_mz, 500.2);
        assert_eq!(precursor.isolation_width, 2.0);
        assert_eq!(precursor.precursor_scan, Some(1));
        assert_eq!(precursor.charge, Some(2));
        // [498.5, 501.5) around 500.0
        assert_eq!(precursor.intensity, Some(185.0));
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_missing_reaction_is_warning() {
        let source = run();
        let extractor = PrecursorExtractor::new(&source, ExtractionConfig::default());
        let result = extractor.extract(3).unwrap();
        assert!(result.precursor.is_none());
        assert_eq!(
            result.warnings,
            vec![PrecursorWarning::MissingReaction { scan: 3 }]
        );
    }

    #[test]
    fn test_intensity_disabled() {
        let source = run();
        let config = ExtractionConfig {
            include_intensity: false,
            ..Default::default()
        };
        let extractor = PrecursorExtractor::new(&source, config);
        let precursor = extractor.extract(2).unwrap().precursor.unwrap();
        assert_eq!(precursor.intensity, None);
    }

    #[test]
    fn test_unknown_scan_is_error() {
        let source = run();
        let extractor = PrecursorExtractor::new(&source, ExtractionConfig::default());
        assert!(matches!(
            extractor.extract(42),
            Err(SourceError::ScanNotFound(42))
        ));
    }

    #[test]
    fn test_precursor_scan_search() {
        let mut source = MemoryScanSource::new();
        let ms1 = source.push(ScanRecord::ms1(ms1_peaks()));
        let ms2 = source.push(ScanRecord::msn(Reaction::new(500.0, 2.0, 2), PeakArrays::default()));
        let ms3 = source.push(ScanRecord::msn(Reaction::new(300.0, 2.0, 3), PeakArrays::default()));
        let extractor = PrecursorExtractor::new(&source, ExtractionConfig::default());

        assert_eq!(extractor.find_precursor_scan(ms2, 2, None), Some(ms1));
        assert_eq!(extractor.find_precursor_scan(ms3, 3, None), Some(ms2));
        assert_eq!(extractor.find_precursor_scan(ms1, 1, None), None);
        // A master scan at the wrong level is ignored.
        assert_eq!(extractor.find_precursor_scan(ms3, 3, Some(ms1)), Some(ms2));
        // A master scan after the scan itself is ignored.
        assert_eq!(extractor.find_precursor_scan(ms2, 2, Some(ms3)), Some(ms1));
    }

    #[test]
    fn test_missing_precursor_scan() {
        let mut source = MemoryScanSource::new();
        let ms2 = source.push(ScanRecord::msn(Reaction::new(500.0, 2.0, 2), PeakArrays::default()));
        let extractor = PrecursorExtractor::new(&source, ExtractionConfig::default());
        let result = extractor.extract(ms2).unwrap();

        let precursor = result.precursor.unwrap();
        assert_eq!(precursor.precursor_scan, None);
        assert_eq!(precursor.intensity, None);
        assert_eq!(
            result.warnings,
            vec![PrecursorWarning::MissingPrecursorScan { scan: ms2 }]
        );
    }

    #[test]
    fn test_intensity_failure_is_warning() {
        let mut source = MemoryScanSource::new();
        source.push(ScanRecord::ms1(ms1_peaks()).profile());
        let ms2 = source.push(
            ScanRecord::msn(Reaction::new(500.0, 2.0, 2), PeakArrays::default())
                .with_trailer(TrailerValues {
                    isolation_width: Some(2.0),
                    ..Default::default()
                }),
        );
        let extractor = PrecursorExtractor::new(&source, ExtractionConfig::default());
        let result = extractor.extract(ms2).unwrap();

        assert_eq!(result.precursor.unwrap().intensity, None);
        assert!(matches!(
            result.warnings.as_slice(),
            [PrecursorWarning::IntensityUnavailable { precursor_scan: 1, .. }]
        ));
    }

    #[test]
    fn test_select_scans() {
        let source = run();
        let extractor = PrecursorExtractor::new(&source, ExtractionConfig::default());

        assert_eq!(extractor.select_scans(None, None), vec![1, 2, 3]);

        let wanted: BTreeSet<u32> = [2, 3, 99].into_iter().collect();
        assert_eq!(extractor.select_scans(Some(&wanted), None), vec![2, 3]);

        let levels: BTreeSet<u8> = [1].into_iter().collect();
        assert_eq!(extractor.select_scans(None, Some(&levels)), vec![1]);
    }

    #[test]
    fn test_extract_many_preserves_order() {
        let source = run();
        let extractor = PrecursorExtractor::new(&source, ExtractionConfig::default());
        let results = extractor.extract_many(&[3, 1, 2]).unwrap();
        let scans: Vec<u32> = results.iter().map(|r| r.scan).collect();
        assert_eq!(scans, vec![3, 1, 2]);
    }

    #[test]
    fn test_warning_display() {
        let warning = PrecursorWarning::MissingReaction { scan: 7 };
        assert!(warning.to_string().contains("Scan 7"));
    }

    /// Counts peak reads of the wrapped source.
    struct PeakReadCounter {
        inner: MemoryScanSource,
        peak_reads: std::cell::Cell<usize>,
    }

    impl ScanSource for PeakReadCounter {
        fn scan_numbers(&self) -> std::ops::RangeInclusive<u32> {
            self.inner.scan_numbers()
        }

        fn ms_level(&self, scan: u32) -> Option<u8> {
            self.inner.ms_level(scan)
        }

        fn reaction(&self, scan: u32) -> Result<Option<Reaction>, SourceError> {
            self.inner.reaction(scan)
        }

        fn trailer_values(&self, scan: u32) -> Result<TrailerValues, SourceError> {
            self.inner.trailer_values(scan)
        }

        fn peak_arrays(&self, scan: u32, profile: bool) -> Result<PeakArrays, SourceError> {
            self.peak_reads.set(self.peak_reads.get() + 1);
            self.inner.peak_arrays(scan, profile)
        }

        fn has_centroid_data(&self, scan: u32) -> bool {
            self.inner.has_centroid_data(scan)
        }

        fn scan_data_type(&self, scan: u32) -> Result<ScanDataType, SourceError> {
            self.inner.scan_data_type(scan)
        }

        fn centroid(&self, scan: u32, peaks: PeakArrays) -> Result<PeakArrays, SourceError> {
            self.peak_reads.set(self.peak_reads.get() + 1);
            self.inner.centroid(scan, peaks)
        }
    }

    #[test]
    fn test_peaks_read_only_for_intensity() {
        let source = PeakReadCounter {
            inner: run(),
            peak_reads: std::cell::Cell::new(0),
        };
        let levels: BTreeSet<u8> = [2].into_iter().collect();

        let no_intensity = PrecursorExtractor::new(
            &source,
            ExtractionConfig {
                include_intensity: false,
                ..Default::default()
            },
        );
        let scans = no_intensity.select_scans(None, Some(&levels));
        assert_eq!(scans, vec![2, 3]);
        assert_eq!(no_intensity.find_precursor_scan(2, 2, None), Some(1));
        for scan in &scans {
            no_intensity.extract(*scan).unwrap();
        }
        assert_eq!(source.peak_reads.get(), 0);

        // One read of the precursor scan for the single MS2 with a reaction
        let extractor = PrecursorExtractor::new(&source, ExtractionConfig::default());
        for scan in extractor.select_scans(None, Some(&levels)) {
            extractor.extract(scan).unwrap();
        }
        assert_eq!(source.peak_reads.get(), 1);
    }
}
