//! In-memory scan source.

use std::ops::RangeInclusive;

use super::{PeakArrays, ScanDataType, ScanSource, SourceError};
use crate::precursor::{Reaction, TrailerValues};

/// One scan held by a [`MemoryScanSource`].
#[derive(Debug, Clone)]
pub struct ScanRecord {
    /// MS level (1, 2, ...)
    pub ms_level: u8,
    /// Native acquisition mode of `peaks`
    pub data_type: ScanDataType,
    /// Raw peak arrays as acquired
    pub peaks: PeakArrays,
    /// Separate centroid stream, if the instrument stored one
    pub centroid_stream: Option<PeakArrays>,
    /// Result a vendor centroider would give for `peaks`
    pub centroided: Option<PeakArrays>,
    /// Fragmentation reaction (MSn scans)
    pub reaction: Option<Reaction>,
    /// Trailer metadata
    pub trailer: TrailerValues,
}

impl ScanRecord {
    /// A centroided MS1 scan.
    pub fn ms1(peaks: PeakArrays) -> Self {
        Self {
            ms_level: 1,
            data_type: ScanDataType::Centroid,
            peaks,
            centroid_stream: None,
            centroided: None,
            reaction: None,
            trailer: TrailerValues::default(),
        }
    }

    /// A centroided MSn scan produced by `reaction`.
    pub fn msn(reaction: Reaction, peaks: PeakArrays) -> Self {
        Self {
            ms_level: reaction.ms_order,
            reaction: Some(reaction),
            ..Self::ms1(peaks)
        }
    }

    /// Override the MS level.
    pub fn with_ms_level(mut self, ms_level: u8) -> Self {
        self.ms_level = ms_level;
        self
    }

    /// Mark the raw peaks as profile data.
    pub fn profile(mut self) -> Self {
        self.data_type = ScanDataType::Profile;
        self
    }

    /// Attach a centroid stream.
    pub fn with_centroid_stream(mut self, peaks: PeakArrays) -> Self {
        self.centroid_stream = Some(peaks);
        self
    }

    /// Attach the arrays returned by [`ScanSource::centroid`].
    pub fn with_centroided(mut self, peaks: PeakArrays) -> Self {
        self.centroided = Some(peaks);
        self
    }

    /// Attach trailer values.
    pub fn with_trailer(mut self, trailer: TrailerValues) -> Self {
        self.trailer = trailer;
        self
    }

    /// Drop the reaction, as for an MSn scan whose reaction could not be read.
    pub fn without_reaction(mut self) -> Self {
        self.reaction = None;
        self
    }
}

/// A [`ScanSource`] backed by scans held in memory.
///
/// Scans are numbered consecutively from the first scan number (1 by default).
///
/// # Example
///
/// ```
/// use mzextract::precursor::Reaction;
/// use mzextract::source::{MemoryScanSource, PeakArrays, ScanRecord, ScanSource};
///
/// let mut source = MemoryScanSource::new();
/// let ms1 = source.push(ScanRecord::ms1(PeakArrays::from_pairs([(500.0, 1e4)])));
/// let ms2 = source.push(ScanRecord::msn(Reaction::new(500.0, 2.0, 2), PeakArrays::default()));
///
/// assert_eq!(source.scan_numbers(), ms1..=ms2);
/// assert_eq!(source.ms_level(ms2), Some(2));
/// ```
#[derive(Debug, Clone)]
pub struct MemoryScanSource {
    first_scan: u32,
    scans: Vec<ScanRecord>,
}

impl Default for MemoryScanSource {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryScanSource {
    /// Create an empty source starting at scan 1.
    pub fn new() -> Self {
        Self::with_first_scan(1)
    }

    /// Create an empty source whose first scan number is `first_scan` (at least 1).
    pub fn with_first_scan(first_scan: u32) -> Self {
        Self {
            first_scan: first_scan.max(1),
            scans: Vec::new(),
        }
    }

    /// Append a scan, returning its scan number.
    ///
    /// Scans past `u32::MAX` are stored but not addressable; they all report `u32::MAX`.
    pub fn push(&mut self, record: ScanRecord) -> u32 {
        self.scans.push(record);
        self.last_scan().unwrap_or(self.first_scan)
    }

    fn last_scan(&self) -> Option<u32> {
        let offset = u32::try_from(self.scans.len().checked_sub(1)?).unwrap_or(u32::MAX);
        Some(self.first_scan.saturating_add(offset))
    }

    /// Number of scans held.
    pub fn len(&self) -> usize {
        self.scans.len()
    }

    /// Whether no scans are held.
    pub fn is_empty(&self) -> bool {
        self.scans.is_empty()
    }

    /// Look up the record for `scan`.
    pub fn get(&self, scan: u32) -> Option<&ScanRecord> {
        let index = scan.checked_sub(self.first_scan)? as usize;
        self.scans.get(index)
    }

    fn record(&self, scan: u32) -> Result<&ScanRecord, SourceError> {
        self.get(scan).ok_or(SourceError::ScanNotFound(scan))
    }
}

impl ScanSource for MemoryScanSource {
    fn scan_numbers(&self) -> RangeInclusive<u32> {
        match self.last_scan() {
            Some(last) => self.first_scan..=last,
            // first >= 1, so first..=first-1 is empty
            None => self.first_scan..=self.first_scan - 1,
        }
    }

    fn ms_level(&self, scan: u32) -> Option<u8> {
        self.get(scan).map(|r| r.ms_level)
    }

    fn reaction(&self, scan: u32) -> Result<Option<Reaction>, SourceError> {
        Ok(self.record(scan)?.reaction)
    }

    fn trailer_values(&self, scan: u32) -> Result<TrailerValues, SourceError> {
        Ok(self.record(scan)?.trailer.clone())
    }

    fn peak_arrays(&self, scan: u32, profile: bool) -> Result<PeakArrays, SourceError> {
        let record = self.record(scan)?;
        let peaks = if profile {
            &record.peaks
        } else {
            record
                .centroid_stream
                .as_ref()
                .ok_or(SourceError::NoPeakData(scan))?
        };
        peaks.validate(scan)?;
        Ok(peaks.clone())
    }

    fn has_centroid_data(&self, scan: u32) -> bool {
        self.get(scan)
            .is_some_and(|r| r.centroid_stream.as_ref().is_some_and(|c| !c.is_empty()))
    }

    fn scan_data_type(&self, scan: u32) -> Result<ScanDataType, SourceError> {
        Ok(self.record(scan)?.data_type)
    }

    fn centroid(&self, scan: u32, _peaks: PeakArrays) -> Result<PeakArrays, SourceError> {
        self.record(scan)?
            .centroided
            .clone()
            .ok_or_else(|| SourceError::Centroiding {
                scan,
                reason: "no centroided arrays registered".to_string(),
            })
    }
}
