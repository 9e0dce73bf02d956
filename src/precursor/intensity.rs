//! Precursor intensity aggregation.
//!
//! The intensity reported for a precursor is the summed intensity of every peak
//! of the precursor scan inside a window around the selected m/z.

use crate::source::{PeakArrays, ScanDataType, ScanSource, SourceError};

/// Half width of the summation window whenever an isolation width is known.
///
/// The supplied width only decides whether a window is used at all; its value
/// does not scale the window.
pub const DEFAULT_HALF_WIDTH: f64 = 1.5;

/// Half width of the summation window for an optional isolation width.
pub fn window_half_width(isolation_width: Option<f64>) -> f64 {
    match isolation_width {
        Some(width) if width != 0.0 => DEFAULT_HALF_WIDTH,
        _ => 0.0,
    }
}

/// Sum the intensities of peaks with `center - half_width <= mz < center + half_width`.
///
/// The lower edge is located by binary search on the insertion point, so the
/// first in-window peak is never skipped. The forward scan stops at the upper
/// edge or at the end of the shorter array, whichever comes first.
///
/// # Example
///
/// ```
/// use mzextract::precursor::window_intensity;
/// use mzextract::source::PeakArrays;
///
/// let peaks = PeakArrays::new(
///     vec![100.0, 100.5, 101.0, 101.5, 102.0],
///     vec![10.0, 20.0, 30.0, 40.0, 50.0],
/// );
/// assert_eq!(window_intensity(&peaks, 101.0, 1.5), 150.0);
/// assert_eq!(window_intensity(&peaks, 101.0, 0.0), 0.0);
/// ```
pub fn window_intensity(peaks: &PeakArrays, center: f64, half_width: f64) -> f64 {
    let lower = center - half_width;
    let upper = center + half_width;
    let end = peaks.mz.len().min(peaks.intensity.len());

    let start = peaks.mz[..end].partition_point(|&mz| mz < lower);
    peaks.mz[start..end]
        .iter()
        .zip(&peaks.intensity[start..end])
        .take_while(|&(&mz, _)| mz < upper)
        .map(|(_, &intensity)| intensity)
        .sum()
}

/// Fetch the peaks of `scan` to aggregate over.
///
/// - `use_profile`: the raw arrays, unconditionally
/// - a stored centroid stream: that stream
/// - otherwise the raw arrays, centroided by the source if they are profile data
pub fn precursor_peaks<S>(
    source: &S,
    scan: u32,
    use_profile: bool,
) -> Result<PeakArrays, SourceError>
where
    S: ScanSource + ?Sized,
{
    if use_profile {
        return source.peak_arrays(scan, true);
    }

    if source.has_centroid_data(scan) {
        return source.peak_arrays(scan, false);
    }

    let peaks = source.peak_arrays(scan, true)?;
    match source.scan_data_type(scan)? {
        ScanDataType::Profile => source.centroid(scan, peaks),
        ScanDataType::Centroid => Ok(peaks),
    }
}

/// Sum the intensity around `precursor_mass` in `precursor_scan`, keeping the
/// source error if the peaks could not be obtained.
pub fn try_aggregate_intensity<S>(
    source: &S,
    precursor_scan: u32,
    precursor_mass: f64,
    isolation_width: Option<f64>,
    use_profile: bool,
) -> Result<f64, SourceError>
where
    S: ScanSource + ?Sized,
{
    let peaks = precursor_peaks(source, precursor_scan, use_profile)?;
    Ok(window_intensity(
        &peaks,
        precursor_mass,
        window_half_width(isolation_width),
    ))
}

/// Sum the intensity around `precursor_mass` in `precursor_scan`.
///
/// Returns `Some(0.0)` when no peak falls in the window and `None` only when the
/// source failed to provide peaks.
pub fn aggregate_intensity<S>(
    source: &S,
    precursor_scan: u32,
    precursor_mass: f64,
    isolation_width: Option<f64>,
    use_profile: bool,
) -> Option<f64>
where
    S: ScanSource + ?Sized,
{
    try_aggregate_intensity(
        source,
        precursor_scan,
        precursor_mass,
        isolation_width,
        use_profile,
    )
    .ok()
}
