//! [`ScanSource`] over a Thermo RAW file.

use std::ops::RangeInclusive;
use std::path::Path;

use thermorawfilereader::schema::SpectrumMode;
use thermorawfilereader::{RawFileReader, RawSpectrum};

use crate::precursor::{Reaction, TrailerValues};
use crate::source::{PeakArrays, ScanDataType, ScanSource, SourceError};
use crate::thermo::ThermoError;

/// Check if the current platform supports Thermo RAW file reading.
///
/// Returns `Ok(())` if supported, `Err(ThermoError::PlatformNotSupported)` otherwise.
fn check_platform_support() -> Result<(), ThermoError> {
    // Thermo's RawFileReader .NET assemblies only support x86/x86_64 architectures
    #[cfg(not(any(target_arch = "x86", target_arch = "x86_64")))]
    {
        return Err(ThermoError::PlatformNotSupported(format!(
            "Current architecture '{}' is not supported. \
             Thermo RAW file reading requires Windows, Linux, or macOS on x86/x86_64. \
             ARM-based systems (including Apple Silicon Macs) are not supported \
             because Thermo's RawFileReader .NET libraries require x86 architecture.",
            std::env::consts::ARCH
        )));
    }

    #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
    Ok(())
}

/// Scan data of a Thermo RAW file.
///
/// Scan numbers are 1-based; scan `n` is spectrum index `n - 1` of the reader.
pub struct ThermoScanSource {
    reader: RawFileReader,
    total_spectra: usize,
}

impl ThermoScanSource {
    /// Open a Thermo RAW file.
    ///
    /// # Errors
    /// - `ThermoError::PlatformNotSupported` if running on ARM architecture
    /// - `ThermoError::InvalidPath` if the file is missing or not a `.raw` file
    /// - `ThermoError::OpenError` if the reader cannot open the file
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, ThermoError> {
        check_platform_support()?;

        let path = path.as_ref();

        if !path.exists() {
            return Err(ThermoError::InvalidPath(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        if path.extension().map(|e| e.to_ascii_lowercase()) != Some("raw".into()) {
            return Err(ThermoError::InvalidPath(format!(
                "Expected .raw extension: {}",
                path.display()
            )));
        }

        let mut reader = RawFileReader::open(path)
            .map_err(|e| ThermoError::OpenError(format!("{}: {}", path.display(), e)))?;

        // Spectrum headers only; peaks are fetched through `get_spectrum_data`.
        reader.set_signal_loading(false);
        reader.set_centroid_spectra(false);

        let total_spectra = reader.len();

        Ok(Self {
            reader,
            total_spectra,
        })
    }

    /// Total number of spectra in the RAW file.
    pub fn len(&self) -> usize {
        self.total_spectra
    }

    /// Whether the RAW file is empty.
    pub fn is_empty(&self) -> bool {
        self.total_spectra == 0
    }

    /// Get instrument model information.
    pub fn instrument_model(&self) -> String {
        let model = self.reader.instrument_model();
        model.model().unwrap_or("Unknown").to_string()
    }

    fn index(&self, scan: u32) -> Result<usize, SourceError> {
        let index = scan.checked_sub(1).ok_or(SourceError::ScanNotFound(scan))? as usize;
        if index >= self.total_spectra {
            return Err(SourceError::ScanNotFound(scan));
        }
        Ok(index)
    }

    fn spectrum(&self, scan: u32) -> Result<RawSpectrum, SourceError> {
        let index = self.index(scan)?;
        self.spectrum_at(scan, index)
    }

    fn spectrum_at(&self, scan: u32, index: usize) -> Result<RawSpectrum, SourceError> {
        self.reader
            .get(index)
            .ok_or(SourceError::ScanNotFound(scan))
    }

    fn spectrum_data(&self, scan: u32, centroid: bool) -> Result<PeakArrays, SourceError> {
        let index = self.index(scan)?;
        let peaks = self
            .reader
            .get_spectrum_data(index, centroid)
            .map(|data| {
                PeakArrays::new(
                    data.mz().into_owned(),
                    data.intensity().iter().map(|&i| f64::from(i)).collect(),
                )
            })
            .ok_or(SourceError::NoPeakData(scan))?;
        peaks.validate(scan)?;
        Ok(peaks)
    }
}

impl ScanSource for ThermoScanSource {
    fn scan_numbers(&self) -> RangeInclusive<u32> {
        1..=self.total_spectra as u32
    }

    fn ms_level(&self, scan: u32) -> Option<u8> {
        self.spectrum(scan).ok().map(|s| s.ms_level())
    }

    fn reaction(&self, scan: u32) -> Result<Option<Reaction>, SourceError> {
        let spectrum = self.spectrum(scan)?;
        let ms_order = spectrum.ms_level();
        if ms_order < 2 {
            return Ok(None);
        }

        Ok(spectrum.precursor().map(|precursor| {
            let window = precursor.isolation_window();
            let isolation_width = f64::from(window.lower()) + f64::from(window.upper());
            Reaction::new(precursor.mz(), isolation_width, ms_order)
        }))
    }

    fn trailer_values(&self, scan: u32) -> Result<TrailerValues, SourceError> {
        let index = self.index(scan)?;
        let ms_level = self.spectrum_at(scan, index)?.ms_level();

        Ok(self
            .reader
            .get_raw_trailers_for(index)
            .map(|trailers| {
                TrailerValues::from_labels(trailers.iter().map(|t| (t.label, t.value)), ms_level)
            })
            .unwrap_or_default())
    }

    fn peak_arrays(&self, scan: u32, profile: bool) -> Result<PeakArrays, SourceError> {
        self.spectrum_data(scan, !profile)
    }

    fn has_centroid_data(&self, _scan: u32) -> bool {
        // The reader does not report centroid streams separately; `centroid`
        // asks it for vendor centroids instead.
        false
    }

    fn scan_data_type(&self, scan: u32) -> Result<ScanDataType, SourceError> {
        let spectrum = self.spectrum(scan)?;
        if spectrum.mode() == SpectrumMode::Profile {
            Ok(ScanDataType::Profile)
        } else {
            Ok(ScanDataType::Centroid)
        }
    }

    fn centroid(&self, scan: u32, _peaks: PeakArrays) -> Result<PeakArrays, SourceError> {
        self.spectrum_data(scan, true)
            .map_err(|e| SourceError::Centroiding {
                scan,
                reason: e.to_string(),
            })
    }
}

impl std::fmt::Debug for ThermoScanSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThermoScanSource")
            .field("total_spectra", &self.total_spectra)
            .finish()
    }
}
