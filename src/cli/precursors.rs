use std::path::PathBuf;

use anyhow::{Context, Result};
use log::info;

use mzextract::precursor::PrecursorExtractor;
use mzextract::thermo::ThermoScanSource;

use super::config::{Config, ExtractionArgs, ExtractionSettings};
use super::report::{self, ExtractionStats};

/// Extract precursors from a Thermo RAW file.
pub fn run(
    input: PathBuf,
    args: ExtractionArgs,
    config_path: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    if !input.exists() {
        anyhow::bail!("Input file does not exist: {}", input.display());
    }

    let file_config = config_path
        .as_deref()
        .map(Config::from_file)
        .transpose()?;
    let settings = ExtractionSettings::resolve(args, file_config.as_ref());

    info!("mzextract - Thermo RAW precursor extraction");
    info!("===========================================");
    info!("Input:  {}", input.display());
    if let Some(path) = config_path.as_ref() {
        info!("Config file: {}", path.display());
    }
    info!(
        "Intensity: {}",
        match (settings.config.include_intensity, settings.config.use_profile) {
            (false, _) => "disabled",
            (true, true) => "profile peaks",
            (true, false) => "centroided peaks",
        }
    );

    let source = ThermoScanSource::open(&input).context("Failed to open Thermo RAW file")?;
    info!("Instrument: {}", source.instrument_model());
    info!("Total spectra: {}", source.len());

    let extractor = PrecursorExtractor::new(&source, settings.config);
    let scans = extractor.select_scans(settings.scans.as_ref(), settings.ms_levels.as_ref());
    info!("Selected scans: {}", scans.len());

    let results = extractor
        .extract_many(&scans)
        .context("Failed to extract precursors")?;

    report::log_warnings(&results);
    info!("Done: {}", ExtractionStats::from_results(&results));
    report::print(&results, json)
}
