use std::path::PathBuf;

use anyhow::{Context, Result};
use log::info;

use mzextract::precursor::{PrecursorExtractor, Reaction, TrailerValues};
use mzextract::source::{MemoryScanSource, PeakArrays, ScanRecord};

use super::config::{Config, ExtractionArgs, ExtractionSettings};
use super::report::{self, ExtractionStats};

/// Number of MS1 cycles in the synthetic run.
const CYCLES: usize = 5;
/// Precursors isolated per cycle.
const MS2_PER_CYCLE: usize = 3;

/// Extract precursors from a synthetic DDA run.
pub fn run(args: ExtractionArgs, config_path: Option<PathBuf>, json: bool) -> Result<()> {
    let file_config = config_path
        .as_deref()
        .map(Config::from_file)
        .transpose()?;
    let settings = ExtractionSettings::resolve(args, file_config.as_ref());

    info!("mzextract - Demo DDA run");
    info!("========================");

    let source = generate_mock_dda_run();
    info!("Generated {} scans", source.len());

    let extractor = PrecursorExtractor::new(&source, settings.config);
    let scans = extractor.select_scans(settings.scans.as_ref(), settings.ms_levels.as_ref());
    let results = extractor
        .extract_many(&scans)
        .context("Failed to extract precursors")?;

    report::log_warnings(&results);
    info!("Done: {}", ExtractionStats::from_results(&results));
    report::print(&results, json)
}

/// Build a run of MS1 survey scans, each followed by MS2 scans of its most
/// intense isotope clusters. The last MS2 of the run has lost its reaction.
pub fn generate_mock_dda_run() -> MemoryScanSource {
    let mut source = MemoryScanSource::new();

    for cycle in 0..CYCLES {
        let base_mz = 400.0 + cycle as f64 * 50.0;
        let mut peaks = Vec::new();
        for cluster in 0..MS2_PER_CYCLE {
            let mono = base_mz + cluster as f64 * 12.0;
            let height = 1.0e6 / (cluster as f64 + 1.0);
            // Isotope envelope of a doubly charged ion
            for isotope in 0..4 {
                let mz = mono + isotope as f64 * 0.5017;
                peaks.push((mz, height * [1.0, 0.8, 0.4, 0.15][isotope]));
            }
        }
        peaks.sort_by(|a, b| a.0.total_cmp(&b.0));
        source.push(ScanRecord::ms1(PeakArrays::from_pairs(peaks)));

        for cluster in 0..MS2_PER_CYCLE {
            let mono = base_mz + cluster as f64 * 12.0;
            // The instrument isolated the second isotope
            let recorded = mono + 0.5017;
            let fragments = PeakArrays::from_pairs(
                (1..=8).map(|i| (150.0 + i as f64 * 37.1, 1000.0 * i as f64)),
            );
            let mut record = ScanRecord::msn(Reaction::new(recorded, 1.6, 2), fragments)
                .with_trailer(TrailerValues {
                    monoisotopic_mz: Some(mono),
                    isolation_width: Some(1.6),
                    charge: Some(2),
                    master_scan: None,
                });
            if cycle == CYCLES - 1 && cluster == MS2_PER_CYCLE - 1 {
                record = record.without_reaction();
            }
            source.push(record);
        }
    }

    source
}
