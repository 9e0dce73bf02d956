//! Rendering of extraction results.

use std::fmt;
use std::io::Write;

use anyhow::{Context, Result};
use log::warn;

use mzextract::precursor::ScanExtraction;

/// Totals over one extraction run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ExtractionStats {
    pub scans: usize,
    pub precursors: usize,
    pub with_intensity: usize,
    pub warnings: usize,
}

impl ExtractionStats {
    pub fn from_results(results: &[ScanExtraction]) -> Self {
        let mut stats = Self::default();
        for result in results {
            stats.scans += 1;
            stats.warnings += result.warnings.len();
            if let Some(precursor) = &result.precursor {
                stats.precursors += 1;
                if precursor.intensity.is_some() {
                    stats.with_intensity += 1;
                }
            }
        }
        stats
    }
}

impl fmt::Display for ExtractionStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} scans, {} precursors ({} with intensity), {} warnings",
            self.scans, self.precursors, self.with_intensity, self.warnings
        )
    }
}

/// Log every warning carried by `results`.
pub fn log_warnings(results: &[ScanExtraction]) {
    for warning in results.iter().flat_map(|r| &r.warnings) {
        warn!("{}", warning);
    }
}

fn format_optional<T: fmt::Display>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

/// Write one tab-separated row per precursor.
pub fn write_table<W: Write>(out: &mut W, results: &[ScanExtraction]) -> Result<()> {
    writeln!(
        out,
        "scan\tms_level\tprecursor_scan\trecorded_mz\tselected_mz\tisolation_width\tcharge\tintensity"
    )?;
    for result in results {
        let Some(precursor) = &result.precursor else {
            continue;
        };
        writeln!(
            out,
            "{}\t{}\t{}\t{:.4}\t{:.4}\t{:.2}\t{}\t{}",
            result.scan,
            result.ms_level,
            format_optional(precursor.precursor_scan),
            precursor.recorded_mz,
            precursor.selected_ion_mz,
            precursor.isolation_width,
            format_optional(precursor.charge),
            format_optional(precursor.intensity.map(|i| format!("{:.1}", i))),
        )?;
    }
    Ok(())
}

/// Write all results as a JSON array.
pub fn write_json<W: Write>(out: &mut W, results: &[ScanExtraction]) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, results).context("Failed to serialize results")?;
    writeln!(out)?;
    Ok(())
}

/// Write results to stdout in the requested format.
pub fn print(results: &[ScanExtraction], json: bool) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if json {
        write_json(&mut out, results)
    } else {
        write_table(&mut out, results)
    }
}
