use std::io::Write;

use anyhow::{Context, Result};
use log::info;

use mzextract::scan_range::scan_id_intervals;

/// Expand a scan range specification and print the scan numbers.
pub fn run(spec: &str, count_only: bool) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write_scans(&mut out, spec, count_only)
}

/// Write the scans named by `spec`, or only their number when `count_only`.
///
/// Scans are streamed from merged intervals, so large ranges are never
/// collected in memory.
pub fn write_scans<W: Write>(out: &mut W, spec: &str, count_only: bool) -> Result<()> {
    let intervals = scan_id_intervals(spec)
        .with_context(|| format!("Invalid scan range specification '{}'", spec))?;
    let count: u64 = intervals
        .iter()
        .map(|r| u64::from(*r.end() - *r.start()) + 1)
        .sum();

    info!("'{}' selects {} scans", spec, count);

    if count_only {
        writeln!(out, "{}", count)?;
    } else {
        for scan in intervals.into_iter().flatten() {
            writeln!(out, "{}", scan)?;
        }
    }
    Ok(())
}
