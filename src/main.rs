//! # mzextract
//!
//! A command-line tool for extracting precursor ion information from tandem
//! mass spectrometry runs.
//!
//! ## Usage
//!
//! ```bash
//! # Extract precursors of MS2 scans from a Thermo RAW file (feature "thermo")
//! mzextract precursors sample.raw --ms-level 2 --scans 1-5000
//!
//! # Run the extraction over a generated DDA run
//! mzextract -v demo --json
//!
//! # Expand a scan range specification
//! mzextract scans "5,10-12,8"
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::init_logging(cli.verbosity());
    cli::dispatch(cli)
}
