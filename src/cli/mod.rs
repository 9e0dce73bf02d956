use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use mzextract::scan_range::{MsLevelRange, ScanRange};

mod config;
mod demo;
#[cfg(feature = "thermo")]
mod precursors;
mod report;
mod scans;

use config::ExtractionArgs;

/// mzextract - Precursor ion extraction for tandem MS scans
#[derive(Parser)]
#[command(name = "mzextract")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Options shared by the extracting subcommands.
#[derive(Args, Debug, Clone)]
struct ExtractionOpts {
    /// Scans to process, e.g. "1-100,250" (all scans when omitted)
    #[arg(short = 's', long, value_name = "RANGE")]
    scans: Option<ScanRange>,

    /// MS levels to process, e.g. "2-3" (all levels when omitted)
    #[arg(short = 'm', long = "ms-level", value_name = "RANGE")]
    ms_levels: Option<MsLevelRange>,

    /// Sum precursor intensity over profile data instead of centroids
    #[arg(long)]
    profile: bool,

    /// Skip precursor intensity computation
    #[arg(long)]
    no_intensity: bool,

    /// Load settings from a TOML config file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print results as JSON instead of a table
    #[arg(long)]
    json: bool,
}

impl ExtractionOpts {
    fn split(self) -> (ExtractionArgs, Option<PathBuf>, bool) {
        let args = ExtractionArgs {
            scans: self.scans,
            ms_levels: self.ms_levels,
            use_profile: self.profile,
            no_intensity: self.no_intensity,
        };
        (args, self.config, self.json)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Extract precursor information from a Thermo RAW file
    #[cfg(feature = "thermo")]
    Precursors {
        /// Input Thermo RAW file path
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        #[command(flatten)]
        opts: ExtractionOpts,
    },

    /// Extract precursors from a generated demo DDA run
    Demo {
        #[command(flatten)]
        opts: ExtractionOpts,
    },

    /// Expand a scan range specification into scan numbers
    Scans {
        /// Range specification, e.g. "5,10-12,8"
        #[arg(value_name = "RANGE", allow_hyphen_values = true)]
        spec: String,

        /// Print only the number of selected scans
        #[arg(long)]
        count: bool,
    },
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        #[cfg(feature = "thermo")]
        Commands::Precursors { input, opts } => {
            let (args, config, json) = opts.split();
            precursors::run(input, args, config, json)
        }
        Commands::Demo { opts } => {
            let (args, config, json) = opts.split();
            demo::run(args, config, json)
        }
        Commands::Scans { spec, count } => scans::run(&spec, count),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_demo_flags() {
        let cli = Cli::try_parse_from([
            "mzextract", "-vv", "demo", "--scans", "1-10", "--ms-level", "2", "--json",
        ])
        .unwrap();
        assert_eq!(cli.verbosity(), 2);
        match cli.command {
            Commands::Demo { opts } => {
                assert_eq!(opts.scans.unwrap().scans().len(), 10);
                assert_eq!(opts.ms_levels.unwrap().as_str(), "2");
                assert!(opts.json);
                assert!(!opts.profile);
            }
            _ => panic!("expected demo command"),
        }
    }

    #[test]
    fn test_invalid_scan_range_rejected_by_parser() {
        assert!(Cli::try_parse_from(["mzextract", "demo", "--scans", "1,,2"]).is_err());
    }

    #[test]
    fn test_invalid_ms_level_rejected_by_parser() {
        assert!(Cli::try_parse_from(["mzextract", "demo", "--ms-level", "2-x"]).is_err());
        assert!(Cli::try_parse_from(["mzextract", "demo", "--ms-level", "300"]).is_err());
    }
}
