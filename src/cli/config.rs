//! TOML configuration file support.
//!
//! Instead of passing many CLI flags, users can specify settings in a config file:
//!
//! ```toml
//! # mzextract.toml
//! [extraction]
//! scans = "1-500"
//! ms_levels = "2-3"
//! use_profile = false
//! include_intensity = true
//! ```

use std::collections::BTreeSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use mzextract::precursor::ExtractionConfig;
use mzextract::scan_range::{MsLevelRange, ScanRange};

/// Root configuration structure for mzextract.toml files.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Extraction-specific settings.
    #[serde(default)]
    pub extraction: ExtractionSection,
}

/// Configuration for precursor extraction.
#[derive(Debug, Default, Deserialize)]
pub struct ExtractionSection {
    /// Scans to process, as a range specification.
    pub scans: Option<ScanRange>,

    /// MS levels to process, as a range specification.
    pub ms_levels: Option<MsLevelRange>,

    /// Sum precursor intensity over profile data.
    pub use_profile: Option<bool>,

    /// Compute precursor intensities.
    pub include_intensity: Option<bool>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }
}

/// Extraction flags given on the command line.
#[derive(Debug, Default, Clone)]
pub struct ExtractionArgs {
    /// `--scans`
    pub scans: Option<ScanRange>,
    /// `--ms-level`
    pub ms_levels: Option<MsLevelRange>,
    /// `--profile`
    pub use_profile: bool,
    /// `--no-intensity`
    pub no_intensity: bool,
}

/// Settings after merging CLI flags, the config file and defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionSettings {
    /// Scans to process; all scans when `None`
    pub scans: Option<BTreeSet<u32>>,
    /// MS levels to process; all levels when `None`
    pub ms_levels: Option<BTreeSet<u8>>,
    /// Options passed to the extractor
    pub config: ExtractionConfig,
}

impl ExtractionSettings {
    /// Merge `args` over `file`. Flags win over the file, the file wins over defaults.
    pub fn resolve(args: ExtractionArgs, file: Option<&Config>) -> Self {
        let section = file.map(|c| &c.extraction);

        let scans = args
            .scans
            .or_else(|| section.and_then(|s| s.scans.clone()))
            .map(ScanRange::into_scans);

        let ms_levels = args
            .ms_levels
            .or_else(|| section.and_then(|s| s.ms_levels.clone()))
            .map(MsLevelRange::into_levels);

        let defaults = ExtractionConfig::default();
        let use_profile = args.use_profile
            || section
                .and_then(|s| s.use_profile)
                .unwrap_or(defaults.use_profile);
        let include_intensity = !args.no_intensity
            && section
                .and_then(|s| s.include_intensity)
                .unwrap_or(defaults.include_intensity);

        Self {
            scans,
            ms_levels,
            config: ExtractionConfig {
                use_profile,
                include_intensity,
            },
        }
    }
}
