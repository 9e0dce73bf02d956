//! Error types for the Thermo RAW backend.

use thiserror::Error;

use crate::source::SourceError;

/// Errors that can occur while opening or reading a Thermo RAW file.
#[derive(Error, Debug)]
pub enum ThermoError {
    /// Error opening the RAW file (file not found, invalid format, etc.)
    #[error("Failed to open RAW file: {0}")]
    OpenError(String),

    /// Path does not exist or is not a valid .raw file
    #[error("Invalid RAW path: {0}")]
    InvalidPath(String),

    /// Platform not supported (e.g., ARM architecture)
    #[error("Platform not supported: {0}. Thermo RAW reading requires x86/x86_64 architecture.")]
    PlatformNotSupported(String),

    /// Generic I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<ThermoError> for SourceError {
    fn from(error: ThermoError) -> Self {
        SourceError::Backend(error.to_string())
    }
}
