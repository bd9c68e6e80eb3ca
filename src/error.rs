//! # Archive Errors
//!
//! Error type shared by every archive query. Only two failures are modeled
//! explicitly (a missing archive file and a missing day key); everything the
//! HDF5 layer raises is propagated as-is.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while locating or reading a grid archive
#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error("File not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("Day {key} not found in file.")]
    DayNotFound { key: String },

    #[error("Variable '{variable}' not found for day {key}")]
    MissingVariable { variable: String, key: String },

    #[error("Invalid day key: {0}")]
    InvalidDayKey(String),

    #[error("Unexpected archive layout: {0}")]
    Schema(String),

    #[error("HDF5 error: {0}")]
    Hdf5(#[from] hdf5::Error),
}

/// Result type for archive operations
pub type ArchiveResult<T> = Result<T, ArchiveError>;
