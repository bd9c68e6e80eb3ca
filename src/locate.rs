//! # Archive Location
//!
//! Archives are laid out one directory per year:
//!
//! ```text
//! <base>/<year>/fused_xch4_<year><MM>.h5        daily archive
//! <base>/<year>/fused_xch4_<year><MM>_mean.h5   monthly mean archive
//! ```

use crate::error::{ArchiveError, ArchiveResult};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// File name prefix shared by every archive.
pub const ARCHIVE_PREFIX: &str = "fused_xch4";

/// Which of the two archive flavours a path points to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArchiveKind {
    /// One group per day
    Daily,
    /// Monthly mean grids and per-pixel sample counts
    MonthlyMean,
}

impl ArchiveKind {
    fn suffix(&self) -> &'static str {
        match self {
            ArchiveKind::Daily => "",
            ArchiveKind::MonthlyMean => "_mean",
        }
    }
}

impl fmt::Display for ArchiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArchiveKind::Daily => write!(f, "daily"),
            ArchiveKind::MonthlyMean => write!(f, "monthly mean"),
        }
    }
}

/// Builds the expected archive path without touching the filesystem.
///
/// # Examples
///
/// ```rust
/// use fused_xch4::{archive_path, ArchiveKind};
/// use std::path::Path;
///
/// let path = archive_path(ArchiveKind::MonthlyMean, "/data/xch4", 2021, 3);
/// assert_eq!(path, Path::new("/data/xch4/2021/fused_xch4_202103_mean.h5"));
/// ```
pub fn archive_path<P: AsRef<Path>>(kind: ArchiveKind, base_directory: P, year: i32, month: u32) -> PathBuf {
    base_directory
        .as_ref()
        .join(year.to_string())
        .join(format!("{}_{}{:02}{}.h5", ARCHIVE_PREFIX, year, month, kind.suffix()))
}

/// Builds the archive path and checks that the file exists.
///
/// # Errors
///
/// Returns [`ArchiveError::FileNotFound`] carrying the attempted path when
/// nothing exists there.
pub fn locate<P: AsRef<Path>>(kind: ArchiveKind, base_directory: P, year: i32, month: u32) -> ArchiveResult<PathBuf> {
    let path = archive_path(kind, base_directory, year, month);
    debug!("Looking for {} archive at {}", kind, path.display());
    if !path.exists() {
        return Err(ArchiveError::FileNotFound { path });
    }
    Ok(path)
}
