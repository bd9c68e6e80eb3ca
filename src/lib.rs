//! # fused-xch4
//!
//! A Rust library for reading the global daily fused XCH4 dataset
//! (0.1° x 0.1°, 70°S-70°N, land only, ppb) from its HDF5 archives.
//!
//! ## Features
//!
//! - **Path convention**: [`locate`] finds the daily or monthly mean archive for a year/month
//! - **Day snapshots**: [`read_day`] copies out the axes and every variable grid of one day
//! - **Monthly means**: [`read_monthly_aggregate`] reads mean grids and per-pixel valid-day counts
//! - **Inventory**: [`list_days`] and [`info::get_archive_info`] describe what an archive holds
//! - **Point series**: [`read_point_series`] reads a single pixel across every day of a month
//! - **Explicit missing values**: NaN pixels surface as `None` in [`Grid`]
//!
//! Every query opens the archive, copies what it needs and closes the file
//! before returning.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use fused_xch4::{locate, read_day, ArchiveKind};
//!
//! let path = locate(ArchiveKind::Daily, "Fused_xch4", 2021, 1)?;
//! let snapshot = read_day(&path, 2021, 1, 1)?;
//!
//! let (lat_idx, lon_idx) = snapshot.axes.nearest_pixel(35.5665, 129.3780).unwrap();
//! if let Some(grid) = snapshot.record.variable("fused_xch4") {
//!     println!("{:?}", grid.get(lat_idx, lon_idx));
//! }
//! # Ok::<(), fused_xch4::ArchiveError>(())
//! ```

pub mod aggregate;
pub mod archive;
pub mod config;
pub mod daykey;
pub mod error;
pub mod grid;
pub mod info;
pub mod locate;
pub mod locator;
pub mod log;
pub mod region;

#[cfg(test)]
mod fixtures;

pub use crate::archive::{
    DailyArchive, DayRecord, DaySnapshot, MonthlyAggregate, PointSample, list_days, read_daily_archive, read_day,
    read_monthly_aggregate, read_point_series, read_point_series_for,
};
pub use crate::daykey::DayKey;
pub use crate::error::{ArchiveError, ArchiveResult};
pub use crate::grid::{Grid, GridAxes};
pub use crate::locate::{ArchiveKind, archive_path, locate};
pub use crate::locator::{nearest_index, nearest_pixel};
pub use crate::region::{Region, RegionalGrid};
