//! # Grid Archive Reader
//!
//! Read-only queries over fused XCH4 archives. Each query opens the HDF5
//! file, copies out exactly the arrays it needs and closes the file before
//! returning; no handle outlives the call that opened it.
//!
//! ## Archive layout
//!
//! ```text
//! /lat                 1-D float
//! /lon                 1-D float
//! daily archive:
//! /YYYYMMDD/<var>      2-D float per variable (NaN = no retrieval)
//! /YYYYMMDD/date       scalar string
//! monthly mean archive:
//! /<var>               2-D float mean per variable
//! /<count>             2-D integer valid-day count per variable
//! /year, /month        scalar integers
//! ```
//!
//! Variables are whatever 2-D datasets the archive declares; nothing here
//! assumes one variable or two.

use crate::daykey::{DayKey, compose_key};
use crate::error::{ArchiveError, ArchiveResult};
use crate::grid::{Grid, GridAxes};
use hdf5::types::{FixedAscii, FixedUnicode, TypeDescriptor, VarLenAscii, VarLenUnicode};
use hdf5::{Dataset, Group};
use log::{debug, warn};
use ndarray::{Array2, Ix0};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

pub const LATITUDE: &str = "lat";
pub const LONGITUDE: &str = "lon";
pub const DATE: &str = "date";
pub const YEAR: &str = "year";
pub const MONTH: &str = "month";
/// Variable read by [`read_point_series`] when none is named.
pub const PRIMARY_VARIABLE: &str = "fused_xch4";

/// One day of a daily archive.
#[derive(Debug, Clone, PartialEq)]
pub struct DayRecord {
    pub key: DayKey,
    /// Human-readable date stored alongside the grids
    pub date: String,
    pub variables: BTreeMap<String, Grid>,
}

impl DayRecord {
    pub fn variable(&self, name: &str) -> Option<&Grid> {
        self.variables.get(name)
    }

    pub fn variable_names(&self) -> Vec<&str> {
        self.variables.keys().map(String::as_str).collect()
    }
}

/// Result of [`read_day`]: the shared axes plus the requested day.
#[derive(Debug, Clone, PartialEq)]
pub struct DaySnapshot {
    pub axes: GridAxes,
    pub record: DayRecord,
}

/// Every day of a daily archive, ordered by date.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyArchive {
    pub axes: GridAxes,
    pub days: BTreeMap<DayKey, DayRecord>,
}

/// Contents of a monthly mean archive.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyAggregate {
    pub axes: GridAxes,
    pub means: BTreeMap<String, Grid>,
    /// Per-pixel number of valid days behind each mean
    pub sample_counts: BTreeMap<String, Array2<u32>>,
    pub year: i32,
    pub month: u32,
}

impl MonthlyAggregate {
    /// Largest per-pixel valid-day count of a count grid.
    pub fn max_sample_count(&self, name: &str) -> Option<u32> {
        self.sample_counts.get(name)?.iter().copied().max()
    }
}

/// Value of one pixel on one day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PointSample {
    pub key: DayKey,
    pub value: Option<f64>,
}

/// Reads the axes, every variable grid and the date string of one day.
///
/// # Errors
///
/// - [`ArchiveError::FileNotFound`] if `path` does not exist
/// - [`ArchiveError::DayNotFound`] naming the composed `YYYYMMDD` key if the
///   archive has no such day (a key that is not a real date is never present)
///
/// # Examples
///
/// ```rust,no_run
/// use fused_xch4::read_day;
///
/// let snapshot = read_day("Fused_xch4/2021/fused_xch4_202101.h5", 2021, 1, 1)?;
/// println!("{}: {:?}", snapshot.record.date, snapshot.record.variable_names());
/// # Ok::<(), fused_xch4::ArchiveError>(())
/// ```
pub fn read_day<P: AsRef<Path>>(path: P, year: i32, month: u32, day: u32) -> ArchiveResult<DaySnapshot> {
    let key_name = compose_key(year, month, day);
    let file = open_archive(path.as_ref())?;

    if !file.link_exists(&key_name) {
        return Err(ArchiveError::DayNotFound { key: key_name });
    }
    let key: DayKey = key_name
        .parse()
        .map_err(|_| ArchiveError::DayNotFound { key: key_name.clone() })?;

    let axes = read_axes(&file)?;
    let record = read_day_record(&file, key, &axes)?;

    file.close()?;
    Ok(DaySnapshot { axes, record })
}

/// Reads the mean grids, sample-count grids and `year`/`month` of a monthly archive.
pub fn read_monthly_aggregate<P: AsRef<Path>>(path: P) -> ArchiveResult<MonthlyAggregate> {
    let file = open_archive(path.as_ref())?;
    let axes = read_axes(&file)?;

    let mut means = BTreeMap::new();
    let mut sample_counts = BTreeMap::new();
    for dataset in file.datasets()? {
        if dataset.ndim() != 2 {
            continue;
        }
        let name = member_name(&dataset.name()).to_string();
        match dataset.dtype()?.to_descriptor()? {
            TypeDescriptor::Float(_) => {
                let grid = read_grid(&dataset, &name, &axes)?;
                means.insert(name, grid);
            }
            TypeDescriptor::Integer(_) | TypeDescriptor::Unsigned(_) => {
                axes.check_shape(&name, &dataset.shape())?;
                debug!("Reading sample counts '{}'", name);
                sample_counts.insert(name, dataset.read_2d::<u32>()?);
            }
            other => debug!("Skipping dataset '{}' of type {:?}", name, other),
        }
    }

    let year = file.dataset(YEAR)?.read_scalar::<i64>()?;
    let month = file.dataset(MONTH)?.read_scalar::<i64>()?;
    let year = i32::try_from(year).map_err(|_| ArchiveError::Schema(format!("year {} out of range", year)))?;
    let month = u32::try_from(month)
        .ok()
        .filter(|m| (1..=12).contains(m))
        .ok_or_else(|| ArchiveError::Schema(format!("month {} out of range", month)))?;

    file.close()?;
    Ok(MonthlyAggregate {
        axes,
        means,
        sample_counts,
        year,
        month,
    })
}

/// Day keys present in a daily archive, ascending.
///
/// Only top-level groups with an all-digit name count as days; `lat`, `lon`
/// and any other name are ignored. An all-digit name that is not a valid
/// `YYYYMMDD` date is skipped with a warning. An archive without day groups
/// yields an empty list.
pub fn list_days<P: AsRef<Path>>(path: P) -> ArchiveResult<Vec<DayKey>> {
    let file = open_archive(path.as_ref())?;
    let keys = day_keys(&file)?;
    file.close()?;
    Ok(keys)
}

/// Value of [`PRIMARY_VARIABLE`] at one pixel for every day of the archive.
pub fn read_point_series<P: AsRef<Path>>(path: P, lat_idx: usize, lon_idx: usize) -> ArchiveResult<Vec<PointSample>> {
    read_point_series_for(path, PRIMARY_VARIABLE, lat_idx, lon_idx)
}

/// Value of `variable` at one pixel for every day of the archive.
///
/// The archive is opened once and only the indexed element of each day's
/// grid is read from disk. Samples come back in ascending day order, one per
/// key returned by [`list_days`].
pub fn read_point_series_for<P: AsRef<Path>>(
    path: P,
    variable: &str,
    lat_idx: usize,
    lon_idx: usize,
) -> ArchiveResult<Vec<PointSample>> {
    let file = open_archive(path.as_ref())?;
    let keys = day_keys(&file)?;

    let mut series = Vec::with_capacity(keys.len());
    for key in keys {
        let group = file.group(&key.to_string())?;
        if !group.link_exists(variable) {
            return Err(ArchiveError::MissingVariable {
                variable: variable.to_string(),
                key: key.to_string(),
            });
        }
        let pixel = group
            .dataset(variable)?
            .read_slice::<f64, _, Ix0>((lat_idx, lon_idx))?
            .into_scalar();
        let value = (!pixel.is_nan()).then_some(pixel);
        series.push(PointSample { key, value });
    }
    debug!("Read {} point samples at ({}, {})", series.len(), lat_idx, lon_idx);

    file.close()?;
    Ok(series)
}

/// Reads every day record of a daily archive.
pub fn read_daily_archive<P: AsRef<Path>>(path: P) -> ArchiveResult<DailyArchive> {
    let file = open_archive(path.as_ref())?;
    let axes = read_axes(&file)?;

    let mut days = BTreeMap::new();
    for key in day_keys(&file)? {
        let record = read_day_record(&file, key, &axes)?;
        days.insert(key, record);
    }

    file.close()?;
    Ok(DailyArchive { axes, days })
}

pub(crate) fn open_archive(path: &Path) -> ArchiveResult<hdf5::File> {
    if !path.exists() {
        return Err(ArchiveError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    debug!("Opening archive {}", path.display());
    Ok(hdf5::File::open(path)?)
}

pub(crate) fn read_axes(group: &Group) -> ArchiveResult<GridAxes> {
    let latitude = group.dataset(LATITUDE)?.read_1d::<f64>()?;
    let longitude = group.dataset(LONGITUDE)?.read_1d::<f64>()?;
    debug!("Axes: {} latitudes x {} longitudes", latitude.len(), longitude.len());
    Ok(GridAxes::new(latitude, longitude))
}

pub(crate) fn day_keys(group: &Group) -> ArchiveResult<Vec<DayKey>> {
    let mut keys = Vec::new();
    for child in group.groups()? {
        let full_name = child.name();
        let name = member_name(&full_name);
        if !DayKey::is_day_name(name) {
            continue;
        }
        match name.parse::<DayKey>() {
            Ok(key) => keys.push(key),
            Err(_) => warn!("Skipping group '{}': not a valid YYYYMMDD date", name),
        }
    }
    keys.sort();
    Ok(keys)
}

/// Last path component of an HDF5 object name (`/20210101/fused_xch4` -> `fused_xch4`).
pub(crate) fn member_name(full_name: &str) -> &str {
    full_name.rsplit('/').next().unwrap_or(full_name)
}

fn read_day_record(file: &hdf5::File, key: DayKey, axes: &GridAxes) -> ArchiveResult<DayRecord> {
    let group = file.group(&key.to_string())?;
    let date = read_string_scalar(&group.dataset(DATE)?)?;

    let mut variables = BTreeMap::new();
    for dataset in group.datasets()? {
        if dataset.ndim() != 2 {
            continue;
        }
        if let TypeDescriptor::Float(_) = dataset.dtype()?.to_descriptor()? {
            let name = member_name(&dataset.name()).to_string();
            let grid = read_grid(&dataset, &name, axes)?;
            variables.insert(name, grid);
        }
    }
    debug!("Day {}: variables {:?}", key, variables.keys().collect::<Vec<_>>());

    Ok(DayRecord { key, date, variables })
}

fn read_grid(dataset: &Dataset, name: &str, axes: &GridAxes) -> ArchiveResult<Grid> {
    axes.check_shape(name, &dataset.shape())?;
    debug!("Reading grid '{}'", dataset.name());
    Ok(Grid::from_nan_encoded(dataset.read_2d::<f64>()?))
}

/// Longest fixed-length string (in bytes) a date dataset may declare.
const MAX_FIXED_STRING: usize = 256;

/// Reads a scalar string of any HDF5 string type. Fixed-length strings
/// declaring more than [`MAX_FIXED_STRING`] bytes are rejected as `Schema`
/// rather than cut short.
fn read_string_scalar(dataset: &Dataset) -> ArchiveResult<String> {
    let text = match dataset.dtype()?.to_descriptor()? {
        TypeDescriptor::VarLenUnicode => dataset.read_scalar::<VarLenUnicode>()?.as_str().to_string(),
        TypeDescriptor::VarLenAscii => dataset.read_scalar::<VarLenAscii>()?.as_str().to_string(),
        TypeDescriptor::FixedAscii(size) | TypeDescriptor::FixedUnicode(size) if size > MAX_FIXED_STRING => {
            return Err(ArchiveError::Schema(format!(
                "'{}' is a {}-byte fixed string, at most {} supported",
                dataset.name(),
                size,
                MAX_FIXED_STRING
            )));
        }
        TypeDescriptor::FixedAscii(_) => dataset
            .read_scalar::<FixedAscii<MAX_FIXED_STRING>>()?
            .as_str()
            .to_string(),
        TypeDescriptor::FixedUnicode(_) => dataset
            .read_scalar::<FixedUnicode<MAX_FIXED_STRING>>()?
            .as_str()
            .to_string(),
        other => {
            return Err(ArchiveError::Schema(format!(
                "'{}' is {:?}, expected a string",
                dataset.name(),
                other
            )));
        }
    };
    Ok(text)
}
