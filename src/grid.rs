//! # Grids and Axes
//!
//! Every variable in an archive is a 2-D field aligned to the archive's
//! shared latitude (rows) and longitude (columns) axes. On disk a missing
//! measurement is a NaN; in memory it is `None`, so a measured zero and an
//! absent retrieval cannot be confused and every reduction states how it
//! treats absent pixels.

use crate::error::{ArchiveError, ArchiveResult};
use crate::locator::nearest_pixel;
use ndarray::{Array1, Array2};

/// Latitude and longitude axes shared by every grid in one archive.
#[derive(Debug, Clone, PartialEq)]
pub struct GridAxes {
    pub latitude: Array1<f64>,
    pub longitude: Array1<f64>,
}

impl GridAxes {
    pub fn new(latitude: Array1<f64>, longitude: Array1<f64>) -> Self {
        GridAxes { latitude, longitude }
    }

    /// Expected grid shape `(len(lat), len(lon))`.
    pub fn shape(&self) -> (usize, usize) {
        (self.latitude.len(), self.longitude.len())
    }

    /// Axis-wise nearest `(lat_idx, lon_idx)` for a target coordinate.
    ///
    /// Returns `None` only when one of the axes is empty.
    pub fn nearest_pixel(&self, target_lat: f64, target_lon: f64) -> Option<(usize, usize)> {
        nearest_pixel(&self.latitude, &self.longitude, target_lat, target_lon)
    }

    /// Coordinates of a pixel, if the indices are in range.
    pub fn coordinates(&self, lat_idx: usize, lon_idx: usize) -> Option<(f64, f64)> {
        Some((*self.latitude.get(lat_idx)?, *self.longitude.get(lon_idx)?))
    }

    /// Checks that a grid read from the archive matches the axes.
    pub(crate) fn check_shape(&self, name: &str, shape: &[usize]) -> ArchiveResult<()> {
        let (rows, cols) = self.shape();
        if shape != [rows, cols] {
            return Err(ArchiveError::Schema(format!(
                "grid '{}' has shape {:?}, expected [{}, {}]",
                name, shape, rows, cols
            )));
        }
        Ok(())
    }
}

/// A 2-D concentration field with explicit missing pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    values: Array2<Option<f64>>,
}

impl Grid {
    pub fn new(values: Array2<Option<f64>>) -> Self {
        Grid { values }
    }

    /// Converts a NaN-encoded array into a grid; every NaN becomes `None`.
    pub fn from_nan_encoded(raw: Array2<f64>) -> Self {
        Grid {
            values: raw.mapv(|v| if v.is_nan() { None } else { Some(v) }),
        }
    }

    /// Back to the on-disk convention, missing pixels as NaN.
    pub fn to_nan_encoded(&self) -> Array2<f64> {
        self.values.mapv(|v| v.unwrap_or(f64::NAN))
    }

    pub fn values(&self) -> &Array2<Option<f64>> {
        &self.values
    }

    pub fn shape(&self) -> (usize, usize) {
        self.values.dim()
    }

    /// Value at a pixel. Out-of-range indices and missing pixels both give `None`.
    pub fn get(&self, lat_idx: usize, lon_idx: usize) -> Option<f64> {
        self.values.get((lat_idx, lon_idx)).copied().flatten()
    }

    pub fn valid_values(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().filter_map(|v| *v)
    }

    pub fn valid_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }

    /// Mean over valid pixels; `None` when there are none.
    pub fn mean(&self) -> Option<f64> {
        let (sum, n) = self
            .valid_values()
            .fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
        (n > 0).then(|| sum / n as f64)
    }

    pub fn max(&self) -> Option<f64> {
        self.valid_values().reduce(f64::max)
    }

    pub fn min(&self) -> Option<f64> {
        self.valid_values().reduce(f64::min)
    }
}
