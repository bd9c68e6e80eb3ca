//! # Regional Subsets
//!
//! Cuts a lon/lat bounding box out of a grid. The box is applied to each
//! axis separately (inclusive bounds) and the grid keeps the rows and
//! columns whose coordinates fall inside, preserving their order.

use crate::grid::{Grid, GridAxes};
use ndarray::{Array1, Axis};
use serde::{Deserialize, Serialize};

/// A named lon/lat bounding box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub name: String,
    pub lon_min: f64,
    pub lon_max: f64,
    pub lat_min: f64,
    pub lat_max: f64,
}

/// Grid restricted to a region, with its own axes.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionalGrid {
    pub axes: GridAxes,
    pub grid: Grid,
}

impl Region {
    pub fn new(name: &str, lon_min: f64, lon_max: f64, lat_min: f64, lat_max: f64) -> Self {
        Region {
            name: name.to_string(),
            lon_min,
            lon_max,
            lat_min,
            lat_max,
        }
    }

    /// USA, India and China boxes.
    pub fn presets() -> Vec<Region> {
        vec![
            Region::new("USA", -130.0, -60.0, 20.0, 55.0),
            Region::new("India", 65.0, 100.0, 5.0, 40.0),
            Region::new("China", 70.0, 135.0, 15.0, 55.0),
        ]
    }

    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        (self.lat_min..=self.lat_max).contains(&lat) && (self.lon_min..=self.lon_max).contains(&lon)
    }

    /// Rows and columns of `grid` whose coordinates fall inside the box.
    ///
    /// Returns `None` if the grid does not match the axes.
    pub fn subset(&self, axes: &GridAxes, grid: &Grid) -> Option<RegionalGrid> {
        if grid.shape() != axes.shape() {
            return None;
        }
        let lat_idx = indices_within(&axes.latitude, self.lat_min, self.lat_max);
        let lon_idx = indices_within(&axes.longitude, self.lon_min, self.lon_max);

        let values = grid
            .values()
            .select(Axis(0), &lat_idx)
            .select(Axis(1), &lon_idx);
        Some(RegionalGrid {
            axes: GridAxes::new(axes.latitude.select(Axis(0), &lat_idx), axes.longitude.select(Axis(0), &lon_idx)),
            grid: Grid::new(values),
        })
    }
}

fn indices_within(axis: &Array1<f64>, min: f64, max: f64) -> Vec<usize> {
    axis.iter()
        .enumerate()
        .filter(|(_, v)| **v >= min && **v <= max)
        .map(|(idx, _)| idx)
        .collect()
}
