//! # Monthly Aggregation
//!
//! Recomputes a monthly mean grid from the day records of a daily archive.
//! Each pixel averages only the days where it holds a value; pixels with no
//! valid day stay missing and get a count of zero.

use crate::archive::DailyArchive;
use crate::error::{ArchiveError, ArchiveResult};
use crate::grid::Grid;
use log::debug;
use ndarray::{Array2, Zip};

impl DailyArchive {
    /// Per-pixel mean of `variable` over all days, plus the valid-day count.
    ///
    /// # Errors
    ///
    /// [`ArchiveError::MissingVariable`] if any day lacks `variable`.
    pub fn monthly_mean(&self, variable: &str) -> ArchiveResult<(Grid, Array2<u32>)> {
        let shape = self.axes.shape();
        let mut sums = Array2::<f64>::zeros(shape);
        let mut counts = Array2::<u32>::zeros(shape);

        for (key, record) in &self.days {
            let grid = record
                .variable(variable)
                .ok_or_else(|| ArchiveError::MissingVariable {
                    variable: variable.to_string(),
                    key: key.to_string(),
                })?;
            if grid.shape() != shape {
                return Err(ArchiveError::Schema(format!(
                    "day {} grid '{}' has shape {:?}, expected {:?}",
                    key,
                    variable,
                    grid.shape(),
                    shape
                )));
            }
            Zip::from(&mut sums)
                .and(&mut counts)
                .and(grid.values())
                .for_each(|sum, count, value| {
                    if let Some(v) = value {
                        *sum += v;
                        *count += 1;
                    }
                });
        }
        debug!("Averaged '{}' over {} days", variable, self.days.len());

        let mut means = Array2::from_elem(shape, None);
        Zip::from(&mut means)
            .and(&sums)
            .and(&counts)
            .for_each(|mean, &sum, &count| {
                if count > 0 {
                    *mean = Some(sum / count as f64);
                }
            });
        Ok((Grid::new(means), counts))
    }

    /// Variable names declared by the first day, if any.
    pub fn variable_names(&self) -> Vec<&str> {
        self.days
            .values()
            .next()
            .map(|record| record.variable_names())
            .unwrap_or_default()
    }
}
