//! Small synthetic archives written with the hdf5 crate for tests.
//!
//! Axes are 3 latitudes x 4 longitudes. Pixel values follow
//! [`fused_value`] / [`reference_value`] so tests can recompute them.

use hdf5::H5Type;
use hdf5::types::{FixedAscii, VarLenUnicode};
use ndarray::{Array1, Array2};
use std::fs;
use std::path::Path;

pub type FixtureResult<T> = Result<T, Box<dyn std::error::Error>>;

pub const YEAR: i32 = 2021;
pub const MONTH: u32 = 1;
pub const LAT: [f64; 3] = [10.0, 20.0, 30.0];
pub const LON: [f64; 4] = [100.0, 110.0, 120.0, 130.0];

/// Fused value of a pixel on a day. (2, 3) is never measured and (0, 0)
/// only on even days.
pub fn fused_value(day: u32, i: usize, j: usize) -> f32 {
    if (i, j) == (2, 3) || ((i, j) == (0, 0) && day % 2 == 1) {
        return f32::NAN;
    }
    1800.0 + 10.0 * day as f32 + 4.0 * i as f32 + j as f32
}

/// Bias-corrected reference value; (1, 1) is never measured.
pub fn reference_value(day: u32, i: usize, j: usize) -> f32 {
    if (i, j) == (1, 1) {
        return f32::NAN;
    }
    fused_value(day, i, j) + 5.0
}

pub fn day_name(day: u32) -> String {
    format!("{:04}{:02}{:02}", YEAR, MONTH, day)
}

fn grid_for(day: u32, value: fn(u32, usize, usize) -> f32) -> Array2<f32> {
    Array2::from_shape_fn((LAT.len(), LON.len()), |(i, j)| value(day, i, j))
}

/// How grid datasets are stored. Real archives are chunked and deflated.
#[derive(Clone, Copy, Debug)]
pub enum Layout {
    Contiguous,
    Deflated,
}

fn write_grid<T: H5Type>(group: &hdf5::Group, name: &str, data: &Array2<T>, layout: Layout) -> FixtureResult<()> {
    let builder = group.new_dataset::<T>().shape(data.dim());
    let builder = match layout {
        Layout::Contiguous => builder,
        Layout::Deflated => builder.chunk(data.dim()).deflate(4),
    };
    builder.create(name)?.write(data)?;
    Ok(())
}

fn create_with_axes(path: &Path) -> FixtureResult<hdf5::File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = hdf5::File::create(path)?;
    file.new_dataset::<f64>()
        .shape(LAT.len())
        .create("lat")?
        .write(&Array1::from(LAT.to_vec()))?;
    file.new_dataset::<f64>()
        .shape(LON.len())
        .create("lon")?
        .write(&Array1::from(LON.to_vec()))?;
    Ok(file)
}

/// Daily archive holding `days` (written in the given order). With
/// `with_reference` each day also carries a `tropomi_bc` grid.
pub fn write_daily_archive(path: &Path, days: &[u32], with_reference: bool) -> FixtureResult<()> {
    write_daily_archive_as(path, days, with_reference, Layout::Contiguous)
}

pub fn write_daily_archive_as(path: &Path, days: &[u32], with_reference: bool, layout: Layout) -> FixtureResult<()> {
    let file = create_with_axes(path)?;
    for &day in days {
        let group = file.create_group(&day_name(day))?;
        write_grid(&group, "fused_xch4", &grid_for(day, fused_value), layout)?;
        if with_reference {
            write_grid(&group, "tropomi_bc", &grid_for(day, reference_value), layout)?;
        }
        let date: VarLenUnicode = format!("{:04}-{:02}-{:02}", YEAR, MONTH, day).parse()?;
        group
            .new_dataset::<VarLenUnicode>()
            .shape(())
            .create("date")?
            .write_scalar(&date)?;
    }
    file.close()?;
    Ok(())
}

/// Adds a day whose date string is stored as `N`-byte fixed-length ASCII
/// (what h5py writes for `bytes`).
pub fn add_fixed_ascii_day<const N: usize>(path: &Path, day: u32) -> FixtureResult<()> {
    let file = hdf5::File::open_rw(path)?;
    let group = file.create_group(&day_name(day))?;
    write_grid(&group, "fused_xch4", &grid_for(day, fused_value), Layout::Contiguous)?;
    let date = FixedAscii::<N>::from_ascii(format!("{:04}-{:02}-{:02}", YEAR, MONTH, day).as_bytes())?;
    group
        .new_dataset::<FixedAscii<N>>()
        .shape(())
        .create("date")?
        .write_scalar(&date)?;
    drop(group);
    file.close()?;
    Ok(())
}

/// Adds empty top-level groups (non-day names, invalid dates, ...).
pub fn add_groups(path: &Path, names: &[&str]) -> FixtureResult<()> {
    let file = hdf5::File::open_rw(path)?;
    for name in names {
        file.create_group(name)?;
    }
    file.close()?;
    Ok(())
}

/// Adds a day whose grid does not match the axes.
pub fn add_misshapen_day(path: &Path, day: u32) -> FixtureResult<()> {
    let file = hdf5::File::open_rw(path)?;
    let group = file.create_group(&day_name(day))?;
    group
        .new_dataset::<f32>()
        .shape((LON.len(), LAT.len()))
        .create("fused_xch4")?
        .write(&Array2::<f32>::zeros((LON.len(), LAT.len())))?;
    let date: VarLenUnicode = day_name(day).parse()?;
    group
        .new_dataset::<VarLenUnicode>()
        .shape(())
        .create("date")?
        .write_scalar(&date)?;
    drop(group);
    file.close()?;
    Ok(())
}

/// Per-pixel mean over `days` ignoring NaN, plus valid-day counts.
pub fn expected_mean(days: &[u32], value: fn(u32, usize, usize) -> f32) -> (Array2<f32>, Array2<i32>) {
    let shape = (LAT.len(), LON.len());
    let mut sums = Array2::<f64>::zeros(shape);
    let mut counts = Array2::<i32>::zeros(shape);
    for &day in days {
        for i in 0..LAT.len() {
            for j in 0..LON.len() {
                let v = value(day, i, j);
                if !v.is_nan() {
                    sums[(i, j)] += v as f64;
                    counts[(i, j)] += 1;
                }
            }
        }
    }
    let means = Array2::from_shape_fn(shape, |idx| {
        if counts[idx] > 0 {
            (sums[idx] / counts[idx] as f64) as f32
        } else {
            f32::NAN
        }
    });
    (means, counts)
}

/// Monthly mean archive averaging `days`. With `with_reference` it holds
/// `fused_xch4`/`tropomi_bc` and `n_days_fused`/`n_days_tropomi`, otherwise
/// `fused_xch4` and `n_days`.
pub fn write_monthly_archive(path: &Path, days: &[u32], with_reference: bool) -> FixtureResult<()> {
    write_monthly_archive_as(path, days, with_reference, Layout::Contiguous)
}

pub fn write_monthly_archive_as(path: &Path, days: &[u32], with_reference: bool, layout: Layout) -> FixtureResult<()> {
    let file = create_with_axes(path)?;

    let (fused_mean, fused_counts) = expected_mean(days, fused_value);
    write_grid(&file, "fused_xch4", &fused_mean, layout)?;
    if with_reference {
        let (reference_mean, reference_counts) = expected_mean(days, reference_value);
        write_grid(&file, "tropomi_bc", &reference_mean, layout)?;
        write_grid(&file, "n_days_fused", &fused_counts, layout)?;
        write_grid(&file, "n_days_tropomi", &reference_counts, layout)?;
    } else {
        write_grid(&file, "n_days", &fused_counts, layout)?;
    }

    file.new_dataset::<i32>().shape(()).create("year")?.write_scalar(&YEAR)?;
    file.new_dataset::<i32>().shape(()).create("month")?.write_scalar(&(MONTH as i32))?;
    file.close()?;
    Ok(())
}
