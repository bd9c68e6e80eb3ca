//! # Archive Inventory Module
//!
//! Lists what an archive holds: its kind, axes, day groups and every dataset
//! with its type and shape. Used to answer "what is in this file" before
//! querying it.

use crate::archive::{LATITUDE, LONGITUDE, YEAR, day_keys, member_name, open_archive, read_axes};
use crate::locate::ArchiveKind;
use anyhow::{Context, Result};
use hdf5::Group;
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Information about one dataset in the archive
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetInfo {
    pub path: String,
    pub data_type: String,
    pub shape: Vec<usize>,
}

/// Length and value range of a coordinate axis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AxisInfo {
    pub name: String,
    pub length: usize,
    pub first: Option<f64>,
    pub last: Option<f64>,
}

/// Complete inventory of an archive file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchiveInfo {
    pub path: String,
    pub kind: ArchiveKind,
    pub axes: Vec<AxisInfo>,
    pub days: Vec<String>,
    pub datasets: Vec<DatasetInfo>,
    pub file_size: Option<u64>,
}

/// Extract the inventory of an archive.
///
/// The kind is detected from content: an archive with a top-level `year`
/// scalar is a monthly mean, anything else is daily.
pub fn get_archive_info<P: AsRef<Path>>(path: P) -> Result<ArchiveInfo> {
    let path = path.as_ref();
    let file = open_archive(path).with_context(|| format!("Failed to open archive: {}", path.display()))?;

    let file_size = std::fs::metadata(path).ok().map(|metadata| metadata.len());

    let grid_axes = read_axes(&file).context("Failed to read archive axes")?;
    let axes = vec![
        AxisInfo {
            name: LATITUDE.to_string(),
            length: grid_axes.latitude.len(),
            first: grid_axes.latitude.first().copied(),
            last: grid_axes.latitude.last().copied(),
        },
        AxisInfo {
            name: LONGITUDE.to_string(),
            length: grid_axes.longitude.len(),
            first: grid_axes.longitude.first().copied(),
            last: grid_axes.longitude.last().copied(),
        },
    ];

    let days: Vec<String> = day_keys(&file)?.iter().map(|k| k.to_string()).collect();
    let kind = if file.link_exists(YEAR) {
        ArchiveKind::MonthlyMean
    } else {
        ArchiveKind::Daily
    };

    let mut datasets = Vec::new();
    collect_datasets(&file, &mut datasets)?;
    debug!("Found {} datasets in {}", datasets.len(), path.display());

    file.close().context("Failed to close archive")?;

    Ok(ArchiveInfo {
        path: path.display().to_string(),
        kind,
        axes,
        days,
        datasets,
        file_size,
    })
}

fn collect_datasets(group: &Group, out: &mut Vec<DatasetInfo>) -> Result<()> {
    for dataset in group.datasets()? {
        let data_type = match dataset.dtype().and_then(|dtype| dtype.to_descriptor()) {
            Ok(descriptor) => format!("{:?}", descriptor),
            Err(_) => "unknown".to_string(),
        };
        out.push(DatasetInfo {
            path: dataset.name(),
            data_type,
            shape: dataset.shape(),
        });
    }
    for child in group.groups()? {
        debug!("Descending into group {}", member_name(&child.name()));
        collect_datasets(&child, out)?;
    }
    Ok(())
}

/// Print archive info in human-readable format
pub fn print_archive_info_human(info: &ArchiveInfo) {
    println!("Archive Information:");
    println!("  Path: {}", info.path);
    println!("  Kind: {}", info.kind);
    if let Some(size) = info.file_size {
        println!("  File Size: {:.2} MB", size as f64 / 1_048_576.0);
    }
    println!("  Axes:");
    for axis in &info.axes {
        match (axis.first, axis.last) {
            (Some(first), Some(last)) => println!("    {} ({}) {} .. {}", axis.name, axis.length, first, last),
            _ => println!("    {} ({})", axis.name, axis.length),
        }
    }
    if info.kind == ArchiveKind::Daily {
        println!("  Days: {} total", info.days.len());
        for day in &info.days {
            println!("    {}", day);
        }
    }
    println!("  Datasets: {} total", info.datasets.len());
    for dataset in &info.datasets {
        println!("    {} ({}) {:?}", dataset.path, dataset.data_type, dataset.shape);
    }
}

/// Print archive info in JSON format
pub fn print_archive_info_json(info: &ArchiveInfo) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(info)?);
    Ok(())
}

/// Print archive info in YAML format
pub fn print_archive_info_yaml(info: &ArchiveInfo) -> Result<()> {
    let yaml = serde_yaml::to_string(info).context("Failed to serialize archive info to YAML")?;
    println!("{}", yaml);
    Ok(())
}
