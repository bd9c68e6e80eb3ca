//! Walks through the fused XCH4 dataset: one day, a few regions, one point,
//! the monthly mean, the list of available days and a file inventory.
//!
//! ```text
//! cargo run --example example_usage [config.json|config.yaml]
//! ```

use anyhow::{Context, Result};
use fused_xch4::config::DemoConfig;
use fused_xch4::info::{get_archive_info, print_archive_info_human};
use fused_xch4::log::{
    config_echo, init_logging, show_day_listing, show_day_summary, show_farewell_with_timing, show_greeting,
    show_monthly_summary, show_point_series, show_point_values, show_region_summary, show_section,
};
use fused_xch4::{ArchiveKind, list_days, locate, read_day, read_monthly_aggregate, read_point_series};
use log::warn;
use std::env;
use std::time::Instant;

fn main() -> Result<()> {
    init_logging();
    let config_path = env::args().nth(1);
    run(config_path.as_deref())
}

fn run(config_path: Option<&str>) -> Result<()> {
    let start_time = Instant::now();

    show_greeting(config_path);
    let config = match config_path {
        Some(path) => DemoConfig::from_file(path)?,
        None => DemoConfig::default(),
    };
    config_echo(&config);

    show_section("EXAMPLE 1 - Single day global map");
    let daily_path = locate(ArchiveKind::Daily, &config.daily_dir, config.year, config.month)?;
    let snapshot = read_day(&daily_path, config.year, config.month, config.day)?;
    show_day_summary(&snapshot);

    show_section("EXAMPLE 2 - Regional map");
    for region in &config.regions {
        for (name, grid) in &snapshot.record.variables {
            match region.subset(&snapshot.axes, grid) {
                Some(regional) => show_region_summary(&region.name, name, &regional),
                None => warn!("'{}' does not match the archive axes, skipping {}", name, region.name),
            }
        }
    }

    show_section("EXAMPLE 3 - Point extraction");
    let (lat_idx, lon_idx) = snapshot
        .axes
        .nearest_pixel(config.point.lat, config.point.lon)
        .context("Archive has an empty latitude or longitude axis")?;
    let nearest = snapshot
        .axes
        .coordinates(lat_idx, lon_idx)
        .context("Nearest pixel outside the axes")?;
    let values: Vec<(&str, Option<f64>)> = snapshot
        .record
        .variables
        .iter()
        .map(|(name, grid)| (name.as_str(), grid.get(lat_idx, lon_idx)))
        .collect();
    println!("Point            : {}", config.point.label);
    show_point_values((config.point.lat, config.point.lon), nearest, &values);

    show_section("EXAMPLE 4 - Monthly mean map");
    let mean_path = locate(ArchiveKind::MonthlyMean, &config.mean_dir, config.year, config.month)?;
    let aggregate = read_monthly_aggregate(&mean_path)?;
    show_monthly_summary(&aggregate);

    show_section("EXAMPLE 5 - Point time series");
    let series = read_point_series(&daily_path, lat_idx, lon_idx)?;
    show_point_series(&series);

    show_section("EXAMPLE 6 - List available days");
    let days = list_days(&daily_path)?;
    show_day_listing(config.year, config.month, &days);

    show_section("EXAMPLE 7 - Archive inventory");
    print_archive_info_human(&get_archive_info(&mean_path)?);

    show_farewell_with_timing(start_time.elapsed());
    Ok(())
}
