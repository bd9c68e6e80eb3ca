use crate::archive::{DaySnapshot, MonthlyAggregate, PointSample};
use crate::config::DemoConfig;
use crate::daykey::DayKey;
use crate::region::RegionalGrid;
use chrono::Month;
use std::time::Duration;

/// Sets up `env_logger` with `info` as the default level; `RUST_LOG` overrides it.
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .try_init();
}

pub fn show_greeting(config_source: Option<&str>) {
    println!("=== Fused XCH4 Dataset Example Usage ===");
    match config_source {
        Some(path) => println!("Loading configuration from: {}", path),
        None => println!("Using built-in configuration"),
    }
}

pub fn config_echo(config: &DemoConfig) {
    println!("\nConfiguration:");
    println!("  Daily archives: {}", config.daily_dir.display());
    println!("  Monthly archives: {}", config.mean_dir.display());
    println!("  Date: {:04}-{:02}-{:02}", config.year, config.month, config.day);
    println!(
        "  Point: {} ({}N, {}E)",
        config.point.label, config.point.lat, config.point.lon
    );
    println!("  Number of regions: {}", config.regions.len());

    for (i, region) in config.regions.iter().enumerate() {
        println!(
            "    Region {}: {} [{}, {}, {}, {}]",
            i + 1,
            region.name,
            region.lon_min,
            region.lon_max,
            region.lat_min,
            region.lat_max
        );
    }
}

pub fn show_section(title: &str) {
    println!("\n{}", "=".repeat(50));
    println!("{}", title);
    println!("{}", "=".repeat(50));
}

pub fn show_day_summary(snapshot: &DaySnapshot) {
    println!("Date              : {}", snapshot.record.date);
    for (name, grid) in &snapshot.record.variables {
        println!("{:<18}: {} valid pixels", name, grid.valid_count());
        println!("{:<18}: {} ppb", format!("{} mean", name), format_ppb(grid.mean()));
    }
}

pub fn show_region_summary(name: &str, variable: &str, regional: &RegionalGrid) {
    let (rows, cols) = regional.grid.shape();
    println!(
        "{:<6} {:<12}: {}x{} pixels, {} valid, mean {} ppb",
        name,
        variable,
        rows,
        cols,
        regional.grid.valid_count(),
        format_ppb(regional.grid.mean())
    );
}

pub fn show_point_values(
    target: (f64, f64),
    nearest: (f64, f64),
    values: &[(&str, Option<f64>)],
) {
    println!("Location         : ({}N, {}E)", target.0, target.1);
    println!("Nearest grid     : ({:.2}N, {:.2}E)", nearest.0, nearest.1);
    for (name, value) in values {
        match value {
            Some(v) => println!("{:<17}: {:.2} ppb", name, v),
            None => println!("{:<17}: NaN (no retrieval this day)", name),
        }
    }
}

pub fn show_monthly_summary(aggregate: &MonthlyAggregate) {
    println!("Month             : {} {}", month_name(aggregate.month), aggregate.year);
    for (name, grid) in &aggregate.means {
        println!("{:<18}: {} ppb", format!("{} mean", name), format_ppb(grid.mean()));
    }
    for name in aggregate.sample_counts.keys() {
        let max = aggregate
            .max_sample_count(name)
            .map(|n| n.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!("{:<18}: {}", format!("Max {}", name), max);
    }
}

pub fn show_point_series(series: &[PointSample]) {
    let valid = series.iter().filter(|s| s.value.is_some()).count();
    println!("{} days, {} with a retrieval", series.len(), valid);
    for sample in series {
        match sample.value {
            Some(v) => println!("  {}  {:.2} ppb", sample.key, v),
            None => println!("  {}  NaN", sample.key),
        }
    }
}

pub fn show_day_listing(year: i32, month: u32, days: &[DayKey]) {
    println!("Available days in {}/{:02}: {} days", year, month, days.len());
    let names: Vec<String> = days.iter().map(|d| d.to_string()).collect();
    println!("{:?}", names);
}

pub fn show_farewell_with_timing(elapsed: Duration) {
    println!("\n=== Example run completed in {:.2?} ===", elapsed);
}

fn format_ppb(value: Option<f64>) -> String {
    value.map(|v| format!("{:.2}", v)).unwrap_or_else(|| "NaN".to_string())
}

fn month_name(month: u32) -> &'static str {
    u8::try_from(month)
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .map(|m| m.name())
        .unwrap_or("Unknown")
}
