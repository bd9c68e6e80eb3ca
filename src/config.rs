//! # Demo Configuration
//!
//! The fixed values the example program works with: where the daily and
//! monthly archives live, which day to inspect, which point to extract and
//! which regions to cut out. The defaults reproduce a January 2021 walk
//! through the dataset centred on Ulsan, South Korea.
//!
//! A configuration can also be loaded from a JSON or YAML file; any field
//! left out keeps its default.
//!
//! ```rust
//! use fused_xch4::config::DemoConfig;
//!
//! let config = DemoConfig::from_json(r#"{ "year": 2022, "month": 6 }"#)?;
//! assert_eq!(config.year, 2022);
//! assert_eq!(config.day, 1);
//! # Ok::<(), anyhow::Error>(())
//! ```

use crate::region::Region;
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Everything the demo needs to know.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Root of the daily archives (`<daily_dir>/<year>/fused_xch4_<year><MM>.h5`)
    pub daily_dir: PathBuf,
    /// Root of the monthly mean archives
    pub mean_dir: PathBuf,
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub point: PointOfInterest,
    pub regions: Vec<Region>,
}

/// A named location for point extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointOfInterest {
    pub label: String,
    pub lat: f64,
    pub lon: f64,
}

impl Default for DemoConfig {
    fn default() -> Self {
        DemoConfig {
            daily_dir: PathBuf::from("Fused_xch4"),
            mean_dir: PathBuf::from("Fused_xch4_monthly_mean"),
            year: 2021,
            month: 1,
            day: 1,
            point: PointOfInterest::default(),
            regions: Region::presets(),
        }
    }
}

impl Default for PointOfInterest {
    fn default() -> Self {
        PointOfInterest {
            label: "Ulsan, South Korea".to_string(),
            lat: 35.5665,
            lon: 129.3780,
        }
    }
}

impl DemoConfig {
    /// Loads a configuration file, choosing the parser by extension
    /// (`.yaml`/`.yml` for YAML, anything else JSON).
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config = match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml(&content),
            _ => Self::from_json(&content),
        };
        config.with_context(|| format!("Invalid config file: {}", path.display()))
    }

    pub fn from_json(json_str: &str) -> Result<Self> {
        let config: DemoConfig = serde_json::from_str(json_str)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml(yaml_str: &str) -> Result<Self> {
        let config: DemoConfig = serde_yaml::from_str(yaml_str)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(1..=12).contains(&self.month) {
            bail!("month must be between 1 and 12, got {}", self.month);
        }
        if !(1..=31).contains(&self.day) {
            bail!("day must be between 1 and 31, got {}", self.day);
        }
        if !(-90.0..=90.0).contains(&self.point.lat) {
            bail!("point latitude {} is outside [-90, 90]", self.point.lat);
        }
        for region in &self.regions {
            if region.lat_min > region.lat_max || region.lon_min > region.lon_max {
                bail!("region '{}' has inverted bounds", region.name);
            }
        }
        Ok(())
    }
}
