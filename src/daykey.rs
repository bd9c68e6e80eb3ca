//! # Day Keys
//!
//! Daily archives store one HDF5 group per day, named with an 8-digit
//! `YYYYMMDD` string. [`DayKey`] is the validated form of that name: it is
//! parsed once when a group name or a caller's date enters the crate, and
//! from then on ordering and formatting follow the calendar date.

use crate::error::{ArchiveError, ArchiveResult};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A calendar day identifying one record inside a daily archive.
///
/// # Examples
///
/// ```rust
/// use fused_xch4::DayKey;
///
/// let key: DayKey = "20210101".parse()?;
/// assert_eq!(key.to_string(), "20210101");
/// assert!("20210230".parse::<DayKey>().is_err());
/// # Ok::<(), fused_xch4::ArchiveError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DayKey(NaiveDate);

impl DayKey {
    pub fn from_ymd(year: i32, month: u32, day: u32) -> ArchiveResult<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(DayKey)
            .ok_or_else(|| ArchiveError::InvalidDayKey(compose_key(year, month, day)))
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// True when `name` follows the group naming rule: non-empty and all ASCII digits.
    pub fn is_day_name(name: &str) -> bool {
        !name.is_empty() && name.bytes().all(|b| b.is_ascii_digit())
    }
}

/// Builds the raw `YYYYMMDD` group name without validating the date.
pub fn compose_key(year: i32, month: u32, day: u32) -> String {
    format!("{:04}{:02}{:02}", year, month, day)
}

impl FromStr for DayKey {
    type Err = ArchiveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 8 || !DayKey::is_day_name(s) {
            return Err(ArchiveError::InvalidDayKey(s.to_string()));
        }
        NaiveDate::parse_from_str(s, "%Y%m%d")
            .map(DayKey)
            .map_err(|_| ArchiveError::InvalidDayKey(s.to_string()))
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y%m%d"))
    }
}

impl Serialize for DayKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DayKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
