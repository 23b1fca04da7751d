//! Station configuration file support.
//!
//! This module provides the station-wide schedule settings: the nominal
//! start of the on-air day and the tabulator's row-alignment policy.
//! Settings are read from TOML configuration files; every field has a
//! sensible default so an empty file, or no file at all, is valid.
//!
//! ```toml
//! [schedule]
//! day_start = "07:00:00"
//! align_to_hour = true
//! ```

use std::fs;
use std::path::Path;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Utc, Weekday};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

static STATION_CONFIG: OnceCell<StationConfig> = OnceCell::new();

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse configuration file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Station configuration from file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub schedule: StationConfig,
}

/// Station-wide schedule settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationConfig {
    /// The nominal start of the on-air day; schedule day and week views
    /// begin here rather than at midnight.
    #[serde(default = "default_day_start")]
    pub day_start: NaiveTime,
    /// Whether tabulated rows are split at wall-clock hour boundaries.
    #[serde(default = "default_align_to_hour")]
    pub align_to_hour: bool,
}

fn default_day_start() -> NaiveTime {
    NaiveTime::from_hms_opt(7, 0, 0).expect("07:00 is a valid time")
}

fn default_align_to_hour() -> bool {
    true
}

impl Default for StationConfig {
    fn default() -> Self {
        Self {
            day_start: default_day_start(),
            align_to_hour: default_align_to_hour(),
        }
    }
}

impl StationConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let file: ConfigFile = toml::from_str(&contents)?;
        Ok(file.schedule)
    }

    /// Install this configuration as the process-wide one.
    ///
    /// Returns false if a configuration was already installed; the first
    /// installation wins. Intended to be called once at startup.
    pub fn install(self) -> bool {
        STATION_CONFIG.set(self).is_ok()
    }

    /// The process-wide configuration, or the defaults if none was
    /// installed.
    pub fn global() -> &'static StationConfig {
        STATION_CONFIG.get_or_init(StationConfig::default)
    }

    /// The nominal start of on-air programming on the given date.
    pub fn day_start_on(&self, date: NaiveDate) -> DateTime<Utc> {
        NaiveDateTime::new(date, self.day_start).and_utc()
    }

    /// The start of programming on the given ISO week day.
    ///
    /// `None` when the year/week/weekday triple does not exist.
    pub fn weekday_start(
        &self,
        year: i32,
        week: u32,
        weekday: Weekday,
    ) -> Option<DateTime<Utc>> {
        NaiveDate::from_isoywd_opt(year, week, weekday).map(|date| self.day_start_on(date))
    }

    /// The start of programming on the Monday of the given ISO week.
    pub fn week_start(&self, year: i32, week: u32) -> Option<DateTime<Utc>> {
        self.weekday_start(year, week, Weekday::Mon)
    }
}

/// The date of the Monday of the given date's week.
pub fn monday_of(date: NaiveDate) -> NaiveDate {
    date - TimeDelta::days(date.weekday().num_days_from_monday() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn defaults_start_the_day_at_seven() {
        let config = StationConfig::default();
        assert_eq!(config.day_start, NaiveTime::from_hms_opt(7, 0, 0).unwrap());
        assert!(config.align_to_hour);
    }

    #[test]
    fn parses_a_full_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[schedule]\nday_start = \"06:30:00\"\nalign_to_hour = false"
        )
        .unwrap();

        let config = StationConfig::from_file(file.path()).unwrap();
        assert_eq!(config.day_start, NaiveTime::from_hms_opt(6, 30, 0).unwrap());
        assert!(!config.align_to_hour);
    }

    #[test]
    fn empty_file_falls_back_to_defaults() {
        let file = NamedTempFile::new().unwrap();
        let config = StationConfig::from_file(file.path()).unwrap();
        assert_eq!(config, StationConfig::default());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let result = StationConfig::from_file(Path::new("/nonexistent/onair.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn week_start_lands_on_the_iso_monday() {
        let config = StationConfig::default();
        // ISO week 40 of 2012 began on Monday 1 October.
        let start = config.week_start(2012, 40).unwrap();
        assert_eq!(
            start,
            NaiveDate::from_ymd_opt(2012, 10, 1)
                .unwrap()
                .and_hms_opt(7, 0, 0)
                .unwrap()
                .and_utc()
        );
    }

    #[test]
    fn monday_of_rewinds_mid_week_dates() {
        let thursday = NaiveDate::from_ymd_opt(2012, 10, 4).unwrap();
        assert_eq!(monday_of(thursday), NaiveDate::from_ymd_opt(2012, 10, 1).unwrap());
        let monday = NaiveDate::from_ymd_opt(2012, 10, 1).unwrap();
        assert_eq!(monday_of(monday), monday);
    }
}
