//! CLI configuration
//!
//! Loaded from an optional TOML file; every field has a default so the
//! binary runs the built-in demo without one.

use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use roombook_core::{Result, RoomAvailabilityRequest};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CliConfig {
    /// Booking manifest to seed from; the demo scenario is used when absent
    #[serde(default)]
    pub manifest: Option<PathBuf>,
    /// Date to report occupancy for
    #[serde(default = "default_report_date")]
    pub report_date: NaiveDate,
    #[serde(default)]
    pub format: OutputFormat,
    /// Availability checks to run on `report_date`
    #[serde(default = "default_checks", rename = "check")]
    pub checks: Vec<CheckConfig>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// One `[[check]]` table: a room and a wall-clock window
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckConfig {
    pub room: String,
    /// `HH:MM:SS`
    pub start: NaiveTime,
    /// `HH:MM:SS`
    pub end: NaiveTime,
}

impl CheckConfig {
    pub fn to_request(&self, date: NaiveDate) -> RoomAvailabilityRequest {
        RoomAvailabilityRequest::between(self.room.clone(), date, self.start, self.end)
    }
}

fn default_report_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 15).unwrap_or_default()
}

fn hm(hour: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, 0, 0).unwrap_or_default()
}

fn default_checks() -> Vec<CheckConfig> {
    vec![
        CheckConfig {
            room: "101".to_string(),
            start: hm(11),
            end: hm(12),
        },
        CheckConfig {
            room: "102".to_string(),
            start: hm(14),
            end: hm(15),
        },
    ]
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            manifest: None,
            report_date: default_report_date(),
            format: OutputFormat::default(),
            checks: default_checks(),
        }
    }
}

impl CliConfig {
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load config from `path`, or fall back to defaults when none is given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                let content = std::fs::read_to_string(path)?;
                let mut config = Self::from_toml(&content)?;
                // Manifest paths are relative to the config file
                if let (Some(manifest), Some(dir)) = (config.manifest.as_mut(), path.parent()) {
                    if manifest.is_relative() {
                        *manifest = dir.join(&*manifest);
                    }
                }
                Ok(config)
            }
            None => Ok(Self::default()),
        }
    }
}
