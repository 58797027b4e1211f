//! Maintenance window lookup

use std::collections::BTreeMap;
use std::io::Read;

use chrono::NaiveTime;
use crds::MaintenanceTimeWindow;
use serde::{Deserialize, Serialize};

use crate::error::ConverterError;

/// Daily maintenance window in Gardener's `HHMMSS+ZZZZ` notation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MaintenanceWindow {
    /// Window start
    pub begin: String,

    /// Window end
    pub end: String,
}

impl MaintenanceWindow {
    fn validate(&self) -> Result<(), String> {
        validate_window_time(&self.begin)?;
        validate_window_time(&self.end)
    }
}

impl From<&MaintenanceWindow> for MaintenanceTimeWindow {
    fn from(window: &MaintenanceWindow) -> Self {
        MaintenanceTimeWindow {
            begin: window.begin.clone(),
            end: window.end.clone(),
        }
    }
}

fn validate_window_time(value: &str) -> Result<(), String> {
    let (time, zone) = value
        .split_at_checked(6)
        .ok_or_else(|| format!("'{}' is not in HHMMSS+ZZZZ format", value))?;

    NaiveTime::parse_from_str(time, "%H%M%S").map_err(|e| format!("'{}' has an invalid time: {}", value, e))?;

    let offset_ok = zone.len() == 5
        && (zone.starts_with('+') || zone.starts_with('-'))
        && zone[1..].chars().all(|c| c.is_ascii_digit());
    if !offset_ok {
        return Err(format!("'{}' has an invalid zone offset", value));
    }
    Ok(())
}

/// Maintenance windows by region
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(transparent)]
pub struct MaintenanceWindows {
    windows: BTreeMap<String, MaintenanceWindow>,
}

impl MaintenanceWindows {
    /// Parse the region to window mapping and validate every window
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ConverterError> {
        let windows: MaintenanceWindows = serde_json::from_reader(reader)
            .map_err(|e| ConverterError::Config(format!("Failed to parse maintenance windows: {}", e)))?;

        for (region, window) in &windows.windows {
            window
                .validate()
                .map_err(|e| ConverterError::Config(format!("Invalid maintenance window for {}: {}", region, e)))?;
        }
        Ok(windows)
    }

    /// Window configured for `region`
    pub fn get(&self, region: &str) -> Result<&MaintenanceWindow, ConverterError> {
        self.windows
            .get(region)
            .ok_or_else(|| ConverterError::MaintenanceWindowNotFound(region.to_string()))
    }

    /// Add or replace the window of `region`
    pub fn insert(&mut self, region: &str, window: MaintenanceWindow) {
        self.windows.insert(region.to_string(), window);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        let windows = MaintenanceWindows::from_reader(
            r#"{"eu-central-1": {"begin": "210000+0000", "end": "000000+0000"}}"#.as_bytes(),
        )
        .expect("valid windows");

        assert_eq!(windows.get("eu-central-1").expect("configured").begin, "210000+0000");
        assert!(windows.get("us-east-1").expect_err("not configured").is_not_found());
    }

    #[test]
    fn test_window_format() {
        assert!(validate_window_time("220000+0100").is_ok());
        assert!(validate_window_time("235959-0530").is_ok());
        assert!(validate_window_time("250000+0000").is_err(), "hour out of range");
        assert!(validate_window_time("2200+0100").is_err(), "too short");
        assert!(validate_window_time("220000Z").is_err(), "missing offset");
        assert!(validate_window_time("220000+01x0").is_err(), "non-numeric offset");
    }

    #[test]
    fn test_invalid_window_is_rejected() {
        let result = MaintenanceWindows::from_reader(r#"{"eu-west-1": {"begin": "9pm", "end": "000000+0000"}}"#.as_bytes());
        assert!(matches!(result, Err(ConverterError::Config(message)) if message.contains("eu-west-1")));
    }
}
