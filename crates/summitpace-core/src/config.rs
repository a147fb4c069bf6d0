//! TOML-based user configuration.
//!
//! Stores the planning defaults a climber reuses between trips:
//! - Start time and summit break
//! - Base ascent paces per terrain
//! - Day boundary policy and late-return threshold
//!
//! Configuration is stored at `~/.config/summitpace/config.toml`, or under
//! `$SUMMITPACE_CONFIG_DIR` when set. Checkpoints and schedules are never
//! written to disk.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::clock::{hhmm, DayBoundaryPolicy};
use crate::error::{ConfigError, Result};
use crate::pace::BasePaces;
use crate::plan::TripPlan;
use crate::summary::DEFAULT_LATE_RETURN_HOUR;

pub const CONFIG_DIR_ENV: &str = "SUMMITPACE_CONFIG_DIR";
const CONFIG_FILE: &str = "config.toml";

/// Trip defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripConfig {
    #[serde(default = "default_start_time", with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(default = "default_break_minutes")]
    pub break_minutes: u32,
    #[serde(default)]
    pub day_boundary: DayBoundaryPolicy,
    #[serde(default = "default_late_return_hour")]
    pub late_return_hour: u32,
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub trip: TripConfig,
    #[serde(default)]
    pub paces: BasePaces,
}

fn default_start_time() -> NaiveTime {
    TripPlan::default().start_time
}
fn default_break_minutes() -> u32 {
    30
}
fn default_late_return_hour() -> u32 {
    DEFAULT_LATE_RETURN_HOUR
}

impl Default for TripConfig {
    fn default() -> Self {
        Self {
            start_time: default_start_time(),
            break_minutes: default_break_minutes(),
            day_boundary: DayBoundaryPolicy::default(),
            late_return_hour: default_late_return_hour(),
        }
    }
}

/// Returns `$SUMMITPACE_CONFIG_DIR` or `~/.config/summitpace/`.
pub fn config_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
        return PathBuf::from(dir);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("summitpace")
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let (parent_path, leaf) = match key.rsplit_once('.') {
            Some((parent, leaf)) => (Some(parent), leaf),
            None => (None, key),
        };
        if leaf.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        if let Some(parent_path) = parent_path {
            for part in parent_path.split('.') {
                current = current.get_mut(part).ok_or_else(unknown)?;
            }
        }

        let obj = current.as_object_mut().ok_or_else(unknown)?;
        let existing = obj.get(leaf).ok_or_else(unknown)?;

        let new_value = match existing {
            serde_json::Value::Bool(_) => serde_json::Value::Bool(
                value.parse::<bool>().map_err(|e| invalid(e.to_string()))?,
            ),
            serde_json::Value::Number(_) => {
                if let Ok(n) = value.parse::<u64>() {
                    serde_json::Value::Number(n.into())
                } else if let Ok(n) = value.parse::<f64>() {
                    serde_json::Number::from_f64(n)
                        .map(serde_json::Value::Number)
                        .ok_or_else(|| invalid(format!("cannot parse '{value}' as number")))?
                } else {
                    return Err(invalid(format!("cannot parse '{value}' as number")));
                }
            }
            serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
            }
            _ => serde_json::Value::String(value.into()),
        };

        obj.insert(leaf.to_string(), new_value);
        Ok(())
    }

    pub fn path() -> PathBuf {
        config_dir().join(CONFIG_FILE)
    }

    /// Load from the default location, or defaults if no file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path())
    }

    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };
        let cfg: Config = toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        tracing::info!(path = %path.display(), "config loaded");
        Ok(cfg)
    }

    /// Persist to the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path())
    }

    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir).map_err(|e| save_failed(e.to_string()))?;
        }
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by key without saving.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or the result is not a valid configuration.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        updated.paces.validate()?;
        *self = updated;
        Ok(())
    }

    /// The trip plan these defaults describe.
    pub fn trip_plan(&self) -> TripPlan {
        TripPlan {
            start_time: self.trip.start_time,
            break_minutes: self.trip.break_minutes,
            paces: self.paces,
            day_boundary: self.trip.day_boundary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::format_clock;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, cfg);
        assert!(toml_str.contains("start_time = \"04:00\""));
    }

    #[test]
    fn partial_file_fills_defaults() {
        let parsed: Config = toml::from_str("[paces]\nboulder = 70.0\n").unwrap();
        assert_eq!(parsed.paces.boulder, 70.0);
        assert_eq!(parsed.paces.flat, 25.0);
        assert_eq!(parsed.trip.break_minutes, 30);
        assert_eq!(parsed.trip.day_boundary, DayBoundaryPolicy::Reject);
    }

    #[test]
    fn get_by_dot_path() {
        let cfg = Config::default();
        assert_eq!(cfg.get("trip.start_time").as_deref(), Some("04:00"));
        assert_eq!(cfg.get("trip.break_minutes").as_deref(), Some("30"));
        assert_eq!(cfg.get("trip.day_boundary").as_deref(), Some("reject"));
        assert_eq!(cfg.get("paces.technical").as_deref(), Some("75.0"));
        assert!(cfg.get("nope").is_none());
        assert!(cfg.get("").is_none());
    }

    #[test]
    fn set_by_dot_path() {
        let mut cfg = Config::default();
        cfg.set("trip.start_time", "05:30").unwrap();
        cfg.set("trip.break_minutes", "45").unwrap();
        cfg.set("trip.day_boundary", "next-day").unwrap();
        cfg.set("paces.flat", "22.5").unwrap();
        assert_eq!(format_clock(cfg.trip.start_time), "05:30");
        assert_eq!(cfg.trip.break_minutes, 45);
        assert_eq!(cfg.trip.day_boundary, DayBoundaryPolicy::NextDay);
        assert_eq!(cfg.paces.flat, 22.5);
    }

    #[test]
    fn set_rejects_unknown_and_invalid() {
        let mut cfg = Config::default();
        assert!(cfg.set("trip.unknown", "1").is_err());
        assert!(cfg.set("trip.start_time", "25:99").is_err());
        assert!(cfg.set("paces.flat", "-3").is_err());
        assert!(cfg.set("paces.flat", "fast").is_err());
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn save_and_load_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let missing = Config::load_from(&path).unwrap();
        assert_eq!(missing, Config::default());

        let mut cfg = Config::default();
        cfg.set("paces.steady", "40").unwrap();
        cfg.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.paces.steady, 40.0);
    }

    #[test]
    fn malformed_file_is_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[trip\nstart_time = ").unwrap();
        assert!(Config::load_from(&path).is_err());
    }
}
