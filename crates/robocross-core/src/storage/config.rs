//! TOML-based application configuration.
//!
//! Holds defaults only, never session state:
//! - `[routine]` last-used build parameters and an optional catalog file
//! - `[builder]` rest-period naming and test-routine durations
//! - `[playback]` tick period and end-of-workout wording
//! - `[announcer]` speech command
//!
//! Configuration is stored at `~/.config/robocross/config.toml`.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::data_dir;
use crate::announcer::AnnouncerConfig;
use crate::catalog::Equipment;
use crate::error::{ConfigError, Result};
use crate::playback::PlaybackConfig;
use crate::routine::{RoutineConfig, RoutineParams, WorkoutType};

/// Default build parameters for the CLI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutineDefaults {
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u32,
    #[serde(default = "default_workout_length_min")]
    pub workout_length_min: u32,
    #[serde(default = "default_minimum_rest_secs")]
    pub minimum_rest_secs: u32,
    #[serde(default = "default_workout_type")]
    pub workout_type: WorkoutType,
    #[serde(default = "default_excluded_names")]
    pub excluded_names: Vec<String>,
    #[serde(default)]
    pub excluded_equipment: Vec<Equipment>,
    /// JSON exercise file used instead of the built-in catalog.
    #[serde(default)]
    pub catalog_path: Option<String>,
}

fn default_interval_secs() -> u32 {
    120
}
fn default_workout_length_min() -> u32 {
    30
}
fn default_minimum_rest_secs() -> u32 {
    30
}
fn default_workout_type() -> WorkoutType {
    WorkoutType::Mixed
}
fn default_excluded_names() -> Vec<String> {
    vec!["burpees".into()]
}

impl Default for RoutineDefaults {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
            workout_length_min: default_workout_length_min(),
            minimum_rest_secs: default_minimum_rest_secs(),
            workout_type: default_workout_type(),
            excluded_names: default_excluded_names(),
            excluded_equipment: Vec::new(),
            catalog_path: None,
        }
    }
}

impl RoutineDefaults {
    pub fn to_params(&self) -> RoutineParams {
        RoutineParams {
            interval_secs: self.interval_secs,
            workout_length_min: self.workout_length_min,
            minimum_rest_secs: self.minimum_rest_secs,
            excluded_names: self.excluded_names.iter().cloned().collect(),
            excluded_equipment: self.excluded_equipment.iter().copied().collect::<BTreeSet<_>>(),
            workout_type: self.workout_type,
        }
    }
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/robocross/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub routine: RoutineDefaults,
    #[serde(default)]
    pub builder: RoutineConfig,
    #[serde(default)]
    pub playback: PlaybackConfig,
    #[serde(default)]
    pub announcer: AnnouncerConfig,
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
    ) -> std::result::Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_some() {
                current = current.get_mut(part).ok_or_else(unknown)?;
                continue;
            }

            let obj = current.as_object_mut().ok_or_else(unknown)?;
            let existing = obj.get(part).ok_or_else(unknown)?;
            let new_value = match existing {
                serde_json::Value::Bool(_) => serde_json::Value::Bool(
                    value
                        .parse::<bool>()
                        .map_err(|e| invalid(e.to_string()))?,
                ),
                serde_json::Value::Number(_) => value
                    .parse::<u64>()
                    .map(|n| serde_json::Value::Number(n.into()))
                    .map_err(|_| invalid(format!("cannot parse '{value}' as number")))?,
                // Lists take either JSON (`["mat","bench"]`) or a comma list.
                serde_json::Value::Array(_) => {
                    if value.trim_start().starts_with('[') {
                        serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                    } else {
                        serde_json::Value::Array(
                            value
                                .split(',')
                                .map(str::trim)
                                .filter(|s| !s.is_empty())
                                .map(|s| serde_json::Value::String(s.to_string()))
                                .collect(),
                        )
                    }
                }
                serde_json::Value::Object(_) => {
                    serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                }
                _ => serde_json::Value::String(value.into()),
            };
            obj.insert(part.to_string(), new_value);
            return Ok(());
        }

        Err(unknown())
    }

    pub fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk, writing the defaults out on first use.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Persist to disk.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?;
                cfg.playback.validate()?;
                Ok(cfg)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "writing default config");
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }
            .into()),
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
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
    /// Returns an error if the key is unknown or the value does not fit the
    /// field, in which case `self` is left untouched.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        updated.playback.validate()?;
        *self = updated;
        Ok(())
    }

    /// Load from disk, returning default on error.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "falling back to default config");
            Self::default()
        })
    }
}
