//! TOML-based application configuration.
//!
//! Stores:
//! - The duration profile table
//! - Risk policy (strict or bounded)
//! - Checkpoint clamping for demonstrations
//! - Display settings for clock times
//!
//! Configuration is stored at `~/.config/gatetime/config.toml`.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::FixedOffset;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::data_dir;
use crate::checkpoint::{CheckpointClamp, DEFAULT_MAX_SHIFT_MINUTES};
use crate::error::{ConfigError, CoreError};
use crate::profile::{DurationProfile, MAX_DURATION_MINUTES};
use crate::risk::RiskPolicy;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClampMode {
    #[default]
    Exact,
    Bounded,
}

/// Checkpoint clamping configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckpointConfig {
    #[serde(default)]
    pub clamp: ClampMode,
    /// Only used when `clamp` is `bounded`.
    #[serde(default = "default_max_shift_minutes")]
    pub max_shift_minutes: i64,
}

/// Display configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Offset from UTC used to show and read clock times.
    #[serde(default)]
    pub utc_offset_minutes: i32,
    #[serde(default = "default_true")]
    pub time_format_24h: bool,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/gatetime/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub profile: DurationProfile,
    #[serde(default)]
    pub risk_policy: RiskPolicy,
    #[serde(default)]
    pub checkpoint: CheckpointConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

fn default_max_shift_minutes() -> i64 {
    DEFAULT_MAX_SHIFT_MINUTES
}
fn default_true() -> bool {
    true
}

impl Default for CheckpointConfig {
    fn default() -> Self {
        Self {
            clamp: ClampMode::Exact,
            max_shift_minutes: default_max_shift_minutes(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            utc_offset_minutes: 0,
            time_format_24h: true,
        }
    }
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
                serde_json::Value::Bool(_) => value
                    .parse::<bool>()
                    .map(serde_json::Value::Bool)
                    .map_err(|e| invalid(e.to_string()))?,
                serde_json::Value::Number(_) => {
                    if let Ok(n) = value.parse::<i64>() {
                        serde_json::Value::Number(n.into())
                    } else {
                        return Err(invalid(format!("cannot parse '{value}' as integer")));
                    }
                }
                serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                    serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                }
                _ => serde_json::Value::String(value.into()),
            };

            obj.insert(part.to_string(), new_value);
            return Ok(());
        }

        Err(unknown())
    }

    /// Default location inside the data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory cannot be created.
    pub fn path() -> Result<PathBuf, CoreError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the default location, writing defaults if missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed or fails
    /// validation, or if defaults cannot be written.
    pub fn load() -> Result<Self, CoreError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from an explicit path, writing defaults if missing.
    ///
    /// # Errors
    ///
    /// See [`Config::load`].
    pub fn load_from(path: &Path) -> Result<Self, CoreError> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?;
                cfg.validate()?;
                debug!(path = %path.display(), "loaded config");
                Ok(cfg)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                debug!(path = %path.display(), "wrote default config");
                Ok(cfg)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }
            .into()),
        }
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// Persist to the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written.
    pub fn save(&self) -> Result<(), CoreError> {
        self.save_to(&Self::path()?)
    }

    /// Persist to an explicit path.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written.
    pub fn save_to(&self, path: &Path) -> Result<(), CoreError> {
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

    /// Set a config value by dot-separated key. Does not save.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or the result fails validation. On error `self` is unchanged.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), CoreError> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Check every section for out-of-range values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for the first offending key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.profile.validate()?;
        if !(0..=MAX_DURATION_MINUTES).contains(&self.checkpoint.max_shift_minutes) {
            return Err(ConfigError::InvalidValue {
                key: "checkpoint.max_shift_minutes".into(),
                message: format!("must be between 0 and {MAX_DURATION_MINUTES}"),
            });
        }
        if self.display_offset().is_none() {
            return Err(ConfigError::InvalidValue {
                key: "display.utc_offset_minutes".into(),
                message: format!(
                    "{} is outside -1439..=1439",
                    self.display.utc_offset_minutes
                ),
            });
        }
        Ok(())
    }

    pub fn checkpoint_clamp(&self) -> CheckpointClamp {
        match self.checkpoint.clamp {
            ClampMode::Exact => CheckpointClamp::Exact,
            ClampMode::Bounded => CheckpointClamp::Bounded {
                max_shift_minutes: self.checkpoint.max_shift_minutes,
            },
        }
    }

    /// Display offset, or `None` when out of range.
    pub fn display_offset(&self) -> Option<FixedOffset> {
        FixedOffset::east_opt(self.display.utc_offset_minutes.checked_mul(60)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, cfg);
        assert_eq!(parsed.profile.walk_to_gate, 10);
        assert_eq!(parsed.risk_policy, RiskPolicy::Strict);
    }

    #[test]
    fn empty_file_is_all_defaults() {
        let parsed: Config = toml::from_str("").unwrap();
        assert_eq!(parsed, Config::default());
    }

    #[test]
    fn partial_sections_parse() {
        let parsed: Config = toml::from_str(
            "risk_policy = \"bounded\"\n[checkpoint]\nclamp = \"bounded\"\n[profile.buffer]\nbalanced = 20\n",
        )
        .unwrap();
        assert_eq!(parsed.risk_policy, RiskPolicy::Bounded);
        assert_eq!(parsed.checkpoint_clamp(), CheckpointClamp::Bounded { max_shift_minutes: 10 });
        assert_eq!(parsed.profile.buffer.balanced, 20);
        assert_eq!(parsed.profile.buffer.very_safe, 30);
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("profile.travel.transit").as_deref(), Some("50"));
        assert_eq!(cfg.get("risk_policy").as_deref(), Some("strict"));
        assert_eq!(cfg.get("display.time_format_24h").as_deref(), Some("true"));
        assert!(cfg.get("profile.missing_key").is_none());
        assert!(cfg.get("").is_none());
    }

    #[test]
    fn set_updates_nested_values() {
        let mut cfg = Config::default();
        cfg.set("profile.security.standard", "30").unwrap();
        cfg.set("risk_policy", "bounded").unwrap();
        cfg.set("display.utc_offset_minutes", "-360").unwrap();
        cfg.set("display.time_format_24h", "false").unwrap();

        assert_eq!(cfg.profile.security.standard, 30);
        assert_eq!(cfg.risk_policy, RiskPolicy::Bounded);
        assert_eq!(cfg.display_offset(), FixedOffset::west_opt(6 * 3600));
        assert!(!cfg.display.time_format_24h);
    }

    #[test]
    fn set_rejects_unknown_key_and_bad_values() {
        let mut cfg = Config::default();
        assert!(matches!(
            cfg.set("profile.nonexistent", "1"),
            Err(CoreError::Config(ConfigError::UnknownKey(_)))
        ));
        assert!(cfg.set("display.time_format_24h", "maybe").is_err());
        assert!(cfg.set("profile.walk_to_gate", "ten").is_err());
        assert!(cfg.set("risk_policy", "reckless").is_err());
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn set_rejects_values_failing_validation() {
        let mut cfg = Config::default();
        assert!(cfg.set("profile.walk_to_gate", "-5").is_err());
        assert!(cfg.set("display.utc_offset_minutes", "1440").is_err());
        assert!(cfg.set("checkpoint.max_shift_minutes", "-1").is_err());
        assert!(cfg.set("profile.travel.car", "9999999999999").is_err());
        assert!(cfg.set("profile.buffer.balanced", "1441").is_err());
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn load_from_writes_defaults_then_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg, Config::default());
        assert!(path.exists());

        let mut changed = cfg.clone();
        changed.set("checkpoint.clamp", "bounded").unwrap();
        changed.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), changed);
    }

    #[test]
    fn load_from_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[profile]\nwalk_to_gate = -3\n").unwrap();
        assert!(Config::load_from(&path).is_err());

        std::fs::write(&path, "not = [valid").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(CoreError::Config(ConfigError::LoadFailed { .. }))
        ));
    }

    #[test]
    fn load_from_leaves_unreadable_file_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let bytes = b"# caf\xe9\nrisk_policy = \"bounded\"\n".to_vec();
        std::fs::write(&path, &bytes).unwrap();

        assert!(matches!(
            Config::load_from(&path),
            Err(CoreError::Config(ConfigError::LoadFailed { .. }))
        ));
        assert_eq!(std::fs::read(&path).unwrap(), bytes);
    }

    #[test]
    fn load_from_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            Config::load_from(dir.path()),
            Err(CoreError::Config(ConfigError::LoadFailed { .. }))
        ));
        assert!(dir.path().is_dir());
    }
}
