//! TOML-based presenter configuration.
//!
//! Stores the presenter's preferences:
//! - Shared playback volume and the looping thinking-time track
//! - Countdown tick cadence
//!
//! Configuration is stored at `~/.config/quizdeck/config.toml`. A missing
//! or unreadable file falls back to defaults; nothing here is required for
//! a show to run.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::data_dir;
use crate::error::ConfigError;

/// Audio configuration shared by both playback channels.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioConfig {
    /// Output volume, 0-100.
    #[serde(default = "default_volume")]
    pub volume: u32,
    /// URL of the looping thinking-time track played while a countdown
    /// runs. Unset means the timer channel stays silent.
    #[serde(default)]
    pub timer_loop_url: Option<String>,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            volume: default_volume(),
            timer_loop_url: None,
        }
    }
}

/// Countdown configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountdownConfig {
    /// Interval between periodic recomputes, in milliseconds.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
}

impl Default for CountdownConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval_ms(),
        }
    }
}

fn default_volume() -> u32 {
    80
}

fn default_tick_interval_ms() -> u64 {
    250
}

/// Presenter configuration.
///
/// Serialized to/from TOML at `~/.config/quizdeck/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub audio: AudioConfig,
    #[serde(default)]
    pub countdown: CountdownConfig,
}

impl Config {
    fn path() -> std::io::Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load the configuration, falling back to defaults when the file is
    /// missing or unreadable.
    pub fn load() -> Self {
        let Ok(path) = Self::path() else {
            return Self::default();
        };
        match std::fs::read_to_string(&path) {
            Ok(raw) => toml::from_str(&raw).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path().map_err(|e| ConfigError::SaveFailed(e.to_string()))?;
        let raw = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed(e.to_string()))?;
        std::fs::write(&path, raw).map_err(|e| ConfigError::SaveFailed(e.to_string()))?;
        Ok(())
    }

    /// Volume as the `0.0..=1.0` level the playback coordinator applies.
    pub fn volume_level(&self) -> f64 {
        f64::from(self.audio.volume.min(100)) / 100.0
    }

    /// Look up a value by dotted key, as the CLI presents it.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "audio.volume" => Some(self.audio.volume.to_string()),
            "audio.timer_loop_url" => {
                Some(self.audio.timer_loop_url.clone().unwrap_or_default())
            }
            "countdown.tick_interval_ms" => Some(self.countdown.tick_interval_ms.to_string()),
            _ => None,
        }
    }

    /// Update a value by dotted key. Does not save; callers decide when to
    /// write the file.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "audio.volume" => {
                let volume: u32 = value.parse().map_err(|_| ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: "expected an integer between 0 and 100".to_string(),
                })?;
                if volume > 100 {
                    return Err(ConfigError::InvalidValue {
                        key: key.to_string(),
                        message: "expected an integer between 0 and 100".to_string(),
                    });
                }
                self.audio.volume = volume;
            }
            "audio.timer_loop_url" => {
                self.audio.timer_loop_url = if value.is_empty() {
                    None
                } else {
                    Some(value.to_string())
                };
            }
            "countdown.tick_interval_ms" => {
                let interval: u64 = value.parse().map_err(|_| ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: "expected a positive integer".to_string(),
                })?;
                if interval == 0 {
                    return Err(ConfigError::InvalidValue {
                        key: key.to_string(),
                        message: "expected a positive integer".to_string(),
                    });
                }
                self.countdown.tick_interval_ms = interval;
            }
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        Ok(())
    }
}
