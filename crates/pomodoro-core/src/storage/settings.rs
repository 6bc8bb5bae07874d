//! Pomodoro settings.
//!
//! Stored as JSON under the `pomodoro-settings` key:
//! - Interval lengths in minutes (focus, short break, long break)
//! - Number of focus sessions before a long break
//! - Auto-start flags for breaks and focus sessions
//! - Notification volume and sound
//!
//! Loading never fails. Missing fields take their defaults; unreadable or
//! out-of-range data is replaced by [`PomodoroSettings::default`].

use serde::{Deserialize, Serialize};

use super::KeyValueStore;
use crate::error::{ConfigError, Result, ValidationError};
use crate::notify::SoundType;
use crate::timer::TimerMode;

pub const SETTINGS_KEY: &str = "pomodoro-settings";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PomodoroSettings {
    /// Focus length in minutes.
    #[serde(default = "default_work_time")]
    pub work_time: u32,
    #[serde(default = "default_short_break_time")]
    pub short_break_time: u32,
    #[serde(default = "default_long_break_time")]
    pub long_break_time: u32,
    /// Focus sessions before a long break.
    #[serde(default = "default_long_break_interval")]
    pub long_break_interval: u32,
    #[serde(default)]
    pub auto_start_break: bool,
    #[serde(default)]
    pub auto_start_work: bool,
    /// 0-100.
    #[serde(default = "default_50")]
    pub sound_volume: u32,
    #[serde(default)]
    pub sound_type: SoundType,
}

// Default functions
fn default_work_time() -> u32 {
    25
}
fn default_short_break_time() -> u32 {
    5
}
fn default_long_break_time() -> u32 {
    15
}
fn default_long_break_interval() -> u32 {
    4
}
fn default_50() -> u32 {
    50
}

impl Default for PomodoroSettings {
    fn default() -> Self {
        Self {
            work_time: default_work_time(),
            short_break_time: default_short_break_time(),
            long_break_time: default_long_break_time(),
            long_break_interval: default_long_break_interval(),
            auto_start_break: false,
            auto_start_work: false,
            sound_volume: default_50(),
            sound_type: SoundType::default(),
        }
    }
}

impl PomodoroSettings {
    /// Interval length in seconds for `mode`; zero for idle.
    pub fn duration_secs(&self, mode: TimerMode) -> u64 {
        let minutes = match mode {
            TimerMode::Focus => self.work_time,
            TimerMode::ShortBreak => self.short_break_time,
            TimerMode::LongBreak => self.long_break_time,
            TimerMode::Idle => 0,
        };
        u64::from(minutes) * 60
    }

    /// # Errors
    ///
    /// Returns the first field that is out of range.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let positive = [
            ("workTime", self.work_time),
            ("shortBreakTime", self.short_break_time),
            ("longBreakTime", self.long_break_time),
            ("longBreakInterval", self.long_break_interval),
        ];
        for (field, value) in positive {
            if value == 0 {
                return Err(ValidationError::InvalidValue {
                    field: field.into(),
                    message: "must be at least 1".into(),
                });
            }
        }
        if self.sound_volume > 100 {
            return Err(ValidationError::InvalidValue {
                field: "soundVolume".into(),
                message: format!("{} is outside 0-100", self.sound_volume),
            });
        }
        Ok(())
    }

    /// Get a setting as a string by its JSON key (e.g. `workTime`).
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        match json.get(key)? {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a setting by its JSON key, parsing `value` as the field's type.
    /// On error `self` is left untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or the result fails validation.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json = serde_json::to_value(&*self).map_err(|e| parse_error(key, value, e))?;
        Self::set_json_value(&mut json, key, value)?;
        let updated: PomodoroSettings =
            serde_json::from_value(json).map_err(|e| parse_error(key, value, e))?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    fn set_json_value(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let obj = root
            .as_object_mut()
            .ok_or_else(|| ConfigError::UnknownKey(key.into()))?;
        let existing = obj
            .get(key)
            .ok_or_else(|| ConfigError::UnknownKey(key.into()))?;

        let new_value = match existing {
            serde_json::Value::Bool(_) => serde_json::Value::Bool(
                value.parse::<bool>().map_err(|e| parse_error(key, value, e))?,
            ),
            serde_json::Value::Number(_) => serde_json::Value::Number(
                value
                    .parse::<u64>()
                    .map_err(|e| parse_error(key, value, e))?
                    .into(),
            ),
            _ => serde_json::Value::String(value.into()),
        };

        obj.insert(key.to_string(), new_value);
        Ok(())
    }

    /// JSON keys accepted by [`get`](Self::get) and [`set`](Self::set).
    pub fn keys() -> Vec<String> {
        match serde_json::to_value(Self::default()) {
            Ok(serde_json::Value::Object(map)) => map.keys().cloned().collect(),
            _ => Vec::new(),
        }
    }
}

fn parse_error(key: &str, value: &str, err: impl std::fmt::Display) -> ConfigError {
    ConfigError::ParseFailed {
        key: key.into(),
        value: value.into(),
        message: err.to_string(),
    }
}

/// Load settings, falling back to defaults on missing or bad data.
pub fn load_settings(store: &dyn KeyValueStore) -> PomodoroSettings {
    let raw = match store.load(SETTINGS_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return PomodoroSettings::default(),
        Err(e) => {
            tracing::warn!("failed to read settings, using defaults: {e}");
            return PomodoroSettings::default();
        }
    };

    match serde_json::from_str::<PomodoroSettings>(&raw) {
        Ok(settings) => match settings.validate() {
            Ok(()) => settings,
            Err(e) => {
                tracing::warn!("stored settings are invalid, using defaults: {e}");
                PomodoroSettings::default()
            }
        },
        Err(e) => {
            tracing::warn!("stored settings are malformed, using defaults: {e}");
            PomodoroSettings::default()
        }
    }
}

/// Persist settings.
///
/// # Errors
///
/// Returns an error if the settings cannot be encoded or written.
pub fn save_settings(store: &dyn KeyValueStore, settings: &PomodoroSettings) -> Result<()> {
    let json = serde_json::to_string(settings)?;
    store.save(SETTINGS_KEY, &json)?;
    Ok(())
}
