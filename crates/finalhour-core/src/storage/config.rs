//! TOML-based application configuration.
//!
//! Stores:
//! - Timer intervals and the bell/rumble hours
//! - Sound file locations for each cue
//! - Display labels for days and periods
//! - Resumption settings (entrypoint, continue file)
//!
//! Configuration is stored at `~/.config/finalhour/config.toml`.

use serde::{Deserialize, Deserializer, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::clock::{ClockSettings, Cue, DayPeriod};
use crate::error::{ConfigError, CoreError, Result};

/// Timer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TimerConfig {
    /// Tick period in ms at normal speed.
    #[serde(default = "default_interval_short")]
    pub interval_short: u64,
    /// Tick period in ms at slow speed.
    #[serde(default = "default_interval_long")]
    pub interval_long: u64,
    #[serde(default = "default_bell_hours", deserialize_with = "hour_list")]
    pub bell_hours: Vec<u8>,
    #[serde(default = "default_rumble_hours", deserialize_with = "hour_list")]
    pub rumble_hours: Vec<u8>,
    #[serde(default = "default_start_hour")]
    pub start_hour: u8,
}

/// Sound files, one per cue kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoundsConfig {
    #[serde(default = "default_bells_sound")]
    pub bells: String,
    #[serde(default = "default_tick_sound")]
    pub tick: String,
    #[serde(default = "default_rumble_sound")]
    pub rumble: String,
    #[serde(default = "default_transition_sound")]
    pub transition: String,
}

/// Display labels.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct LabelsConfig {
    /// Index 0 is shown for out-of-range days, 1..=3 for the days themselves.
    #[serde(default = "default_day_labels")]
    pub days: Vec<String>,
    #[serde(default = "default_dawn")]
    pub dawn: String,
    #[serde(default = "default_morning")]
    pub morning: String,
    #[serde(default = "default_afternoon")]
    pub afternoon: String,
    #[serde(default = "default_twilight")]
    pub twilight: String,
    #[serde(default = "default_night")]
    pub night: String,
}

/// Resumption settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SystemConfig {
    /// Command written at the head of the resumption line.
    #[serde(default = "default_entrypoint")]
    pub entrypoint: String,
    /// File the resumption line is written to on shutdown.
    #[serde(default = "default_continue_file")]
    pub continue_file: PathBuf,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/finalhour/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub timer: TimerConfig,
    #[serde(default)]
    pub sounds: SoundsConfig,
    #[serde(default)]
    pub labels: LabelsConfig,
    #[serde(default)]
    pub system: SystemConfig,
}

// Default functions
fn default_interval_short() -> u64 {
    ClockSettings::default().interval_short_ms
}
fn default_interval_long() -> u64 {
    ClockSettings::default().interval_long_ms
}
fn default_bell_hours() -> Vec<u8> {
    ClockSettings::default().bell_hours
}
fn default_rumble_hours() -> Vec<u8> {
    ClockSettings::default().rumble_hours
}
fn default_start_hour() -> u8 {
    ClockSettings::DEFAULT_START_HOUR
}
fn default_bells_sound() -> String {
    "sounds/bells.ogg".into()
}
fn default_tick_sound() -> String {
    "sounds/tick.ogg".into()
}
fn default_rumble_sound() -> String {
    "sounds/rumble.ogg".into()
}
fn default_transition_sound() -> String {
    "sounds/transition.ogg".into()
}
fn default_day_labels() -> Vec<String> {
    vec![
        "???".into(),
        "Dawn of the First Day".into(),
        "Dawn of the Second Day".into(),
        "Dawn of the Final Day".into(),
    ]
}
fn default_dawn() -> String {
    "Dawn".into()
}
fn default_morning() -> String {
    "Morning".into()
}
fn default_afternoon() -> String {
    "Afternoon".into()
}
fn default_twilight() -> String {
    "Twilight".into()
}
fn default_night() -> String {
    "Night".into()
}
fn default_entrypoint() -> String {
    "finalhour".into()
}
fn default_continue_file() -> PathBuf {
    PathBuf::from("continue")
}

/// Accepts either a TOML array of hours or a comma-separated string such as `"0,6,12,18"`.
fn hour_list<'de, D>(deserializer: D) -> std::result::Result<Vec<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum HourList {
        List(Vec<u8>),
        Text(String),
    }

    match HourList::deserialize(deserializer)? {
        HourList::List(hours) => Ok(hours),
        HourList::Text(text) => parse_hour_list(&text).map_err(serde::de::Error::custom),
    }
}

/// Parse `"0, 6,12"` into hours. Blank input yields an empty list.
pub fn parse_hour_list(text: &str) -> std::result::Result<Vec<u8>, String> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<u8>().map_err(|_| format!("'{s}' is not an hour")))
        .collect()
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            interval_short: default_interval_short(),
            interval_long: default_interval_long(),
            bell_hours: default_bell_hours(),
            rumble_hours: default_rumble_hours(),
            start_hour: default_start_hour(),
        }
    }
}

impl Default for SoundsConfig {
    fn default() -> Self {
        Self {
            bells: default_bells_sound(),
            tick: default_tick_sound(),
            rumble: default_rumble_sound(),
            transition: default_transition_sound(),
        }
    }
}

impl Default for LabelsConfig {
    fn default() -> Self {
        Self {
            days: default_day_labels(),
            dawn: default_dawn(),
            morning: default_morning(),
            afternoon: default_afternoon(),
            twilight: default_twilight(),
            night: default_night(),
        }
    }
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            entrypoint: default_entrypoint(),
            continue_file: default_continue_file(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timer: TimerConfig::default(),
            sounds: SoundsConfig::default(),
            labels: LabelsConfig::default(),
            system: SystemConfig::default(),
        }
    }
}

impl SoundsConfig {
    /// Sound file for a cue; `Stop` has none.
    pub fn path_for(&self, cue: Cue) -> Option<&str> {
        match cue {
            Cue::Bells => Some(&self.bells),
            Cue::Tick => Some(&self.tick),
            Cue::Rumble => Some(&self.rumble),
            Cue::NewDay => Some(&self.transition),
            Cue::Stop => None,
        }
    }
}

impl LabelsConfig {
    pub fn day(&self, index: usize) -> &str {
        self.days
            .get(index)
            .or_else(|| self.days.first())
            .map(String::as_str)
            .unwrap_or_default()
    }

    pub fn period(&self, period: DayPeriod) -> &str {
        match period {
            DayPeriod::Dawn => &self.dawn,
            DayPeriod::Morning => &self.morning,
            DayPeriod::Afternoon => &self.afternoon,
            DayPeriod::Twilight => &self.twilight,
            DayPeriod::Night => &self.night,
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
    ) -> std::result::Result<(), ConfigError> {
        let unknown = || ConfigError::InvalidValue {
            key: key.to_string(),
            message: "unknown config key".into(),
        };
        let bad_value = |message: String| ConfigError::InvalidValue {
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
                    .map_err(|e| bad_value(e.to_string()))?,
                serde_json::Value::Number(_) => value
                    .parse::<u64>()
                    .map(|n| serde_json::Value::Number(n.into()))
                    .map_err(|_| bad_value(format!("cannot parse '{value}' as number")))?,
                serde_json::Value::Array(_) if !value.trim_start().starts_with('[') => {
                    if part.ends_with("-hours") {
                        let hours = parse_hour_list(value).map_err(bad_value)?;
                        serde_json::to_value(hours).map_err(|e| bad_value(e.to_string()))?
                    } else {
                        value
                            .split(',')
                            .map(|item| serde_json::Value::String(item.trim().to_string()))
                            .collect()
                    }
                }
                serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                    serde_json::from_str(value).map_err(|e| bad_value(e.to_string()))?
                }
                _ => serde_json::Value::String(value.into()),
            };

            obj.insert(part.to_string(), new_value);
            return Ok(());
        }

        Err(unknown())
    }

    /// Default location, `~/.config/finalhour[-dev]/config.toml`.
    pub fn default_path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the default location, writing defaults on first use.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed or
    /// validated, or if the default config cannot be written to disk.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::default_path()?)
    }

    /// Load from `path`, writing defaults there if the file does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?;
                cfg.validate()?;
                Ok(cfg)
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "writing default configuration");
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(err) => Err(CoreError::Io(err)),
        }
    }

    /// Persist to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| save_failed(e.to_string()))?;
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

    /// Set a config value by key, in memory only.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or the resulting configuration is invalid.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json)?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for zero intervals or hours above 23.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        self.clock_settings().validate()
    }

    /// Settings the clock engine is built from.
    pub fn clock_settings(&self) -> ClockSettings {
        ClockSettings {
            interval_short_ms: self.timer.interval_short,
            interval_long_ms: self.timer.interval_long,
            bell_hours: self.timer.bell_hours.clone(),
            rumble_hours: self.timer.rumble_hours.clone(),
            start_hour: self.timer.start_hour,
        }
    }
}
