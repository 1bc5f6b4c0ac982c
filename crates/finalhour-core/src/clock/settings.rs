use serde::{Deserialize, Serialize};

use super::time::HOURS_PER_DAY;
use crate::error::ConfigError;

/// Tunables the clock engine is built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockSettings {
    /// Tick period in milliseconds at normal speed.
    pub interval_short_ms: u64,
    /// Tick period in milliseconds at slow speed.
    pub interval_long_ms: u64,
    /// Hours at which the bells ring instead of a single tick.
    pub bell_hours: Vec<u8>,
    /// Hours at which the rumble plays on the final day.
    pub rumble_hours: Vec<u8>,
    /// Hour at which a new day begins; the countdown starts here on day 1.
    pub start_hour: u8,
}

impl ClockSettings {
    pub const DEFAULT_START_HOUR: u8 = 5;

    pub fn is_bell_hour(&self, hour: u8) -> bool {
        self.bell_hours.contains(&hour)
    }

    pub fn is_rumble_hour(&self, hour: u8) -> bool {
        self.rumble_hours.contains(&hour)
    }

    /// The hour just before `start_hour`, i.e. the last hour of any day.
    pub fn last_hour(&self) -> u8 {
        (self.start_hour + HOURS_PER_DAY - 1) % HOURS_PER_DAY
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for a zero interval or an hour above 23.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.interval_short_ms == 0 {
            return Err(invalid("interval-short", "must be greater than 0"));
        }
        if self.interval_long_ms == 0 {
            return Err(invalid("interval-long", "must be greater than 0"));
        }
        if self.start_hour >= HOURS_PER_DAY {
            return Err(invalid("start-hour", &format!("{} is not an hour", self.start_hour)));
        }
        for (key, hours) in [("bell-hours", &self.bell_hours), ("rumble-hours", &self.rumble_hours)] {
            if let Some(bad) = hours.iter().find(|&&h| h >= HOURS_PER_DAY) {
                return Err(invalid(key, &format!("{bad} is not an hour")));
            }
        }
        Ok(())
    }
}

fn invalid(key: &str, message: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        message: message.to_string(),
    }
}

impl Default for ClockSettings {
    fn default() -> Self {
        Self {
            interval_short_ms: 1000,
            interval_long_ms: 2000,
            bell_hours: vec![0, 6, 12, 18],
            rumble_hours: vec![0, 3, 6, 9, 12, 15, 18, 21],
            start_hour: Self::DEFAULT_START_HOUR,
        }
    }
}
