use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

pub const MIN_DAY: u8 = 1;
pub const MAX_DAY: u8 = 3;
pub const HOURS_PER_DAY: u8 = 24;
pub const MINUTES_PER_HOUR: u8 = 60;

/// Text form of a time-triple, shared with the checkpoint token grammar.
pub(crate) const TIME_PATTERN: &str = r"[1-3]\.(?:[01][0-9]|2[0-3])\.[0-5][0-9]";

static TIME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("^{TIME_PATTERN}$")).expect("time pattern is a valid regex")
});

/// A point in the three-day countdown.
///
/// Always within bounds: `1..=3` days, `0..=23` hours, `0..=59` minutes.
/// The canonical text form is `D.HH.MM`, and [`FromStr`] is its exact inverse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime {
    day: u8,
    hour: u8,
    minute: u8,
}

impl ClockTime {
    /// Build a validated time-triple.
    ///
    /// Takes wide integers so out-of-range input from arguments or user
    /// entry is reported instead of being truncated.
    pub fn new(day: i64, hour: i64, minute: i64) -> Result<Self, ValidationError> {
        if !Self::is_valid(day, hour, minute) {
            return Err(ValidationError::InvalidTime { day, hour, minute });
        }
        Ok(Self::from_parts(day as u8, hour as u8, minute as u8))
    }

    pub fn is_valid(day: i64, hour: i64, minute: i64) -> bool {
        (i64::from(MIN_DAY)..=i64::from(MAX_DAY)).contains(&day)
            && (0..i64::from(HOURS_PER_DAY)).contains(&hour)
            && (0..i64::from(MINUTES_PER_HOUR)).contains(&minute)
    }

    /// Unchecked constructor for values the engine has already kept in range.
    pub(crate) const fn from_parts(day: u8, hour: u8, minute: u8) -> Self {
        Self { day, hour, minute }
    }

    pub fn day(&self) -> u8 {
        self.day
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    /// Human-readable form, e.g. `Day 1, hour 1, min 55`.
    pub fn describe(&self) -> String {
        format!("Day {}, hour {}, min {}", self.day, self.hour, self.minute)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}.{:02}", self.day, self.hour, self.minute)
    }
}

impl FromStr for ClockTime {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !TIME_RE.is_match(s) {
            return Err(ValidationError::Parse { input: s.to_string() });
        }
        let mut parts = s.split('.').map(str::parse::<u8>);
        match (parts.next(), parts.next(), parts.next()) {
            (Some(Ok(day)), Some(Ok(hour)), Some(Ok(minute))) => {
                Ok(Self::from_parts(day, hour, minute))
            }
            _ => Err(ValidationError::Parse { input: s.to_string() }),
        }
    }
}

impl TryFrom<String> for ClockTime {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ClockTime> for String {
    fn from(time: ClockTime) -> Self {
        time.to_string()
    }
}
