use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::clock::{ClockTime, TIME_PATTERN};
use crate::error::ValidationError;

pub const NAME_MAX_LEN: usize = 16;
pub const NAME_RULES: &str =
    "Rules:\n - length 1 to 16;\n - allowed characters: English alphabet letters, digits and whitespace";

const NAME_PATTERN: &str = "[A-Za-z0-9 ]{1,16}";

static NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("^{NAME_PATTERN}$")).expect("name pattern is a valid regex")
});

static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("^({NAME_PATTERN})@({TIME_PATTERN})$")).expect("token pattern is a valid regex")
});

/// A named, saved point in the countdown.
///
/// Two checkpoints are equal when their *names* are equal, whatever their
/// times. The store keys on the name, so this matches how checkpoints are
/// looked up; compare [`Checkpoint::time`] explicitly when the time matters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Checkpoint {
    name: String,
    time: ClockTime,
}

impl Checkpoint {
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidName`] if `name` breaks [`NAME_RULES`].
    pub fn new(name: impl Into<String>, time: ClockTime) -> Result<Self, ValidationError> {
        let name = name.into();
        if !is_name_valid(&name) {
            return Err(ValidationError::InvalidName { name });
        }
        Ok(Self { name, time })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn time(&self) -> ClockTime {
        self.time
    }

    /// e.g. `Day 2, hour 0, min 10`
    pub fn time_description(&self) -> String {
        self.time.describe()
    }

    /// Serialized form, `name@D.HH.MM`.
    pub fn to_token(&self) -> String {
        format!("{}@{}", self.name, self.time)
    }
}

pub fn is_name_valid(name: &str) -> bool {
    NAME_RE.is_match(name)
}

impl PartialEq for Checkpoint {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Checkpoint {}

impl fmt::Display for Checkpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "\"{}\", day {} at {:02}:{:02}",
            self.name,
            self.time.day(),
            self.time.hour(),
            self.time.minute()
        )
    }
}

impl FromStr for Checkpoint {
    type Err = ValidationError;

    /// Parse a `name@D.HH.MM` token.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse_error = || ValidationError::Parse { input: s.to_string() };
        let caps = TOKEN_RE.captures(s).ok_or_else(parse_error)?;
        let time: ClockTime = caps[2].parse().map_err(|_| parse_error())?;
        Ok(Self {
            name: caps[1].to_string(),
            time,
        })
    }
}
