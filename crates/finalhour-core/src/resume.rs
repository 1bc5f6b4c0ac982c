//! Resumption line written on shutdown and replayed as startup arguments.
//!
//! ```text
//! <entrypoint> --day D --hour H --minute M [--saves="tok1,tok2,..."]
//! ```

use std::fmt;
use std::path::Path;

use crate::checkpoint::CheckpointStore;
use crate::clock::ClockTime;
use crate::error::{Result, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeLine {
    pub entrypoint: String,
    pub time: ClockTime,
    /// Serialized checkpoint table; empty when there are no checkpoints.
    pub saves: String,
}

impl ResumeLine {
    pub fn new(entrypoint: impl Into<String>, time: ClockTime, store: &CheckpointStore) -> Self {
        Self {
            entrypoint: entrypoint.into(),
            time,
            saves: store.serialize(),
        }
    }

    /// Validate the starting time passed on the command line.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidTime`]; hosts treat it as fatal.
    pub fn parse_time(day: i64, hour: i64, minute: i64) -> Result<ClockTime, ValidationError> {
        ClockTime::new(day, hour, minute)
    }

    /// The line without the trailing newline.
    pub fn render(&self) -> String {
        self.to_string()
    }

    /// Overwrite `path` with the line.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        std::fs::write(path, format!("{self}\n"))?;
        tracing::info!(path = %path.display(), line = %self, "resumption line written");
        Ok(())
    }
}

impl fmt::Display for ResumeLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} --day {} --hour {} --minute {}",
            self.entrypoint,
            self.time.day(),
            self.time.hour(),
            self.time.minute()
        )?;
        if !self.saves.is_empty() {
            write!(f, " --saves=\"{}\"", self.saves)?;
        }
        Ok(())
    }
}
