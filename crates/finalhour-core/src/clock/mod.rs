mod command;
mod cue;
mod engine;
pub mod face;
mod settings;
mod time;

pub use command::{Command, RunMode};
pub use cue::{Channel, Cue, CueSink, RecordingSink};
pub use engine::{ClockEngine, ClockSnapshot, ClockState, Speed};
pub use face::DayPeriod;
pub use settings::ClockSettings;
pub use time::{ClockTime, HOURS_PER_DAY, MAX_DAY, MINUTES_PER_HOUR, MIN_DAY};
pub(crate) use time::TIME_PATTERN;
