//! Countdown clock engine.
//!
//! The engine is a tick-driven state machine. It does not use internal
//! threads or timers - the host calls `tick()` once per interval and plays
//! whatever cues come back.
//!
//! ## State Transitions
//!
//! ```text
//! Paused <-> Running -> Ended
//!    ^                    |
//!    +------ reset -------+
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = ClockEngine::new(ClockSettings::default());
//! engine.set_running(RunMode::Run);
//! // Every engine.tick_interval_millis():
//! let cues = engine.tick();
//! sink.play_all(&cues);
//! ```

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::command::{Command, RunMode};
use super::cue::Cue;
use super::face::{self, DayPeriod};
use super::settings::ClockSettings;
use super::time::{ClockTime, HOURS_PER_DAY, MAX_DAY, MINUTES_PER_HOUR, MIN_DAY};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speed {
    #[default]
    Normal,
    Slow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClockState {
    Running,
    Paused,
    /// The countdown ran out; only `reset()` leaves this state.
    Ended,
}

/// Serializable view of the engine at one instant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClockSnapshot {
    pub state: ClockState,
    pub time: ClockTime,
    pub speed: Speed,
    pub interval_ms: u64,
    pub period: DayPeriod,
    pub day_label_index: usize,
    pub arc_extent: i32,
    pub at: DateTime<Utc>,
}

/// Core clock engine.
///
/// Keeps the simulated day, hour and minute within the bounds of
/// [`ClockTime`] at all times.
#[derive(Debug, Clone)]
pub struct ClockEngine {
    settings: ClockSettings,
    day: u8,
    hour: u8,
    minute: u8,
    running: bool,
    ended: bool,
    speed: Speed,
}

impl ClockEngine {
    /// Create an engine paused at the origin of the countdown.
    pub fn new(settings: ClockSettings) -> Self {
        let origin = Self::origin_of(&settings);
        Self::with_time(settings, origin)
    }

    /// Create an engine paused at `time`, e.g. when resuming a previous run.
    pub fn with_time(settings: ClockSettings, time: ClockTime) -> Self {
        Self {
            settings,
            day: time.day(),
            hour: time.hour(),
            minute: time.minute(),
            running: false,
            ended: false,
            speed: Speed::Normal,
        }
    }

    fn origin_of(settings: &ClockSettings) -> ClockTime {
        ClockTime::from_parts(MIN_DAY, settings.start_hour, 0)
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn time(&self) -> ClockTime {
        ClockTime::from_parts(self.day, self.hour, self.minute)
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

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_ended(&self) -> bool {
        self.ended
    }

    pub fn speed(&self) -> Speed {
        self.speed
    }

    pub fn state(&self) -> ClockState {
        if self.ended {
            ClockState::Ended
        } else if self.running {
            ClockState::Running
        } else {
            ClockState::Paused
        }
    }

    /// First minute of the countdown: day 1 at the start hour.
    pub fn origin(&self) -> ClockTime {
        Self::origin_of(&self.settings)
    }

    /// Tick period for the active speed.
    pub fn tick_interval_millis(&self) -> u64 {
        match self.speed {
            Speed::Normal => self.settings.interval_short_ms,
            Speed::Slow => self.settings.interval_long_ms,
        }
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_millis())
    }

    /// True during the last hour of the final day.
    fn is_last_hour(&self) -> bool {
        self.day == MAX_DAY && self.hour == self.settings.last_hour()
    }

    pub fn snapshot(&self) -> ClockSnapshot {
        let time = self.time();
        ClockSnapshot {
            state: self.state(),
            time,
            speed: self.speed,
            interval_ms: self.tick_interval_millis(),
            period: DayPeriod::from_hour(self.hour),
            day_label_index: face::day_label_index(self.day),
            arc_extent: face::minute_arc_extent(time, self.origin()),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Advance one simulated minute. Returns the cues to play, possibly none.
    ///
    /// Does nothing while paused or after the countdown ended.
    pub fn tick(&mut self) -> Vec<Cue> {
        let mut cues = Vec::new();
        if self.ended || !self.running {
            return cues;
        }

        self.minute += 1;
        if self.minute < MINUTES_PER_HOUR {
            return cues;
        }

        self.minute = 0;
        self.hour = (self.hour + 1) % HOURS_PER_DAY;
        cues.push(self.hour_cue());
        if self.day == MAX_DAY && self.settings.is_rumble_hour(self.hour) {
            cues.push(Cue::Rumble);
        }
        tracing::debug!(day = self.day, hour = self.hour, ?cues, "hour elapsed");

        if self.hour == self.settings.start_hour {
            self.day += 1;
            if self.day > MAX_DAY {
                self.finish();
            } else {
                tracing::info!(day = self.day, "new day");
                cues.push(Cue::NewDay);
            }
        }
        cues
    }

    fn hour_cue(&self) -> Cue {
        if self.settings.is_bell_hour(self.hour) {
            Cue::Bells
        } else {
            Cue::Tick
        }
    }

    /// Clamp to the last hour of the final day and stop for good.
    fn finish(&mut self) {
        self.place(MAX_DAY, self.settings.last_hour(), 0);
        self.ended = true;
        tracing::info!(time = %self.time(), "countdown ended");
    }

    /// Set the time without any check and pause.
    fn place(&mut self, day: u8, hour: u8, minute: u8) {
        self.day = day;
        self.hour = hour;
        self.minute = minute;
        self.running = false;
    }

    /// Jump to `time` (e.g. a restored checkpoint) and pause.
    ///
    /// Does not touch the ended flag.
    pub fn set_time(&mut self, time: ClockTime) {
        self.place(time.day(), time.hour(), time.minute());
    }

    /// Back to the origin, paused, normal speed, not ended.
    pub fn reset(&mut self) -> Vec<Cue> {
        let origin = self.origin();
        self.set_time(origin);
        self.ended = false;
        self.speed = Speed::Normal;
        vec![Cue::Stop]
    }

    pub fn set_running(&mut self, mode: RunMode) {
        if self.ended {
            return;
        }
        self.running = match mode {
            RunMode::Switch => !self.running,
            RunMode::Stop => false,
            RunMode::Run => true,
        };
    }

    pub fn cycle_speed(&mut self) {
        self.speed = match self.speed {
            Speed::Normal => Speed::Slow,
            Speed::Slow => Speed::Normal,
        };
    }

    /// Move to the start of the next hour, pausing and restoring normal speed.
    ///
    /// Does nothing after the end or during the last hour of the final day.
    pub fn step_forward(&mut self) -> Vec<Cue> {
        if self.ended || self.is_last_hour() {
            return Vec::new();
        }
        let hour = (self.hour + 1) % HOURS_PER_DAY;
        let day = if hour == self.settings.start_hour {
            self.day + 1
        } else {
            self.day
        };
        self.place(day, hour, 0);
        self.speed = Speed::Normal;
        vec![Cue::Stop]
    }

    /// Move to the start of the current hour, or of the previous one when
    /// already there, pausing and restoring normal speed.
    ///
    /// Does nothing after the end or at the origin.
    pub fn step_backward(&mut self) -> Vec<Cue> {
        if self.ended {
            return Vec::new();
        }
        if self.minute != 0 {
            self.place(self.day, self.hour, 0);
        } else if self.day == MIN_DAY && self.hour == self.settings.start_hour {
            return Vec::new();
        } else {
            let hour = (self.hour + HOURS_PER_DAY - 1) % HOURS_PER_DAY;
            let day = if hour == self.settings.last_hour() {
                self.day - 1
            } else {
                self.day
            };
            self.place(day, hour, 0);
        }
        self.speed = Speed::Normal;
        vec![Cue::Stop]
    }

    /// Dispatch a host command.
    pub fn apply(&mut self, command: Command) -> Vec<Cue> {
        tracing::debug!(?command, time = %self.time(), "applying command");
        match command {
            Command::SetRunning { mode } => {
                self.set_running(mode);
                Vec::new()
            }
            Command::CycleSpeed => {
                self.cycle_speed();
                Vec::new()
            }
            Command::Forward => self.step_forward(),
            Command::Backward => self.step_backward(),
            Command::Reset => self.reset(),
            Command::Restore { time } => {
                self.set_time(time);
                Vec::new()
            }
        }
    }
}

impl Default for ClockEngine {
    fn default() -> Self {
        Self::new(ClockSettings::default())
    }
}
