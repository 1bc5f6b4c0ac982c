use std::fmt;

use serde::{Deserialize, Serialize};

/// Audio cue requested by the clock engine.
///
/// The engine only decides *which* cue fires; mapping a cue to an actual
/// sound is the host's job through a [`CueSink`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Cue {
    /// Bells at a configured bell hour.
    Bells,
    /// A single clock tick at every other hour.
    Tick,
    /// Low rumble on the final day, on its own channel.
    Rumble,
    /// Transition into a new day.
    NewDay,
    /// Halt every cue currently playing.
    Stop,
}

impl Cue {
    pub fn as_str(&self) -> &'static str {
        match self {
            Cue::Bells => "bells",
            Cue::Tick => "tick",
            Cue::Rumble => "rumble",
            Cue::NewDay => "new-day",
            Cue::Stop => "stop",
        }
    }

    /// Rumble plays on the environment channel so it can overlap the clock cues.
    pub fn channel(&self) -> Channel {
        match self {
            Cue::Rumble => Channel::Environment,
            _ => Channel::Clock,
        }
    }
}

impl fmt::Display for Cue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Clock,
    Environment,
}

/// Receiver for the cues emitted by the engine.
pub trait CueSink {
    /// Play a cue. [`Cue::Stop`] must halt every channel immediately.
    fn play(&mut self, cue: Cue);

    fn play_all(&mut self, cues: &[Cue]) {
        for &cue in cues {
            self.play(cue);
        }
    }
}

/// Sink that records cues in order; handy for hosts without audio and for tests.
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    pub played: Vec<Cue>,
}

impl CueSink for RecordingSink {
    fn play(&mut self, cue: Cue) {
        self.played.push(cue);
    }
}
