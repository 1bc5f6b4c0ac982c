use serde::{Deserialize, Serialize};

use super::time::ClockTime;

/// How [`ClockEngine::set_running`](super::ClockEngine::set_running) changes the run flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    #[default]
    Switch,
    Stop,
    Run,
}

/// User-level operations a host can dispatch to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Command {
    /// Pause, resume or toggle.
    SetRunning { mode: RunMode },
    /// Toggle between normal and slow speed.
    CycleSpeed,
    /// Jump to the start of the next hour.
    Forward,
    /// Jump to the start of the current or previous hour.
    Backward,
    /// Back to the origin of the countdown.
    Reset,
    /// Restore a saved point in time.
    Restore { time: ClockTime },
}

impl Command {
    pub const TOGGLE: Command = Command::SetRunning { mode: RunMode::Switch };
    pub const PAUSE: Command = Command::SetRunning { mode: RunMode::Stop };
    pub const RUN: Command = Command::SetRunning { mode: RunMode::Run };
}
