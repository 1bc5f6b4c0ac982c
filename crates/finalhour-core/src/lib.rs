//! # Till the Final Hour Core Library
//!
//! This library provides the core logic for a three-day countdown clock.
//! All operations are driven by a host (the `finalhour` CLI binary), which
//! owns the scheduler and the audio output; the core never sleeps or plays
//! sound itself.
//!
//! ## Architecture
//!
//! - **Clock Engine**: A tick-driven state machine that returns audio cues
//!   as data instead of playing them
//! - **Checkpoints**: A name-keyed store of saved times with a one-line
//!   serialization
//! - **Storage**: TOML-based configuration
//! - **Resume**: The line written on shutdown to relaunch at the same point
//!
//! ## Key Components
//!
//! - [`ClockEngine`]: Core countdown state machine
//! - [`CheckpointStore`]: Named save/restore registry
//! - [`Config`]: Application configuration management
//! - [`ResumeLine`]: Resumption protocol

pub mod checkpoint;
pub mod clock;
pub mod error;
pub mod resume;
pub mod storage;

pub use checkpoint::{Checkpoint, CheckpointStore};
pub use clock::{ClockEngine, ClockSettings, ClockSnapshot, ClockState, ClockTime, Command, Cue, CueSink, RunMode, Speed};
pub use error::{ConfigError, CoreError, ValidationError};
pub use resume::ResumeLine;
pub use storage::Config;
