//! Name-keyed registry of checkpoints.
//!
//! The whole table serializes to a single comma-separated line so it can
//! ride along in the resumption line and come back on the next start.

use std::collections::BTreeMap;

use super::entry::{is_name_valid, Checkpoint};
use crate::clock::ClockTime;
use crate::error::ValidationError;

/// Checkpoint registry, owned by the host.
#[derive(Debug, Clone, Default)]
pub struct CheckpointStore {
    saves: BTreeMap<String, Checkpoint>,
}

impl CheckpointStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Save `time` under `name`.
    ///
    /// Checks are applied in order: name, time, uniqueness.
    ///
    /// # Errors
    ///
    /// [`ValidationError::InvalidName`], [`ValidationError::InvalidTime`] or
    /// [`ValidationError::DuplicateName`].
    pub fn create(&mut self, name: &str, day: i64, hour: i64, minute: i64) -> Result<(), ValidationError> {
        if !is_name_valid(name) {
            return Err(ValidationError::InvalidName { name: name.to_string() });
        }
        let time = ClockTime::new(day, hour, minute)?;
        self.insert_new(Checkpoint::new(name, time)?)
    }

    /// Same as [`create`](Self::create) for an already valid time.
    pub fn create_at(&mut self, name: &str, time: ClockTime) -> Result<(), ValidationError> {
        self.insert_new(Checkpoint::new(name, time)?)
    }

    fn insert_new(&mut self, checkpoint: Checkpoint) -> Result<(), ValidationError> {
        if self.saves.contains_key(checkpoint.name()) {
            return Err(ValidationError::DuplicateName {
                name: checkpoint.name().to_string(),
            });
        }
        tracing::info!(checkpoint = %checkpoint, "checkpoint created");
        self.saves.insert(checkpoint.name().to_string(), checkpoint);
        Ok(())
    }

    /// Names of every stored checkpoint.
    pub fn list(&self) -> Vec<String> {
        self.saves.keys().cloned().collect()
    }

    pub fn get(&self, name: &str) -> Option<&Checkpoint> {
        self.saves.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Checkpoint> {
        self.saves.values()
    }

    /// Remove `name`; unknown names are ignored.
    pub fn delete(&mut self, name: &str) {
        if self.saves.remove(name).is_some() {
            tracing::info!(name, "checkpoint deleted");
        }
    }

    pub fn len(&self) -> usize {
        self.saves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.saves.is_empty()
    }

    /// Comma-separated `name@D.HH.MM` tokens, sorted by name.
    pub fn serialize(&self) -> String {
        self.saves
            .values()
            .map(Checkpoint::to_token)
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Install every valid token from `text` and return the malformed ones.
    ///
    /// Empty tokens are skipped. A token whose name is already stored
    /// replaces the earlier checkpoint.
    pub fn deserialize(&mut self, text: &str) -> Vec<String> {
        let mut failures = Vec::new();
        for token in text.split(',').filter(|t| !t.is_empty()) {
            match token.parse::<Checkpoint>() {
                Ok(checkpoint) => {
                    tracing::debug!(token, "checkpoint loaded");
                    self.saves.insert(checkpoint.name().to_string(), checkpoint);
                }
                Err(_) => {
                    tracing::warn!(token, "ignoring malformed checkpoint");
                    failures.push(token.to_string());
                }
            }
        }
        failures
    }
}
