// ABOUTME: Pin state types
// ABOUTME: Serialized shape of pins.json plus the pure operations on it

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use modelpin_core::STATE_VERSION;

/// A single agent-to-model pin
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinRecord {
    pub model: String,
    pub pinned_at: DateTime<Utc>,
}

impl PinRecord {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            pinned_at: Utc::now(),
        }
    }
}

/// Everything persisted in pins.json
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinState {
    pub version: String,
    /// Globally selected model, used when an agent has no pin
    #[serde(default)]
    pub active_model: Option<String>,
    /// Agent that model switches apply to
    #[serde(default)]
    pub current_agent: Option<String>,
    /// Pins keyed by agent name
    #[serde(default)]
    pub pins: BTreeMap<String, PinRecord>,
}

impl Default for PinState {
    fn default() -> Self {
        Self {
            version: STATE_VERSION.to_string(),
            active_model: None,
            current_agent: None,
            pins: BTreeMap::new(),
        }
    }
}

impl PinState {
    /// Pinned model for an agent, if any
    pub fn pinned_model(&self, agent: &str) -> Option<&str> {
        self.pins.get(agent).map(|p| p.model.as_str())
    }

    /// Set or replace a pin, returning the previous model
    pub fn set_pin(&mut self, agent: &str, model: &str) -> Option<String> {
        self.pins
            .insert(agent.to_string(), PinRecord::new(model))
            .map(|old| old.model)
    }

    /// Remove a pin, returning the model it pointed at
    pub fn remove_pin(&mut self, agent: &str) -> Option<String> {
        self.pins.remove(agent).map(|old| old.model)
    }

    /// Remove every pin, returning how many there were
    pub fn clear_pins(&mut self) -> usize {
        let count = self.pins.len();
        self.pins.clear();
        count
    }
}
