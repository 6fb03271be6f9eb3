// ABOUTME: Pin validation against the model registry
// ABOUTME: Detects pins that point at models the registry no longer lists

use serde::Serialize;

use modelpin_models::ModelRegistry;

/// Outcome of checking one agent's pin
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "model", rename_all = "lowercase")]
pub enum PinStatus {
    /// No pin recorded for the agent
    Unpinned,
    /// Pin points at a model the registry knows
    Valid(String),
    /// Pin points at a model missing from the registry
    Stale(String),
}

impl PinStatus {
    pub fn is_stale(&self) -> bool {
        matches!(self, PinStatus::Stale(_))
    }

    /// The model named by the pin, valid or not
    pub fn model(&self) -> Option<&str> {
        match self {
            PinStatus::Unpinned => None,
            PinStatus::Valid(model) | PinStatus::Stale(model) => Some(model),
        }
    }
}

/// Classify a pin against the registry
pub fn pin_status(pinned: Option<&str>, registry: &ModelRegistry) -> PinStatus {
    match pinned {
        None => PinStatus::Unpinned,
        Some(model) if registry.contains(model) => PinStatus::Valid(model.to_string()),
        Some(model) => PinStatus::Stale(model.to_string()),
    }
}

/// Return the stale model identifier, or `None` when there is nothing wrong
///
/// "No pin" and "valid pin" both give `None`; use [`pin_status`] to tell
/// them apart.
pub fn validate_pin(pinned: Option<&str>, registry: &ModelRegistry) -> Option<String> {
    match pin_status(pinned, registry) {
        PinStatus::Stale(model) => Some(model),
        PinStatus::Unpinned | PinStatus::Valid(_) => None,
    }
}
