// ABOUTME: Core paths, validation and utilities for modelpin
// ABOUTME: Foundational package shared by the registry, storage and pin packages

pub mod constants;
pub mod utils;
pub mod validation;

// Re-export constants
pub use constants::{
    agents_file, models_file, modelpin_dir, pins_file, DEFAULT_MODEL_TRIGGER, STATE_VERSION,
};

// Re-export utilities
pub use utils::{format_timestamp, truncate};

// Re-export validation
pub use validation::{validate_agent_name, ValidationError};
