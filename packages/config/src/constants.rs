// ABOUTME: Environment variable name constants
// ABOUTME: Centralized definitions of all environment variable names used across modelpin

// Storage Locations
pub const MODELPIN_HOME: &str = "MODELPIN_HOME";
pub const MODELS_JSON_PATH: &str = "MODELS_JSON_PATH";
pub const MODELPIN_AGENTS_PATH: &str = "MODELPIN_AGENTS_PATH";

// Logging
pub const MODELPIN_LOG: &str = "MODELPIN_LOG";
pub const RUST_LOG: &str = "RUST_LOG";

// System Environment Variables
pub const HOME: &str = "HOME";
pub const USERPROFILE: &str = "USERPROFILE"; // Windows
