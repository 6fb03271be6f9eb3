use modelpin_config::constants::{HOME, MODELPIN_HOME, USERPROFILE};
use modelpin_config::env_non_empty;
use std::path::PathBuf;

/// Current version of the pin state file format
pub const STATE_VERSION: &str = "1.0.0";

/// Prompt prefix that opens model-name completion
pub const DEFAULT_MODEL_TRIGGER: &str = "/model";

/// Get the path to the modelpin directory
///
/// `MODELPIN_HOME` wins when set. Otherwise the directory is `~/.modelpin`,
/// where HOME is read from the environment first (useful for tests).
pub fn modelpin_dir() -> PathBuf {
    if let Some(dir) = env_non_empty(MODELPIN_HOME) {
        return PathBuf::from(dir);
    }

    let home = env_non_empty(HOME)
        .or_else(|| env_non_empty(USERPROFILE))
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."));

    home.join(".modelpin")
}

/// Get the path to the pin state file (pins.json)
pub fn pins_file() -> PathBuf {
    modelpin_dir().join("pins.json")
}

/// Get the path to the user model registry (models.json)
pub fn models_file() -> PathBuf {
    modelpin_dir().join("models.json")
}

/// Get the path to the user agent catalog (agents.json)
pub fn agents_file() -> PathBuf {
    modelpin_dir().join("agents.json")
}
