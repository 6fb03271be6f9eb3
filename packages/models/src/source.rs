// ABOUTME: Resolution of where a registry file is loaded from
// ABOUTME: Environment override, then the user file, then the embedded default

use std::fmt;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

use modelpin_config::env_non_empty;

use crate::{RegistryError, RegistryResult};

/// Where a registry or catalog was loaded from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Path named by an environment variable
    Env(PathBuf),
    /// File in the modelpin directory
    User(PathBuf),
    /// Default compiled into the binary
    Embedded,
}

impl ConfigSource {
    pub fn path(&self) -> Option<&Path> {
        match self {
            ConfigSource::Env(path) | ConfigSource::User(path) => Some(path),
            ConfigSource::Embedded => None,
        }
    }
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::Env(path) | ConfigSource::User(path) => write!(f, "{}", path.display()),
            ConfigSource::Embedded => write!(f, "embedded defaults"),
        }
    }
}

/// Pick the source for a registry file
///
/// An env var that is set always wins, even if the file is missing, so a
/// typo surfaces as a read error instead of silently using defaults.
pub(crate) async fn resolve(env_var: &str, user_path: PathBuf) -> ConfigSource {
    if let Some(path) = env_non_empty(env_var) {
        debug!("Using {} from {}", path, env_var);
        return ConfigSource::Env(PathBuf::from(path));
    }

    if fs::metadata(&user_path).await.is_ok() {
        return ConfigSource::User(user_path);
    }

    ConfigSource::Embedded
}

/// Read the raw JSON for a source, falling back to `embedded`
pub(crate) async fn read(source: &ConfigSource, embedded: &'static str) -> RegistryResult<String> {
    match source.path() {
        Some(path) => {
            debug!("Reading registry file {:?}", path);
            fs::read_to_string(path)
                .await
                .map_err(|source| RegistryError::Io {
                    path: path.to_path_buf(),
                    source,
                })
        }
        None => Ok(embedded.to_string()),
    }
}
