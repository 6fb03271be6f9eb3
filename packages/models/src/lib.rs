// ABOUTME: Model registry and agent catalog
// ABOUTME: JSON-backed sources of known model identifiers and agent names

pub mod agents;
pub mod registry;
pub mod source;
pub mod types;

use std::path::PathBuf;
use thiserror::Error;

pub use agents::AgentCatalog;
pub use registry::ModelRegistry;
pub use source::ConfigSource;
pub use types::{Agent, AgentsConfig, Model};

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {origin}: {source}")]
    Parse {
        origin: ConfigSource,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid entry in {origin}: {message}")]
    InvalidEntry { origin: ConfigSource, message: String },
}

pub type RegistryResult<T> = Result<T, RegistryError>;
