use thiserror::Error;

use modelpin_core::ValidationError;
use modelpin_models::RegistryError;
use modelpin_storage::StorageError;

#[derive(Error, Debug)]
pub enum PinError {
    #[error("Agent not found: {0}")]
    AgentNotFound(String),

    #[error("Model not found in registry: {0}")]
    ModelNotFound(String),

    #[error("Agent '{0}' has no pinned model")]
    NoPin(String),

    #[error("Pinned model '{model}' for agent '{agent}' no longer exists in the registry")]
    StalePin { agent: String, model: String },

    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),

    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

pub type PinResult<T> = Result<T, PinError>;
