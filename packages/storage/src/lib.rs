// ABOUTME: Pin state persistence
// ABOUTME: Storage trait with a JSON file backend and an in-memory backend

pub mod json;
pub mod memory;
pub mod types;

use async_trait::async_trait;
use thiserror::Error;

pub use json::JsonPinStore;
pub use memory::MemoryPinStore;
pub use types::{PinRecord, PinState};

/// Storage errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Storage lock poisoned")]
    Poisoned,
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Backend that holds the pin state between runs
///
/// Implementations load and save the whole state; callers read, modify and
/// write it back.
#[async_trait]
pub trait PinStorage: Send + Sync {
    async fn load(&self) -> StorageResult<PinState>;
    async fn save(&self, state: &PinState) -> StorageResult<()>;

    /// Short description of where the state lives, for diagnostics
    fn location(&self) -> String;
}
