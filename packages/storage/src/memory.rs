use async_trait::async_trait;
use std::sync::Mutex;

use super::{PinState, PinStorage, StorageError, StorageResult};

/// Pin state held only in memory
#[derive(Debug, Default)]
pub struct MemoryPinStore {
    state: Mutex<PinState>,
}

impl MemoryPinStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(state: PinState) -> Self {
        Self {
            state: Mutex::new(state),
        }
    }
}

#[async_trait]
impl PinStorage for MemoryPinStore {
    async fn load(&self) -> StorageResult<PinState> {
        self.state
            .lock()
            .map(|state| state.clone())
            .map_err(|_| StorageError::Poisoned)
    }

    async fn save(&self, state: &PinState) -> StorageResult<()> {
        let mut guard = self.state.lock().map_err(|_| StorageError::Poisoned)?;
        *guard = state.clone();
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_in_memory() {
        tokio_test::block_on(async {
            let store = MemoryPinStore::new();
            let mut state = store.load().await.unwrap();
            state.set_pin("planner", "o3");
            store.save(&state).await.unwrap();

            let reloaded = store.load().await.unwrap();
            assert_eq!(reloaded.pinned_model("planner"), Some("o3"));
        });
    }
}
