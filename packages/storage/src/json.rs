use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, error, warn};

use super::{PinState, PinStorage, StorageResult};

/// Pin state kept in a pretty-printed JSON file (pins.json by default)
#[derive(Debug, Clone)]
pub struct JsonPinStore {
    path: PathBuf,
}

impl JsonPinStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Where an unreadable state file is copied before it can be overwritten
    pub fn backup_path(&self) -> PathBuf {
        self.path.with_extension("json.bak")
    }

    /// Ensures the parent directory and the state file exist
    pub async fn ensure_file(&self) -> StorageResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && fs::metadata(parent).await.is_err() {
                debug!("Creating modelpin directory: {:?}", parent);
                fs::create_dir_all(parent).await?;
            }
        }

        if fs::metadata(&self.path).await.is_err() {
            debug!("Creating pin state file: {:?}", self.path);
            let json_content = serde_json::to_string_pretty(&PinState::default())?;
            fs::write(&self.path, json_content).await?;
        }

        Ok(())
    }
}

#[async_trait]
impl PinStorage for JsonPinStore {
    async fn load(&self) -> StorageResult<PinState> {
        self.ensure_file().await?;
        debug!("Reading pin state from: {:?}", self.path);

        match fs::read_to_string(&self.path).await {
            Ok(content) => match serde_json::from_str::<PinState>(&content) {
                Ok(state) => {
                    debug!("Loaded {} pins", state.pins.len());
                    Ok(state)
                }
                Err(e) => {
                    error!("Failed to parse {:?}: {}", self.path, e);
                    let backup = self.backup_path();
                    fs::copy(&self.path, &backup).await?;
                    warn!("Using empty pin state; previous file kept at {:?}", backup);
                    Ok(PinState::default())
                }
            },
            Err(e) => {
                error!("Failed to read {:?}: {}", self.path, e);
                warn!("Using empty pin state");
                Ok(PinState::default())
            }
        }
    }

    async fn save(&self, state: &PinState) -> StorageResult<()> {
        self.ensure_file().await?;
        debug!("Writing pin state to: {:?}", self.path);

        // Write to a sibling file first so a crash never leaves half a document
        let json_content = serde_json::to_string_pretty(state)?;
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, json_content).await?;
        fs::rename(&tmp_path, &self.path).await?;

        debug!("Wrote {} pins to disk", state.pins.len());
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> JsonPinStore {
        JsonPinStore::new(dir.path().join("nested").join("pins.json"))
    }

    #[tokio::test]
    async fn test_ensure_file_creates_default_state() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.ensure_file().await.unwrap();
        assert!(store.path().exists());

        let state = store.load().await.unwrap();
        assert_eq!(state, PinState::default());
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let mut state = PinState::default();
        state.set_pin("coder", "gpt-4.1");
        state.active_model = Some("o3".to_string());
        store.save(&state).await.unwrap();

        let loaded = store.load().await.unwrap();
        assert_eq!(loaded, state);
        assert!(!store.path().with_extension("json.tmp").exists());
    }

    #[tokio::test]
    async fn test_corrupt_file_falls_back_to_default() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.ensure_file().await.unwrap();
        fs::write(store.path(), "{ not json").await.unwrap();

        let state = store.load().await.unwrap();
        assert_eq!(state, PinState::default());
    }

    #[tokio::test]
    async fn test_corrupt_file_is_backed_up_before_save() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.ensure_file().await.unwrap();
        fs::write(store.path(), r#"{"pins": {"coder": "#).await.unwrap();

        let mut state = store.load().await.unwrap();
        state.set_pin("planner", "o3");
        store.save(&state).await.unwrap();

        let backup = fs::read_to_string(store.backup_path()).await.unwrap();
        assert_eq!(backup, r#"{"pins": {"coder": "#);
        assert_eq!(store.load().await.unwrap(), state);
    }

    #[test]
    fn test_location_is_path() {
        let store = JsonPinStore::new("/tmp/modelpin/pins.json");
        assert_eq!(store.location(), "/tmp/modelpin/pins.json");
    }
}
