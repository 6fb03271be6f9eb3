// ABOUTME: End-to-end pin lifecycle against files on disk
// ABOUTME: Pins persist in pins.json and go stale when models.json drops a model

use async_trait::async_trait;
use pretty_assertions::assert_eq;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

use modelpin_models::{AgentCatalog, ModelRegistry, RegistryResult};
use modelpin_pins::{CatalogSource, PinEntryStatus, PinManager, PinStatus};
use modelpin_storage::JsonPinStore;

/// Reads models.json from a fixed path on every call
struct DiskCatalogs {
    models_path: PathBuf,
}

#[async_trait]
impl CatalogSource for DiskCatalogs {
    async fn models(&self) -> RegistryResult<ModelRegistry> {
        ModelRegistry::load_from(&self.models_path).await
    }

    async fn agents(&self) -> RegistryResult<AgentCatalog> {
        AgentCatalog::embedded()
    }
}

async fn setup(models_json: &str) -> (TempDir, PathBuf, PinManager) {
    let dir = TempDir::new().unwrap();
    let models_path = dir.path().join("models.json");
    tokio::fs::write(&models_path, models_json).await.unwrap();

    let manager = PinManager::new(
        Arc::new(JsonPinStore::new(dir.path().join("pins.json"))),
        Arc::new(DiskCatalogs {
            models_path: models_path.clone(),
        }),
    );
    (dir, models_path, manager)
}

#[tokio::test]
async fn test_pin_goes_stale_when_registry_changes() {
    let (_dir, models_path, manager) = setup(r#"{"gpt-4.1": {}, "o3": {}}"#).await;

    manager.pin("coder", "o3").await.unwrap();
    assert_eq!(manager.validate_pinned_model("coder").await.unwrap(), None);

    tokio::fs::write(&models_path, r#"{"gpt-4.1": {}}"#)
        .await
        .unwrap();

    assert_eq!(
        manager.validate_pinned_model("coder").await.unwrap(),
        Some("o3".to_string())
    );
    assert_eq!(
        manager.pin_status("coder").await.unwrap(),
        PinStatus::Stale("o3".to_string())
    );

    let entries = manager.list_pins().await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].status, PinEntryStatus::Stale);
}

#[tokio::test]
async fn test_pins_survive_new_manager() {
    let (dir, models_path, manager) = setup(r#"{"gpt-4.1": {}, "o3": {}}"#).await;

    manager.pin("planner", "gpt-4.1").await.unwrap();
    manager.copy_pin("planner", "reviewer").await.unwrap();
    drop(manager);

    let reopened = PinManager::new(
        Arc::new(JsonPinStore::new(dir.path().join("pins.json"))),
        Arc::new(DiskCatalogs { models_path }),
    );
    assert_eq!(
        reopened.get_pin("reviewer").await.unwrap(),
        Some("gpt-4.1".to_string())
    );
    assert_eq!(reopened.unpin_all().await.unwrap(), 2);
}

#[tokio::test]
async fn test_repair_removes_only_stale_pins() {
    let (_dir, models_path, manager) = setup(r#"{"gpt-4.1": {}, "o3": {}}"#).await;

    manager.pin("coder", "o3").await.unwrap();
    manager.pin("planner", "gpt-4.1").await.unwrap();
    tokio::fs::write(&models_path, r#"{"gpt-4.1": {}}"#)
        .await
        .unwrap();

    let removed = manager.repair_stale_pins().await.unwrap();
    assert_eq!(removed.len(), 1);
    assert_eq!(removed[0].agent, "coder");

    assert_eq!(manager.get_pin("coder").await.unwrap(), None);
    assert_eq!(
        manager.get_pin("planner").await.unwrap(),
        Some("gpt-4.1".to_string())
    );
}
