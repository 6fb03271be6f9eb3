// ABOUTME: Model registry loaded from models.json
// ABOUTME: Ordered in-memory lookup of known model identifiers, reloaded on demand

use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, warn};

use modelpin_config::constants::MODELS_JSON_PATH;
use modelpin_core::models_file;

use crate::source::{self, ConfigSource};
use crate::types::Model;
use crate::{RegistryError, RegistryResult};

const EMBEDDED_MODELS: &str = include_str!("../config/models.json");

/// Known models, in the order the file lists them
#[derive(Debug, Clone)]
pub struct ModelRegistry {
    models: Vec<Model>,
    index: HashMap<String, usize>,
    source: ConfigSource,
}

impl ModelRegistry {
    /// Load the registry from `MODELS_JSON_PATH`, the user models.json, or the
    /// embedded defaults, in that order
    pub async fn load() -> RegistryResult<Self> {
        let origin = source::resolve(MODELS_JSON_PATH, models_file()).await;
        let json = source::read(&origin, EMBEDDED_MODELS).await?;
        Self::from_json_str(&json, origin)
    }

    /// Load the registry from a specific file
    pub async fn load_from(path: impl AsRef<Path>) -> RegistryResult<Self> {
        let origin = ConfigSource::User(path.as_ref().to_path_buf());
        let json = source::read(&origin, EMBEDDED_MODELS).await?;
        Self::from_json_str(&json, origin)
    }

    /// Registry built from the defaults compiled into the binary
    pub fn embedded() -> RegistryResult<Self> {
        Self::from_json_str(EMBEDDED_MODELS, ConfigSource::Embedded)
    }

    /// Parse a models.json document
    pub fn from_json_str(json: &str, source: ConfigSource) -> RegistryResult<Self> {
        let entries: Map<String, Value> =
            serde_json::from_str(json).map_err(|e| RegistryError::Parse {
                origin: source.clone(),
                source: e,
            })?;

        let mut models = Vec::with_capacity(entries.len());
        let mut index = HashMap::with_capacity(entries.len());

        for (id, value) in entries {
            if !value.is_object() {
                return Err(RegistryError::InvalidEntry {
                    origin: source.clone(),
                    message: format!("model '{}' must be a JSON object", id),
                });
            }

            let mut model: Model =
                serde_json::from_value(value).map_err(|e| RegistryError::Parse {
                    origin: source.clone(),
                    source: e,
                })?;
            model.id = id.clone();

            index.insert(id, models.len());
            models.push(model);
        }

        if models.is_empty() {
            warn!("Model registry from {} is empty", source);
        }
        debug!("Loaded {} models from {}", models.len(), source);

        Ok(Self {
            models,
            index,
            source,
        })
    }

    /// Check if a model identifier is known
    pub fn contains(&self, model_id: &str) -> bool {
        self.index.contains_key(model_id)
    }

    /// Get a model by identifier
    pub fn get(&self, model_id: &str) -> Option<&Model> {
        self.index.get(model_id).map(|&i| &self.models[i])
    }

    /// All models in file order
    pub fn list(&self) -> &[Model] {
        &self.models
    }

    /// All model identifiers in file order
    pub fn model_names(&self) -> Vec<&str> {
        self.models.iter().map(|m| m.id.as_str()).collect()
    }

    /// First model in the file, used when nothing else selects one
    pub fn first(&self) -> Option<&Model> {
        self.models.first()
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    pub fn source(&self) -> &ConfigSource {
        &self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serial_test::serial;
    use std::env;

    #[test]
    fn test_embedded_registry_loads() {
        let registry = ModelRegistry::embedded().expect("embedded registry should parse");
        assert!(!registry.is_empty());
        assert!(registry.contains("gpt-4.1"));
        assert_eq!(registry.source(), &ConfigSource::Embedded);
    }

    #[test]
    fn test_preserves_file_order() {
        let json = r#"{"zeta": {}, "alpha": {}, "mid": {}}"#;
        let registry = ModelRegistry::from_json_str(json, ConfigSource::Embedded).unwrap();
        assert_eq!(registry.model_names(), vec!["zeta", "alpha", "mid"]);
        assert_eq!(registry.first().unwrap().id, "zeta");
    }

    #[test]
    fn test_known_fields_and_extra_settings() {
        let json = r#"{
            "local": {
                "type": "custom_openai",
                "name": "qwen",
                "context_length": 4096,
                "custom_endpoint": {"url": "http://localhost"}
            }
        }"#;
        let registry = ModelRegistry::from_json_str(json, ConfigSource::Embedded).unwrap();
        let model = registry.get("local").unwrap();

        assert_eq!(model.provider.as_deref(), Some("custom_openai"));
        assert_eq!(model.name.as_deref(), Some("qwen"));
        assert_eq!(model.context_length, Some(4096));
        assert!(model.settings.contains_key("custom_endpoint"));
        assert!(!model.settings.contains_key("type"));
    }

    #[test]
    fn test_rejects_non_object_entry() {
        let json = r#"{"broken": "gpt"}"#;
        let result = ModelRegistry::from_json_str(json, ConfigSource::Embedded);
        assert!(matches!(result, Err(RegistryError::InvalidEntry { .. })));
    }

    #[test]
    fn test_rejects_invalid_json() {
        let result = ModelRegistry::from_json_str("[1, 2", ConfigSource::Embedded);
        assert!(matches!(result, Err(RegistryError::Parse { .. })));
    }

    #[tokio::test]
    async fn test_load_from_missing_file() {
        let temp = tempfile::TempDir::new().unwrap();
        let result = ModelRegistry::load_from(temp.path().join("missing.json")).await;
        assert!(matches!(result, Err(RegistryError::Io { .. })));
    }

    #[tokio::test]
    #[serial]
    async fn test_load_reads_models_json_path() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("models.json");
        tokio::fs::write(&path, r#"{"gpt4": {}, "llama": {}}"#)
            .await
            .unwrap();

        env::set_var(MODELS_JSON_PATH, &path);
        let registry = ModelRegistry::load().await.unwrap();
        env::remove_var(MODELS_JSON_PATH);

        assert_eq!(registry.model_names(), vec!["gpt4", "llama"]);
        assert_eq!(registry.source(), &ConfigSource::Env(path));
    }
}
