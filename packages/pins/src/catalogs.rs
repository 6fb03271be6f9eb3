// ABOUTME: Sources for the model registry and agent catalog
// ABOUTME: File-backed loading for real use, fixed instances for embedding and tests

use async_trait::async_trait;
use std::path::PathBuf;

use modelpin_models::{AgentCatalog, ModelRegistry, RegistryResult};

/// Provides fresh registry and catalog snapshots on every call
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn models(&self) -> RegistryResult<ModelRegistry>;
    async fn agents(&self) -> RegistryResult<AgentCatalog>;
}

/// Re-reads models.json and agents.json each time
///
/// Explicit paths win; otherwise the usual env/user/embedded resolution applies.
#[derive(Debug, Default, Clone)]
pub struct FileCatalogs {
    models_path: Option<PathBuf>,
    agents_path: Option<PathBuf>,
}

impl FileCatalogs {
    pub fn new(models_path: Option<PathBuf>, agents_path: Option<PathBuf>) -> Self {
        Self {
            models_path,
            agents_path,
        }
    }
}

#[async_trait]
impl CatalogSource for FileCatalogs {
    async fn models(&self) -> RegistryResult<ModelRegistry> {
        match &self.models_path {
            Some(path) => ModelRegistry::load_from(path).await,
            None => ModelRegistry::load().await,
        }
    }

    async fn agents(&self) -> RegistryResult<AgentCatalog> {
        match &self.agents_path {
            Some(path) => AgentCatalog::load_from(path).await,
            None => AgentCatalog::load().await,
        }
    }
}

/// Hands out clones of registries built up front
#[derive(Debug, Clone)]
pub struct StaticCatalogs {
    models: ModelRegistry,
    agents: AgentCatalog,
}

impl StaticCatalogs {
    pub fn new(models: ModelRegistry, agents: AgentCatalog) -> Self {
        Self { models, agents }
    }

    /// The registries compiled into the binary
    pub fn embedded() -> RegistryResult<Self> {
        Ok(Self::new(
            ModelRegistry::embedded()?,
            AgentCatalog::embedded()?,
        ))
    }
}

#[async_trait]
impl CatalogSource for StaticCatalogs {
    async fn models(&self) -> RegistryResult<ModelRegistry> {
        Ok(self.models.clone())
    }

    async fn agents(&self) -> RegistryResult<AgentCatalog> {
        Ok(self.agents.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_file_catalogs_use_explicit_paths() {
        let dir = TempDir::new().unwrap();
        let models_path = dir.path().join("models.json");
        let agents_path = dir.path().join("agents.json");
        tokio::fs::write(&models_path, r#"{"local-llama": {"type": "ollama"}}"#)
            .await
            .unwrap();
        tokio::fs::write(
            &agents_path,
            r#"{"version": "1.0.0", "agents": [{"name": "solo"}]}"#,
        )
        .await
        .unwrap();

        let catalogs = FileCatalogs::new(Some(models_path), Some(agents_path));

        let models = catalogs.models().await.unwrap();
        assert_eq!(models.model_names(), vec!["local-llama"]);
        let agents = catalogs.agents().await.unwrap();
        assert_eq!(agents.names(), vec!["solo"]);
    }
}
