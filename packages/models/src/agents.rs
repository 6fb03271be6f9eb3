// ABOUTME: Agent catalog loaded from agents.json
// ABOUTME: The set of agent names that pins may be attached to

use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

use modelpin_config::constants::MODELPIN_AGENTS_PATH;
use modelpin_core::agents_file;

use crate::source::{self, ConfigSource};
use crate::types::{Agent, AgentsConfig};
use crate::{RegistryError, RegistryResult};

const EMBEDDED_AGENTS: &str = include_str!("../config/agents.json");

#[derive(Debug, Clone)]
pub struct AgentCatalog {
    agents: Vec<Agent>,
    index: HashMap<String, usize>,
    source: ConfigSource,
}

impl AgentCatalog {
    /// Load agents from `MODELPIN_AGENTS_PATH`, the user agents.json, or the
    /// embedded defaults
    pub async fn load() -> RegistryResult<Self> {
        let origin = source::resolve(MODELPIN_AGENTS_PATH, agents_file()).await;
        let json = source::read(&origin, EMBEDDED_AGENTS).await?;
        Self::from_json_str(&json, origin)
    }

    pub async fn load_from(path: impl AsRef<Path>) -> RegistryResult<Self> {
        let origin = ConfigSource::User(path.as_ref().to_path_buf());
        let json = source::read(&origin, EMBEDDED_AGENTS).await?;
        Self::from_json_str(&json, origin)
    }

    pub fn embedded() -> RegistryResult<Self> {
        Self::from_json_str(EMBEDDED_AGENTS, ConfigSource::Embedded)
    }

    pub fn from_json_str(json: &str, source: ConfigSource) -> RegistryResult<Self> {
        let config: AgentsConfig =
            serde_json::from_str(json).map_err(|e| RegistryError::Parse {
                origin: source.clone(),
                source: e,
            })?;

        let mut index = HashMap::with_capacity(config.agents.len());
        for (i, agent) in config.agents.iter().enumerate() {
            if let Err(e) = modelpin_core::validate_agent_name(&agent.name) {
                return Err(RegistryError::InvalidEntry {
                    origin: source,
                    message: e.to_string(),
                });
            }
            if index.insert(agent.name.clone(), i).is_some() {
                return Err(RegistryError::InvalidEntry {
                    origin: source,
                    message: format!("duplicate agent '{}'", agent.name),
                });
            }
        }

        debug!(
            "Loaded {} agents (catalog version {}) from {}",
            config.agents.len(),
            config.version,
            source
        );

        Ok(Self {
            agents: config.agents,
            index,
            source,
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&Agent> {
        self.index.get(name).map(|&i| &self.agents[i])
    }

    /// Agents in catalog order
    pub fn list(&self) -> &[Agent] {
        &self.agents
    }

    pub fn names(&self) -> Vec<&str> {
        self.agents.iter().map(|a| a.name.as_str()).collect()
    }

    pub fn source(&self) -> &ConfigSource {
        &self.source
    }
}
