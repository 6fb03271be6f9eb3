// ABOUTME: Type definitions for models and agents
// ABOUTME: Structures that mirror the models.json and agents.json files

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One entry of models.json, keyed in the file by its identifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Model {
    /// Registry key, the identifier pins refer to
    #[serde(skip)]
    pub id: String,
    /// Provider type (openai, anthropic, custom_openai, ...)
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    /// Provider-side model name, which may differ from the registry key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_length: Option<u64>,
    /// Remaining provider settings, kept as-is
    #[serde(flatten)]
    pub settings: Map<String, Value>,
}

/// Agent definition from agents.json
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Agent {
    /// Name to show in tables, preferring the display name
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.name)
    }
}

/// Container for the agents JSON file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentsConfig {
    pub version: String,
    pub agents: Vec<Agent>,
}
