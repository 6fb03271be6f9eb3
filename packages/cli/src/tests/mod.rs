mod config_tests;
mod render_tests;
mod validate_tests;

use std::sync::Arc;

use modelpin_models::{AgentCatalog, ConfigSource, ModelRegistry};
use modelpin_pins::{PinManager, StaticCatalogs};
use modelpin_storage::{MemoryPinStore, PinState};

const TEST_MODELS: &str = r#"{"gpt-4.1": {}, "o3": {}, "claude-sonnet-4": {}}"#;
const TEST_AGENTS: &str = r#"{
    "version": "1.0.0",
    "agents": [{"name": "coder"}, {"name": "planner"}, {"name": "reviewer"}]
}"#;

/// Manager over in-memory pins and a fixed three-model, three-agent catalog
pub(crate) fn test_manager(state: PinState) -> PinManager {
    let models = ModelRegistry::from_json_str(TEST_MODELS, ConfigSource::Embedded).unwrap();
    let agents = AgentCatalog::from_json_str(TEST_AGENTS, ConfigSource::Embedded).unwrap();
    PinManager::new(
        Arc::new(MemoryPinStore::with_state(state)),
        Arc::new(StaticCatalogs::new(models, agents)),
    )
}

pub(crate) fn state_with_pins(pins: &[(&str, &str)]) -> PinState {
    let mut state = PinState::default();
    for (agent, model) in pins {
        state.set_pin(agent, model);
    }
    state
}
