use chrono::Utc;
use modelpin_models::{AgentCatalog, ConfigSource, ModelRegistry};
use modelpin_pins::{EffectiveModel, ModelSelection, PinEntry, PinEntryStatus, PinStatus};
use pretty_assertions::assert_eq;

use crate::render::{
    agents_table, models_table, pin_detail_json, pin_detail_table, pins_json, pins_table,
};

fn entry(agent: &str, model: &str, status: PinEntryStatus) -> PinEntry {
    PinEntry {
        agent: agent.to_string(),
        model: model.to_string(),
        status,
        pinned_at: Utc::now(),
    }
}

fn sample_entries() -> Vec<PinEntry> {
    vec![
        entry("coder", "o3", PinEntryStatus::Valid),
        entry("planner", "retired-model", PinEntryStatus::Stale),
    ]
}

#[test]
fn test_pins_table_lists_every_pin() {
    let rendered = pins_table(&sample_entries()).to_string();

    assert!(rendered.contains("Pinned Model"));
    assert!(rendered.contains("coder"));
    assert!(rendered.contains("retired-model"));
    assert!(rendered.contains("stale"));
}

#[test]
fn test_pins_json_shape() {
    let json = pins_json(&sample_entries()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    let items = value.as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["agent"], "coder");
    assert_eq!(items[0]["model"], "o3");
    assert_eq!(items[0]["status"], "valid");
    assert_eq!(items[1]["status"], "stale");
    assert!(items[1]["pinned_at"].is_string());
}

#[test]
fn test_pin_detail_json() {
    let effective = EffectiveModel {
        model: "gpt-4.1".to_string(),
        selection: ModelSelection::Active,
    };
    let json = pin_detail_json("planner", &PinStatus::Unpinned, Some(&effective)).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["agent"], "planner");
    assert_eq!(value["pin"]["status"], "unpinned");
    assert_eq!(value["effective"]["model"], "gpt-4.1");
    assert_eq!(value["effective"]["selection"], "active");
}

#[test]
fn test_pin_detail_table() {
    let status = PinStatus::Stale("retired-model".to_string());
    let rendered = pin_detail_table("planner", "Planner", &status, None).to_string();

    assert!(rendered.contains("retired-model"));
    assert!(rendered.contains("stale"));
    assert!(rendered.contains("Effective Model"));
}

#[test]
fn test_models_table_marks_pins() {
    let registry = ModelRegistry::from_json_str(
        r#"{"o3": {"type": "openai", "context_length": 200000}, "gpt-4.1": {}}"#,
        ConfigSource::Embedded,
    )
    .unwrap();
    let rendered = models_table(&registry, Some("gpt-4.1"), &sample_entries()).to_string();

    assert!(rendered.contains("openai"));
    assert!(rendered.contains("200000"));
    assert!(rendered.contains("coder"));
}

#[test]
fn test_agents_table_flags_stale_pin() {
    let catalog = AgentCatalog::from_json_str(
        r#"{"version": "1", "agents": [{"name": "coder"}, {"name": "planner"}]}"#,
        ConfigSource::Embedded,
    )
    .unwrap();
    let rendered = agents_table(&catalog, &sample_entries(), Some("coder")).to_string();

    assert!(rendered.contains("retired-model (stale)"));
    assert!(rendered.contains("●"));
}
