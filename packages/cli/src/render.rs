// ABOUTME: Output rendering for the CLI
// ABOUTME: Tables for terminals and JSON documents for scripts

use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};
use serde::Serialize;

use modelpin_core::{format_timestamp, truncate};
use modelpin_models::{AgentCatalog, ModelRegistry};
use modelpin_pins::{EffectiveModel, ModelSelection, PinEntry, PinEntryStatus, PinStatus};

const NONE_MARK: &str = "—";

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn status_cell(status: PinEntryStatus) -> Cell {
    let color = match status {
        PinEntryStatus::Valid => Color::Green,
        PinEntryStatus::Stale => Color::Red,
        PinEntryStatus::Orphaned => Color::Yellow,
    };
    Cell::new(status.as_str()).fg(color)
}

/// Table of every pin
pub fn pins_table(entries: &[PinEntry]) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Agent", "Pinned Model", "Status", "Pinned At"]);

    for entry in entries {
        table.add_row(vec![
            Cell::new(&entry.agent),
            Cell::new(truncate(&entry.model, 40)),
            status_cell(entry.status),
            Cell::new(format_timestamp(&entry.pinned_at)),
        ]);
    }
    table
}

/// Pins as a JSON array
pub fn pins_json(entries: &[PinEntry]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(entries)
}

pub fn selection_label(selection: ModelSelection) -> &'static str {
    match selection {
        ModelSelection::Pinned => "pinned",
        ModelSelection::Active => "active model",
        ModelSelection::RegistryDefault => "registry default",
    }
}

#[derive(Serialize)]
struct PinDetail<'a> {
    agent: &'a str,
    pin: &'a PinStatus,
    effective: Option<&'a EffectiveModel>,
}

/// One agent's pin as JSON
pub fn pin_detail_json(
    agent: &str,
    status: &PinStatus,
    effective: Option<&EffectiveModel>,
) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&PinDetail {
        agent,
        pin: status,
        effective,
    })
}

/// One agent's pin as a two-column table
pub fn pin_detail_table(
    agent: &str,
    display_name: &str,
    status: &PinStatus,
    effective: Option<&EffectiveModel>,
) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Field", "Value"]);

    table.add_row(vec![Cell::new("Agent"), Cell::new(agent)]);
    table.add_row(vec![Cell::new("Name"), Cell::new(display_name)]);

    let (pin_text, status_text, color) = match status {
        PinStatus::Unpinned => (NONE_MARK.to_string(), "unpinned", Color::Reset),
        PinStatus::Valid(model) => (model.clone(), "valid", Color::Green),
        PinStatus::Stale(model) => (model.clone(), "stale", Color::Red),
    };
    table.add_row(vec![Cell::new("Pinned Model"), Cell::new(pin_text)]);
    table.add_row(vec![Cell::new("Status"), Cell::new(status_text).fg(color)]);

    let effective_text = match effective {
        Some(e) => format!("{} ({})", e.model, selection_label(e.selection)),
        None => NONE_MARK.to_string(),
    };
    table.add_row(vec![Cell::new("Effective Model"), Cell::new(effective_text)]);
    table
}

/// Registry listing with markers for the active model and pinned models
pub fn models_table(registry: &ModelRegistry, active: Option<&str>, pins: &[PinEntry]) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Model", "Type", "Context", "Active", "Pinned By"]);

    for model in registry.list() {
        let pinned_by: Vec<&str> = pins
            .iter()
            .filter(|p| p.model == model.id)
            .map(|p| p.agent.as_str())
            .collect();

        table.add_row(vec![
            Cell::new(&model.id),
            Cell::new(model.provider.as_deref().unwrap_or(NONE_MARK)),
            Cell::new(
                model
                    .context_length
                    .map(|c| c.to_string())
                    .unwrap_or_else(|| NONE_MARK.to_string()),
            ),
            Cell::new(if active == Some(model.id.as_str()) { "●" } else { "" }),
            Cell::new(if pinned_by.is_empty() {
                String::new()
            } else {
                pinned_by.join(", ")
            }),
        ]);
    }
    table
}

/// Agent listing with their pins
pub fn agents_table(catalog: &AgentCatalog, pins: &[PinEntry], current: Option<&str>) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Agent", "Name", "Description", "Pinned Model", "Current"]);

    for agent in catalog.list() {
        let pin = pins.iter().find(|p| p.agent == agent.name);
        let pin_cell = match pin {
            Some(p) if p.status == PinEntryStatus::Stale => {
                Cell::new(format!("{} (stale)", p.model)).fg(Color::Red)
            }
            Some(p) => Cell::new(&p.model),
            None => Cell::new(NONE_MARK),
        };

        table.add_row(vec![
            Cell::new(&agent.name),
            Cell::new(agent.label()),
            Cell::new(truncate(agent.description.as_deref().unwrap_or(""), 40)),
            pin_cell,
            Cell::new(if current == Some(agent.name.as_str()) { "●" } else { "" }),
        ]);
    }
    table
}
