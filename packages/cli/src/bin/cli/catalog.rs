use colored::*;
use serde_json::{Map, Value};

use modelpin_cli::render::{agents_table, models_table};
use modelpin_pins::PinManager;

pub async fn list_models(manager: &PinManager, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let registry = manager.models().await?;

    if json {
        let mut document = Map::new();
        for model in registry.list() {
            document.insert(model.id.clone(), serde_json::to_value(model)?);
        }
        println!("{}", serde_json::to_string_pretty(&Value::Object(document))?);
        return Ok(());
    }

    if registry.is_empty() {
        println!("{}", "No models configured".yellow());
        println!("{} {}", "Source:".dimmed(), registry.source());
        return Ok(());
    }

    let active = manager.active_model().await?;
    let pins = manager.list_pins().await?;

    println!("{}", "🧠 Models".blue().bold());
    println!();
    println!("{}", models_table(&registry, active.as_deref(), &pins));
    println!();
    println!("{} {}", "Total models:".dimmed(), registry.len());
    println!("{} {}", "Source:".dimmed(), registry.source());
    Ok(())
}

pub async fn list_agents(manager: &PinManager) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = manager.agents().await?;
    let pins = manager.list_pins().await?;
    let current = manager.current_agent().await?;

    println!("{}", "🤖 Agents".blue().bold());
    println!();
    println!("{}", agents_table(&catalog, &pins, current.as_deref()));
    println!();
    println!("{} {}", "Source:".dimmed(), catalog.source());
    Ok(())
}

pub async fn show_current_agent(manager: &PinManager) -> Result<(), Box<dyn std::error::Error>> {
    match manager.current_agent().await? {
        Some(agent) => {
            println!("{} {}", "Current agent:".bold(), agent.cyan());
            if let Some(model) = manager.get_pin(&agent).await? {
                println!("{} {}", "Pinned model:".bold(), model);
            }
        }
        None => {
            println!("{} {}", "Current agent:".bold(), "not set".dimmed());
            println!("{}", "Use 'modelpin agent <name>' to choose one".dimmed());
        }
    }
    Ok(())
}

pub async fn set_current_agent(
    manager: &PinManager,
    agent: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    manager.set_current_agent(agent).await?;
    println!("{} Current agent is now '{}'", "✅".green(), agent.cyan());

    if let Some(stale) = manager.validate_pinned_model(agent).await? {
        println!(
            "{}",
            format!(
                "⚠️  '{}' is pinned to '{}', which is missing from models.json",
                agent, stale
            )
            .yellow()
        );
    }
    Ok(())
}
