use colored::*;
use inquire::Select;

use modelpin_cli::render::selection_label;
use modelpin_pins::{PinChange, PinManager, PinResolution, SwitchOutcome, SwitchPlan};

pub async fn show_model(
    manager: &PinManager,
    agent: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let active = manager.active_model().await?;
    let agent = match agent {
        Some(agent) => Some(agent),
        None => manager.current_agent().await?,
    };

    match &active {
        Some(model) => println!("{} {}", "Active model:".bold(), model.cyan()),
        None => println!("{} {}", "Active model:".bold(), "not set".dimmed()),
    }

    if let Some(agent) = agent {
        if let Some(effective) = manager.effective_model(&agent).await? {
            println!(
                "{} {} ({})",
                format!("Model for '{}':", agent).bold(),
                effective.model.cyan(),
                selection_label(effective.selection)
            );
        }
        if let Some(stale) = manager.validate_pinned_model(&agent).await? {
            println!(
                "{}",
                format!(
                    "⚠️  '{}' is pinned to '{}', which is missing from models.json",
                    agent, stale
                )
                .yellow()
            );
        }
    }
    Ok(())
}

/// Switch the active model, settling any conflicting pin on the agent
///
/// Without `resolve`, a conflict is settled by asking the user.
pub async fn switch_model(
    manager: &PinManager,
    model: &str,
    agent: Option<String>,
    resolve: Option<PinResolution>,
) -> Result<(), Box<dyn std::error::Error>> {
    let agent = match agent {
        Some(agent) => Some(agent),
        None => manager.current_agent().await?,
    };

    let (resolution, pinned) = match manager.plan_model_switch(agent.as_deref(), model).await? {
        SwitchPlan::Proceed => (PinResolution::KeepPin, None),
        SwitchPlan::Conflict { agent, pinned } => {
            let resolution = match resolve {
                Some(resolution) => resolution,
                None => prompt_resolution(&agent, &pinned, model)?,
            };
            (resolution, Some(pinned))
        }
    };

    let outcome = manager
        .apply_model_switch(agent.as_deref(), model, resolution)
        .await?;
    print_outcome(&outcome, agent.as_deref(), pinned.as_deref(), model);
    Ok(())
}

fn prompt_resolution(
    agent: &str,
    pinned: &str,
    requested: &str,
) -> Result<PinResolution, Box<dyn std::error::Error>> {
    println!(
        "{}",
        format!("⚠️  Agent '{}' is pinned to '{}'", agent, pinned).yellow()
    );
    println!(
        "{}",
        format!("   Switching to '{}' would not take effect for this agent.", requested).dimmed()
    );
    println!();

    let resolution = Select::new("How should the pin be handled?", PinResolution::ALL.to_vec())
        .with_starting_cursor(0)
        .prompt()?;
    Ok(resolution)
}

fn print_outcome(
    outcome: &SwitchOutcome,
    agent: Option<&str>,
    conflicting_pin: Option<&str>,
    requested: &str,
) {
    match outcome {
        SwitchOutcome::Cancelled => {
            println!("{} Cancelled model change to '{}'", "❌".red(), requested);
        }
        SwitchOutcome::Switched { model, pin } => match (pin, agent, conflicting_pin) {
            (PinChange::Updated { .. }, Some(agent), _) => println!(
                "{} Switching to '{}' and updating pin for '{}'",
                "✅".green(),
                model.bold(),
                agent.cyan()
            ),
            (PinChange::Removed { .. }, Some(agent), _) => println!(
                "{} Switching to '{}' and unpinning from '{}'",
                "✅".green(),
                model.bold(),
                agent.cyan()
            ),
            (PinChange::Unchanged, Some(agent), Some(pinned)) => println!(
                "{} Switching to '{}' (pin for '{}' remains '{}')",
                "✅".green(),
                model.bold(),
                agent.cyan(),
                pinned
            ),
            _ => println!("{} Switching to '{}'", "✅".green(), model.bold()),
        },
    }
}
