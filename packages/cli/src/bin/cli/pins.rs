use clap::Args;
use colored::*;
use inquire::Confirm;

use modelpin_cli::render::{pin_detail_json, pin_detail_table, pins_json, pins_table};
use modelpin_cli::validate::{validate_agent_pin, validate_pins};
use modelpin_pins::{PinEntryStatus, PinManager, PinStatus};

#[derive(Args)]
pub struct PinsArgs {
    /// Show the pin for a single agent
    pub agent: Option<String>,
    /// Print as JSON
    #[arg(long, conflicts_with = "clear_all")]
    pub json: bool,
    /// Remove every pin
    #[arg(long, conflicts_with = "agent")]
    pub clear_all: bool,
    /// Skip confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

pub async fn handle_pins_command(
    manager: &PinManager,
    args: PinsArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    if args.clear_all {
        return unpin_all(manager, args.yes).await;
    }
    match args.agent {
        Some(agent) => show_pin(manager, &agent, args.json).await,
        None => list_pins(manager, args.json).await,
    }
}

pub async fn list_pins(manager: &PinManager, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let entries = manager.list_pins().await?;

    if json {
        println!("{}", pins_json(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("{}", "No agents are pinned".yellow());
        println!("{}", "Use 'modelpin pin <agent> <model>' to pin one".dimmed());
        return Ok(());
    }

    println!("{}", "📌 Model Pins".blue().bold());
    println!();
    println!("{}", pins_table(&entries));

    let stale = entries
        .iter()
        .filter(|e| e.status == PinEntryStatus::Stale)
        .count();
    let orphaned = entries
        .iter()
        .filter(|e| e.status == PinEntryStatus::Orphaned)
        .count();

    println!();
    println!("{} {}", "Total pins:".dimmed(), entries.len());
    println!("{} {}", "Pins file:".dimmed(), manager.storage_location());
    if stale > 0 {
        println!(
            "{}",
            format!(
                "⚠️  {} pin(s) point at models missing from models.json. Run 'modelpin validate --fix'",
                stale
            )
            .yellow()
        );
    }
    if orphaned > 0 {
        println!(
            "{}",
            format!(
                "⚠️  {} pin(s) belong to agents that no longer exist. Run 'modelpin unpin <agent>' to remove one",
                orphaned
            )
            .yellow()
        );
    }
    Ok(())
}

pub async fn show_pin(
    manager: &PinManager,
    agent: &str,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let status = manager.pin_status(agent).await?;
    let effective = manager.effective_model(agent).await?;

    if json {
        println!("{}", pin_detail_json(agent, &status, effective.as_ref())?);
        return Ok(());
    }

    let catalog = manager.agents().await?;
    let display_name = catalog.get(agent).map(|a| a.label()).unwrap_or(agent);

    println!("{}", format!("📌 Pin for '{}'", agent).blue().bold());
    println!();
    println!(
        "{}",
        pin_detail_table(agent, display_name, &status, effective.as_ref())
    );

    if let PinStatus::Stale(model) = &status {
        println!();
        println!(
            "{}",
            format!(
                "⚠️  Pinned model '{}' is no longer in models.json. Run 'modelpin unpin {}' or pin another model",
                model, agent
            )
            .yellow()
        );
    }
    Ok(())
}

pub async fn pin(
    manager: &PinManager,
    agent: &str,
    model: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let previous = manager.pin(agent, model).await?;

    match previous {
        Some(previous) if previous != model => println!(
            "{} Pinned '{}' to '{}' (was '{}')",
            "✅".green(),
            agent.cyan(),
            model.bold(),
            previous
        ),
        _ => println!("{} Pinned '{}' to '{}'", "✅".green(), agent.cyan(), model.bold()),
    }
    Ok(())
}

pub async fn unpin(manager: &PinManager, agent: &str) -> Result<(), Box<dyn std::error::Error>> {
    match manager.unpin(agent).await? {
        Some(previous) => println!(
            "{} Unpinned '{}' (was '{}')",
            "✅".green(),
            agent.cyan(),
            previous
        ),
        None => println!("{}", format!("'{}' was not pinned", agent).yellow()),
    }
    Ok(())
}

pub async fn pin_all(
    manager: &PinManager,
    model: &str,
    yes: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let agent_count = manager.agents().await?.list().len();

    if !yes {
        let confirm = Confirm::new(&format!(
            "Pin all {} agents to '{}'? Existing pins will be replaced.",
            agent_count, model
        ))
        .with_default(false)
        .prompt()?;

        if !confirm {
            println!("{}", "Cancelled".yellow());
            return Ok(());
        }
    }

    let count = manager.pin_all(model).await?;
    println!(
        "{} Pinned {} agent(s) to '{}'",
        "✅".green(),
        count,
        model.bold()
    );
    Ok(())
}

pub async fn unpin_all(manager: &PinManager, yes: bool) -> Result<(), Box<dyn std::error::Error>> {
    let entries = manager.list_pins().await?;
    if entries.is_empty() {
        println!("{}", "No agents are pinned".yellow());
        return Ok(());
    }

    if !yes {
        let confirm = Confirm::new(&format!("Remove all {} pin(s)?", entries.len()))
            .with_default(false)
            .prompt()?;

        if !confirm {
            println!("{}", "Cancelled".yellow());
            return Ok(());
        }
    }

    let count = manager.unpin_all().await?;
    println!("{} Removed {} pin(s)", "✅".green(), count);
    Ok(())
}

pub async fn copy_pin(
    manager: &PinManager,
    from: &str,
    to: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let model = manager.copy_pin(from, to).await?;
    println!(
        "{} Copied pin '{}' from '{}' to '{}'",
        "✅".green(),
        model.bold(),
        from.cyan(),
        to.cyan()
    );
    Ok(())
}

pub async fn validate(
    manager: &PinManager,
    agent: Option<&str>,
    fix: bool,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(agent) = agent {
        return validate_agent(manager, agent, fix, json).await;
    }

    let report = validate_pins(manager, fix).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report.stale)?);
    } else {
        for pin in &report.removed {
            println!(
                "{} Unpinned '{}' from missing model '{}'",
                "🔧".yellow(),
                pin.agent.cyan(),
                pin.model
            );
        }
        if report.stale.is_empty() {
            println!("{} All pins are valid", "✅".green());
        }
        for pin in &report.stale {
            println!(
                "{} '{}' is pinned to missing model '{}'",
                "⚠️ ".yellow(),
                pin.agent.cyan(),
                pin.model
            );
        }
    }

    Ok(report.ensure_clean()?)
}

async fn validate_agent(
    manager: &PinManager,
    agent: &str,
    fix: bool,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let result = validate_agent_pin(manager, agent, fix).await?;

    if json {
        println!("{}", pin_detail_json(agent, &result.status, None)?);
    } else {
        if let Some(model) = &result.removed {
            println!(
                "{} Unpinned '{}' from missing model '{}'",
                "🔧".yellow(),
                agent.cyan(),
                model
            );
        }
        match &result.status {
            PinStatus::Unpinned => println!("{}", format!("'{}' is not pinned", agent).dimmed()),
            PinStatus::Valid(model) => println!(
                "{} '{}' is pinned to '{}'",
                "✅".green(),
                agent.cyan(),
                model
            ),
            PinStatus::Stale(model) => println!(
                "{} '{}' is pinned to missing model '{}'",
                "⚠️ ".yellow(),
                agent.cyan(),
                model
            ),
        }
    }

    Ok(result.ensure_clean()?)
}
