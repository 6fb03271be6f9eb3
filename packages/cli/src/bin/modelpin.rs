use clap::{Parser, Subcommand};
use colored::*;
use std::process;
use std::sync::Arc;
use tracing::debug;

mod cli;

use cli::pins::PinsArgs;
use modelpin_cli::config::Config;
use modelpin_cli::logging::init_tracing;
use modelpin_pins::{FileCatalogs, PinManager, PinResolution};
use modelpin_storage::JsonPinStore;

#[derive(Parser)]
#[command(name = "modelpin")]
#[command(about = "Pin agents to specific models and keep those pins valid")]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List pins, show one agent's pin, or clear every pin
    Pins(PinsArgs),
    /// Pin an agent to a model
    Pin {
        /// Agent name
        agent: String,
        /// Model identifier from models.json
        model: String,
    },
    /// Remove an agent's pin
    Unpin {
        /// Agent name
        agent: String,
    },
    /// Pin every agent to the same model
    PinAll {
        /// Model identifier from models.json
        model: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Remove every pin
    UnpinAll {
        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Copy one agent's pin to another agent
    CopyPin {
        /// Agent to copy the pin from
        from: String,
        /// Agent to copy the pin to
        to: String,
    },
    /// Check pins against the model registry
    Validate {
        /// Only check this agent
        agent: Option<String>,
        /// Unpin every stale pin
        #[arg(long)]
        fix: bool,
        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show or switch the active model
    Model {
        /// Model to switch to
        name: Option<String>,
        /// Agent whose pin is checked (defaults to the current agent)
        #[arg(long)]
        agent: Option<String>,
        /// Settle a pin conflict without prompting: keep, update, unpin or cancel
        #[arg(long)]
        resolve: Option<PinResolution>,
    },
    /// Show or set the current agent
    Agent {
        /// Agent to make current
        name: Option<String>,
    },
    /// List models from the registry
    Models {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// List known agents and their pins
    Agents,
    /// Interactive prompt accepting slash commands
    Shell,
    /// Run a single slash command, e.g. `modelpin exec /pins --json`
    Exec {
        /// Skip confirmation prompts
        #[arg(short, long)]
        yes: bool,
        /// The command line
        #[arg(trailing_var_arg = true, allow_hyphen_values = true, required = true)]
        line: Vec<String>,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            process::exit(1);
        }
    };
    init_tracing(config.log_level.raised(cli.verbose));
    debug!("Using modelpin home {:?}", config.home);

    let manager = PinManager::new(
        Arc::new(JsonPinStore::new(config.pins_path.clone())),
        Arc::new(FileCatalogs::new(
            config.models_path.clone(),
            config.agents_path.clone(),
        )),
    );

    if let Err(e) = handle_command(&manager, cli.command).await {
        eprintln!("{} {}", "Error:".red().bold(), e);
        process::exit(1);
    }
}

async fn handle_command(
    manager: &PinManager,
    command: Commands,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Pins(args) => cli::pins::handle_pins_command(manager, args).await,
        Commands::Pin { agent, model } => cli::pins::pin(manager, &agent, &model).await,
        Commands::Unpin { agent } => cli::pins::unpin(manager, &agent).await,
        Commands::PinAll { model, yes } => cli::pins::pin_all(manager, &model, yes).await,
        Commands::UnpinAll { yes } => cli::pins::unpin_all(manager, yes).await,
        Commands::CopyPin { from, to } => cli::pins::copy_pin(manager, &from, &to).await,
        Commands::Validate { agent, fix, json } => {
            cli::pins::validate(manager, agent.as_deref(), fix, json).await
        }
        Commands::Model {
            name: Some(name),
            agent,
            resolve,
        } => cli::model::switch_model(manager, &name, agent, resolve).await,
        Commands::Model { name: None, agent, .. } => {
            cli::model::show_model(manager, agent).await
        }
        Commands::Agent { name: Some(name) } => {
            cli::catalog::set_current_agent(manager, &name).await
        }
        Commands::Agent { name: None } => cli::catalog::show_current_agent(manager).await,
        Commands::Models { json } => cli::catalog::list_models(manager, json).await,
        Commands::Agents => cli::catalog::list_agents(manager).await,
        Commands::Shell => cli::shell::run_shell(manager).await,
        Commands::Exec { yes, line } => {
            cli::shell::exec_line(manager, &line.join(" "), yes).await
        }
    }
}
