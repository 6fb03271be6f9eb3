// ABOUTME: Input handling for the interactive shell and `modelpin exec`
// ABOUTME: Classifies prompt lines and works out which model ordinary text goes to

use tracing::warn;

use modelpin_pins::{
    extract_model_switch, parse_slash_command, CommandParseError, ModelSelection,
    ModelSwitchRequest, PinManager, SlashCommand,
};

use crate::error::{CliError, CliResult};

/// What a shell line asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellInput {
    Empty,
    Exit,
    Help,
    /// `/model <known>` at the start of the line, possibly followed by prompt text
    Switch(ModelSwitchRequest),
    Command(SlashCommand),
    Prompt(String),
}

pub fn classify_line(line: &str, model_names: &[String]) -> Result<ShellInput, CommandParseError> {
    let line = line.trim();
    match line {
        "" => return Ok(ShellInput::Empty),
        "exit" | "quit" | "/exit" | "/quit" => return Ok(ShellInput::Exit),
        "help" | "/help" => return Ok(ShellInput::Help),
        _ => {}
    }

    if let Some(request) = extract_model_switch(line, model_names) {
        return Ok(ShellInput::Switch(request));
    }

    Ok(match parse_slash_command(line)? {
        Some(command) => ShellInput::Command(command),
        None => ShellInput::Prompt(line.to_string()),
    })
}

/// Parse the argument of `modelpin exec`, which must be a slash command
pub fn parse_exec_line(line: &str) -> CliResult<SlashCommand> {
    parse_slash_command(line)?.ok_or_else(|| CliError::NotACommand(line.to_string()))
}

/// Where ordinary prompt text would be sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptRoute {
    pub agent: Option<String>,
    pub model: String,
    pub selection: ModelSelection,
    /// Pin that was ignored because its model left the registry
    pub skipped_stale_pin: Option<String>,
}

pub async fn route_prompt(manager: &PinManager) -> CliResult<PromptRoute> {
    let Some(agent) = manager.current_agent().await? else {
        let registry = manager.models().await?;
        let active = manager
            .active_model()
            .await?
            .filter(|model| registry.contains(model));

        return match active {
            Some(model) => Ok(PromptRoute {
                agent: None,
                model,
                selection: ModelSelection::Active,
                skipped_stale_pin: None,
            }),
            None => {
                let first = registry.first().ok_or(CliError::NoModels)?;
                Ok(PromptRoute {
                    agent: None,
                    model: first.id.clone(),
                    selection: ModelSelection::RegistryDefault,
                    skipped_stale_pin: None,
                })
            }
        };
    };

    let skipped_stale_pin = manager.validate_pinned_model(&agent).await?;
    if let Some(stale) = &skipped_stale_pin {
        warn!("Routing around stale pin '{}' for '{}'", stale, agent);
    }

    let effective = manager
        .effective_model(&agent)
        .await?
        .ok_or(CliError::NoModels)?;

    Ok(PromptRoute {
        agent: Some(agent),
        model: effective.model,
        selection: effective.selection,
        skipped_stale_pin,
    })
}
