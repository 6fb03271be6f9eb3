// ABOUTME: Slash-command parsing for the pin commands
// ABOUTME: Turns prompt lines like "/pins --json" or "/m o3" into typed commands

use thiserror::Error;

/// A recognised slash command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlashCommand {
    /// `/pins` and `/pins --json`
    ListPins { json: bool },
    /// `/pins <agent>`
    ShowPin { agent: String, json: bool },
    /// `/pins --clear-all`
    ClearAllPins,
    /// `/pin <agent> <model>`
    Pin { agent: String, model: String },
    /// `/unpin <agent>`
    Unpin { agent: String },
    /// `/pin-all <model>`
    PinAll { model: String },
    /// `/unpin-all`
    UnpinAll,
    /// `/copy-pin <from> <to>`
    CopyPin { from: String, to: String },
    /// `/model <name>` or `/m <name>`
    SwitchModel { model: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandParseError {
    #[error("Unknown command: {0}")]
    UnknownCommand(String),
    #[error("Unknown option '{option}'. Usage: {usage}")]
    UnknownOption { option: String, usage: &'static str },
    #[error("Wrong number of arguments. Usage: {0}")]
    WrongArguments(&'static str),
}

const PINS_USAGE: &str = "/pins [<agent>] [--json] | /pins --clear-all";
const PIN_USAGE: &str = "/pin <agent> <model>";
const UNPIN_USAGE: &str = "/unpin <agent>";
const PIN_ALL_USAGE: &str = "/pin-all <model>";
const UNPIN_ALL_USAGE: &str = "/unpin-all";
const COPY_PIN_USAGE: &str = "/copy-pin <from-agent> <to-agent>";
const MODEL_USAGE: &str = "/model <name>";

/// Parse one prompt line
///
/// Returns `Ok(None)` for lines that are not slash commands, so they can be
/// passed on as ordinary input.
pub fn parse_slash_command(line: &str) -> Result<Option<SlashCommand>, CommandParseError> {
    let mut tokens = line.split_whitespace();
    let Some(head) = tokens.next() else {
        return Ok(None);
    };
    if !head.starts_with('/') {
        return Ok(None);
    }
    let args: Vec<&str> = tokens.collect();

    let command = match head {
        "/pins" => parse_pins(&args)?,
        "/pin" => match args.as_slice() {
            [agent, model] => SlashCommand::Pin {
                agent: agent.to_string(),
                model: model.to_string(),
            },
            _ => return Err(CommandParseError::WrongArguments(PIN_USAGE)),
        },
        "/unpin" => match args.as_slice() {
            [agent] => SlashCommand::Unpin {
                agent: agent.to_string(),
            },
            _ => return Err(CommandParseError::WrongArguments(UNPIN_USAGE)),
        },
        "/pin-all" => match args.as_slice() {
            [model] => SlashCommand::PinAll {
                model: model.to_string(),
            },
            _ => return Err(CommandParseError::WrongArguments(PIN_ALL_USAGE)),
        },
        "/unpin-all" => {
            if !args.is_empty() {
                return Err(CommandParseError::WrongArguments(UNPIN_ALL_USAGE));
            }
            SlashCommand::UnpinAll
        }
        "/copy-pin" => match args.as_slice() {
            [from, to] => SlashCommand::CopyPin {
                from: from.to_string(),
                to: to.to_string(),
            },
            _ => return Err(CommandParseError::WrongArguments(COPY_PIN_USAGE)),
        },
        "/model" | "/m" => match args.as_slice() {
            [model] => SlashCommand::SwitchModel {
                model: model.to_string(),
            },
            _ => return Err(CommandParseError::WrongArguments(MODEL_USAGE)),
        },
        other => return Err(CommandParseError::UnknownCommand(other.to_string())),
    };

    Ok(Some(command))
}

fn parse_pins(args: &[&str]) -> Result<SlashCommand, CommandParseError> {
    let mut json = false;
    let mut clear_all = false;
    let mut agent = None;

    for arg in args {
        match *arg {
            "--json" => json = true,
            "--clear-all" => clear_all = true,
            flag if flag.starts_with("--") => {
                return Err(CommandParseError::UnknownOption {
                    option: flag.to_string(),
                    usage: PINS_USAGE,
                })
            }
            name if agent.is_none() => agent = Some(name.to_string()),
            _ => return Err(CommandParseError::WrongArguments(PINS_USAGE)),
        }
    }

    if clear_all {
        if json || agent.is_some() {
            return Err(CommandParseError::WrongArguments(PINS_USAGE));
        }
        return Ok(SlashCommand::ClearAllPins);
    }

    Ok(match agent {
        Some(agent) => SlashCommand::ShowPin { agent, json },
        None => SlashCommand::ListPins { json },
    })
}

/// A model switch found at the start of prompt text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelSwitchRequest {
    pub model: String,
    /// Prompt text with the switch command removed
    pub remaining: String,
}

/// Detect `/model <name>` or `/m <name>` naming a known model
///
/// Only an exact match against `model_names` counts; anything else is left
/// for the caller to treat as ordinary input.
pub fn extract_model_switch<S: AsRef<str>>(
    text: &str,
    model_names: &[S],
) -> Option<ModelSwitchRequest> {
    let content = text.trim();

    let (prefix, rest) = if let Some(rest) = content.strip_prefix("/model ") {
        ("/model ", rest)
    } else if let Some(rest) = content.strip_prefix("/m ") {
        ("/m ", rest)
    } else {
        return None;
    };
    let rest = rest.trim();

    let model = model_names
        .iter()
        .map(AsRef::<str>::as_ref)
        .find(|m| *m == rest)?;

    let command = format!("{}{}", prefix, model);
    let idx = text.find(&command)?;
    let remaining = format!("{}{}", &text[..idx], &text[idx + command.len()..])
        .trim()
        .to_string();

    Some(ModelSwitchRequest {
        model: model.to_string(),
        remaining,
    })
}
