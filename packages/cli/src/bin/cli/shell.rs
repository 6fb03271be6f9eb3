use colored::*;
use inquire::autocompletion::{Autocomplete, Replacement};
use inquire::{CustomUserError, InquireError, Text};

use modelpin_cli::session::{classify_line, parse_exec_line, route_prompt, ShellInput};
use modelpin_pins::{Completion, ModelCompleter, ModelSelection, PinManager, SlashCommand};

use super::{model, pins};

const SHELL_HELP: &[(&str, &str)] = &[
    ("/pins [<agent>] [--json]", "List pins, or show one agent's pin"),
    ("/pins --clear-all", "Remove every pin"),
    ("/pin <agent> <model>", "Pin an agent to a model"),
    ("/unpin <agent>", "Remove an agent's pin"),
    ("/pin-all <model>", "Pin every agent to one model"),
    ("/unpin-all", "Remove every pin"),
    ("/copy-pin <from> <to>", "Copy one agent's pin to another"),
    ("/model <name>, /m <name>", "Switch the active model"),
    ("exit", "Leave the shell"),
];

/// Model-name completion for the prompt, snapshotting the active and pinned
/// models when the prompt is shown
#[derive(Clone)]
struct ModelAutocomplete {
    completer: ModelCompleter,
    active: Option<String>,
    pinned: Option<String>,
}

impl ModelAutocomplete {
    fn completions(&self, input: &str) -> Vec<Completion> {
        self.completer
            .complete(input, self.active.as_deref(), self.pinned.as_deref())
    }
}

fn suggestion_label(completion: &Completion) -> String {
    format!("{}  ({})", completion.text, completion.display_meta)
}

/// Replace the partially typed model name with the completion
fn apply_completion(input: &str, completion: &Completion) -> String {
    let keep = (input.chars().count() as isize + completion.start_position).max(0) as usize;
    let mut line: String = input.chars().take(keep).collect();
    line.push_str(&completion.text);
    line
}

impl Autocomplete for ModelAutocomplete {
    fn get_suggestions(&mut self, input: &str) -> Result<Vec<String>, CustomUserError> {
        Ok(self.completions(input).iter().map(suggestion_label).collect())
    }

    fn get_completion(
        &mut self,
        input: &str,
        highlighted_suggestion: Option<String>,
    ) -> Result<Replacement, CustomUserError> {
        let mut completions = self.completions(input);
        let chosen = match highlighted_suggestion {
            Some(label) => completions.into_iter().find(|c| suggestion_label(c) == label),
            None if completions.len() == 1 => completions.pop(),
            None => None,
        };
        Ok(chosen.map(|c| apply_completion(input, &c)))
    }
}

pub async fn run_shell(manager: &PinManager) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", "📌 modelpin shell".blue().bold());
    println!(
        "{}",
        "Type /pins to see pins, /model <name> to switch models, 'help' for commands, 'exit' to leave"
            .dimmed()
    );
    println!();

    loop {
        let agent = manager.current_agent().await?;
        let active = manager.active_model().await?;
        let pinned = match agent.as_deref() {
            Some(agent) => manager.get_pin(agent).await.ok().flatten(),
            None => None,
        };
        let model_names: Vec<String> = manager
            .models()
            .await?
            .model_names()
            .into_iter()
            .map(str::to_string)
            .collect();

        let autocomplete = ModelAutocomplete {
            completer: ModelCompleter::with_models(model_names.clone()),
            active,
            pinned,
        };
        let prompt = format!("{} ›", agent.as_deref().unwrap_or("modelpin"));

        let line = match Text::new(&prompt).with_autocomplete(autocomplete).prompt() {
            Ok(line) => line,
            Err(InquireError::OperationCanceled) | Err(InquireError::OperationInterrupted) => break,
            Err(e) => return Err(e.into()),
        };

        let input = match classify_line(&line, &model_names) {
            Ok(input) => input,
            Err(e) => {
                eprintln!("{} {}", "Error:".red().bold(), e);
                continue;
            }
        };

        match input {
            ShellInput::Empty => continue,
            ShellInput::Exit => break,
            ShellInput::Help => print_help(),
            other => {
                if let Err(e) = handle_input(manager, other).await {
                    eprintln!("{} {}", "Error:".red().bold(), e);
                }
            }
        }
    }

    println!("{}", "Bye".dimmed());
    Ok(())
}

/// Run a single slash command outside the shell
pub async fn exec_line(
    manager: &PinManager,
    line: &str,
    yes: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let command = parse_exec_line(line)?;
    dispatch(manager, command, yes).await
}

async fn handle_input(
    manager: &PinManager,
    input: ShellInput,
) -> Result<(), Box<dyn std::error::Error>> {
    match input {
        ShellInput::Switch(request) => {
            model::switch_model(manager, &request.model, None, None).await?;
            if !request.remaining.is_empty() {
                print_route(manager, &request.remaining).await?;
            }
            Ok(())
        }
        ShellInput::Command(command) => dispatch(manager, command, false).await,
        ShellInput::Prompt(text) => print_route(manager, &text).await,
        ShellInput::Empty | ShellInput::Exit | ShellInput::Help => Ok(()),
    }
}

async fn dispatch(
    manager: &PinManager,
    command: SlashCommand,
    yes: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        SlashCommand::ListPins { json } => pins::list_pins(manager, json).await,
        SlashCommand::ShowPin { agent, json } => pins::show_pin(manager, &agent, json).await,
        SlashCommand::ClearAllPins | SlashCommand::UnpinAll => pins::unpin_all(manager, yes).await,
        SlashCommand::Pin { agent, model } => pins::pin(manager, &agent, &model).await,
        SlashCommand::Unpin { agent } => pins::unpin(manager, &agent).await,
        SlashCommand::PinAll { model } => pins::pin_all(manager, &model, yes).await,
        SlashCommand::CopyPin { from, to } => pins::copy_pin(manager, &from, &to).await,
        SlashCommand::SwitchModel { model } => {
            model::switch_model(manager, &model, None, None).await
        }
    }
}

/// Report which model ordinary input would be sent to
async fn print_route(manager: &PinManager, text: &str) -> Result<(), Box<dyn std::error::Error>> {
    let route = route_prompt(manager).await?;

    if let (Some(agent), Some(stale)) = (&route.agent, &route.skipped_stale_pin) {
        println!(
            "{}",
            format!(
                "⚠️  Pinned model '{}' for '{}' is no longer in models.json; falling back",
                stale, agent
            )
            .yellow()
        );
    }

    let via = match route.selection {
        ModelSelection::Pinned => " (pinned)",
        _ => "",
    };
    let agent = route
        .agent
        .as_deref()
        .map(|a| format!("[{}]", a))
        .unwrap_or_default();
    println!(
        "{} {}{} {} {}",
        "→".dimmed(),
        route.model.cyan(),
        via.dimmed(),
        agent.dimmed(),
        text.dimmed()
    );
    Ok(())
}

fn print_help() {
    for (usage, description) in SHELL_HELP {
        println!("  {:<28} {}", usage.cyan(), description.dimmed());
    }
}
