use thiserror::Error;

use modelpin_pins::{CommandParseError, PinError};

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Pin(#[from] PinError),

    #[error(transparent)]
    Command(#[from] CommandParseError),

    #[error("No models configured")]
    NoModels,

    #[error("'{0}' is not a slash command")]
    NotACommand(String),

    #[error("{count} stale pin(s) found. Run 'modelpin validate --fix' to remove them")]
    StalePins { count: usize },

    #[error("Pin for '{agent}' is stale: '{model}' is not in models.json")]
    StalePin { agent: String, model: String },
}

pub type CliResult<T> = Result<T, CliError>;
