// ABOUTME: Agent model pinning
// ABOUTME: Pin validation, pin management, pin-aware model switching, completion and slash commands

pub mod catalogs;
pub mod command;
pub mod completion;
pub mod error;
pub mod manager;
pub mod switch;
pub mod validator;

pub use catalogs::{CatalogSource, FileCatalogs, StaticCatalogs};
pub use command::{extract_model_switch, parse_slash_command, CommandParseError, ModelSwitchRequest, SlashCommand};
pub use completion::{Completion, ModelCompleter};
pub use error::{PinError, PinResult};
pub use manager::{EffectiveModel, ModelSelection, PinEntry, PinEntryStatus, PinManager, StalePin};
pub use switch::{PinChange, PinResolution, SwitchOutcome, SwitchPlan};
pub use validator::{pin_status, validate_pin, PinStatus};
