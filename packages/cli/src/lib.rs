// ABOUTME: Library side of the modelpin CLI
// ABOUTME: Configuration, logging, rendering, validation runs and shell input handling

pub mod config;
pub mod error;
pub mod logging;
pub mod render;
pub mod session;
pub mod validate;

pub use error::{CliError, CliResult};

#[cfg(test)]
mod tests;
