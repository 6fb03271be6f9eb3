use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

use modelpin_config::constants::{MODELPIN_AGENTS_PATH, MODELPIN_LOG, MODELS_JSON_PATH};
use modelpin_config::env_non_empty;
use modelpin_core::{modelpin_dir, pins_file};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: error, warn, info, debug, trace")]
    InvalidLogLevel(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }

    /// Raise verbosity by `steps` levels, saturating at trace
    pub fn raised(self, steps: u8) -> Self {
        const ORDER: [LogLevel; 5] = [
            LogLevel::Error,
            LogLevel::Warn,
            LogLevel::Info,
            LogLevel::Debug,
            LogLevel::Trace,
        ];
        let current = ORDER.iter().position(|l| *l == self).unwrap_or(1);
        ORDER[(current + steps as usize).min(ORDER.len() - 1)]
    }
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "error" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding pins.json and the optional user registries
    pub home: PathBuf,
    pub pins_path: PathBuf,
    /// Explicit models.json override, if any
    pub models_path: Option<PathBuf>,
    /// Explicit agents.json override, if any
    pub agents_path: Option<PathBuf>,
    pub log_level: LogLevel,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let log_level = env_non_empty(MODELPIN_LOG)
            .unwrap_or_else(|| "warn".to_string())
            .parse::<LogLevel>()?;

        Ok(Config {
            home: modelpin_dir(),
            pins_path: pins_file(),
            models_path: env_non_empty(MODELS_JSON_PATH).map(PathBuf::from),
            agents_path: env_non_empty(MODELPIN_AGENTS_PATH).map(PathBuf::from),
            log_level,
        })
    }
}
