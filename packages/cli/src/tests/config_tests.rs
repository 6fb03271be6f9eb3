use crate::config::{Config, ConfigError, LogLevel};
use crate::logging::env_filter;
use modelpin_config::constants::{MODELPIN_HOME, MODELPIN_LOG, MODELS_JSON_PATH, RUST_LOG};
use rstest::rstest;
use serial_test::serial;
use std::env;
use std::path::PathBuf;

#[test]
#[serial]
fn test_config_from_env_defaults() {
    env::remove_var(MODELPIN_LOG);
    env::remove_var(MODELS_JSON_PATH);

    let config = Config::from_env().unwrap();

    assert_eq!(config.log_level, LogLevel::Warn);
    assert_eq!(config.models_path, None);
    assert_eq!(config.pins_path, config.home.join("pins.json"));
}

#[test]
#[serial]
fn test_config_from_env_with_overrides() {
    let temp = tempfile::TempDir::new().unwrap();
    env::set_var(MODELPIN_HOME, temp.path());
    env::set_var(MODELS_JSON_PATH, "/etc/modelpin/models.json");
    env::set_var(MODELPIN_LOG, "debug");

    let config = Config::from_env().unwrap();

    assert_eq!(config.home, temp.path());
    assert_eq!(config.pins_path, temp.path().join("pins.json"));
    assert_eq!(
        config.models_path,
        Some(PathBuf::from("/etc/modelpin/models.json"))
    );
    assert_eq!(config.log_level, LogLevel::Debug);

    env::remove_var(MODELPIN_HOME);
    env::remove_var(MODELS_JSON_PATH);
    env::remove_var(MODELPIN_LOG);
}

#[test]
#[serial]
fn test_config_invalid_log_level() {
    env::set_var(MODELPIN_LOG, "chatty");

    let result = Config::from_env();

    assert!(matches!(result, Err(ConfigError::InvalidLogLevel(level)) if level == "chatty"));

    env::remove_var(MODELPIN_LOG);
}

#[rstest]
#[case("error", LogLevel::Error)]
#[case("WARN", LogLevel::Warn)]
#[case("warning", LogLevel::Warn)]
#[case(" info ", LogLevel::Info)]
#[case("trace", LogLevel::Trace)]
fn test_parse_log_levels(#[case] input: &str, #[case] expected: LogLevel) {
    assert_eq!(input.parse::<LogLevel>().unwrap(), expected);
}

#[rstest]
#[case(LogLevel::Warn, 0, LogLevel::Warn)]
#[case(LogLevel::Warn, 1, LogLevel::Info)]
#[case(LogLevel::Warn, 2, LogLevel::Debug)]
#[case(LogLevel::Info, 9, LogLevel::Trace)]
fn test_raised_log_level(#[case] start: LogLevel, #[case] steps: u8, #[case] expected: LogLevel) {
    assert_eq!(start.raised(steps), expected);
}

#[test]
#[serial]
fn test_env_filter_uses_level_without_rust_log() {
    env::remove_var(RUST_LOG);
    let filter = env_filter(LogLevel::Info);
    assert_eq!(filter.to_string(), "info");
}

#[test]
fn test_config_error_display() {
    let error = ConfigError::InvalidLogLevel("loud".to_string());
    assert_eq!(
        error.to_string(),
        "Invalid log level: loud. Must be one of: error, warn, info, debug, trace"
    );
}
