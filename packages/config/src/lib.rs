// ABOUTME: Configuration crate for modelpin
// ABOUTME: Environment variable names and typed lookups shared by every package

pub mod constants;

use std::env;
use tracing::debug;

/// Read an environment variable, treating an empty value as unset
pub fn env_non_empty(name: &str) -> Option<String> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Some(value),
        Ok(_) => {
            debug!("Ignoring empty environment variable {}", name);
            None
        }
        Err(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_non_empty() {
        env::set_var("MODELPIN_TEST_NON_EMPTY", "value");
        assert_eq!(
            env_non_empty("MODELPIN_TEST_NON_EMPTY"),
            Some("value".to_string())
        );

        env::set_var("MODELPIN_TEST_NON_EMPTY", "   ");
        assert_eq!(env_non_empty("MODELPIN_TEST_NON_EMPTY"), None);

        env::remove_var("MODELPIN_TEST_NON_EMPTY");
        assert_eq!(env_non_empty("MODELPIN_TEST_NON_EMPTY"), None);
    }
}
