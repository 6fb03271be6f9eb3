// ABOUTME: Input validation for agent names
// ABOUTME: Shared checks applied before anything is written to the pin state

use thiserror::Error;

/// Longest agent name accepted
const MAX_IDENTIFIER_LEN: usize = 128;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} cannot be empty")]
    Empty(&'static str),

    #[error("{field} '{value}' must not contain whitespace")]
    Whitespace { field: &'static str, value: String },

    #[error("{field} is longer than {max} characters")]
    TooLong { field: &'static str, max: usize },
}

/// Validate an agent name
pub fn validate_agent_name(name: &str) -> Result<(), ValidationError> {
    validate_identifier("Agent name", name)
}

fn validate_identifier(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::Empty(field));
    }
    if value.chars().any(char::is_whitespace) {
        return Err(ValidationError::Whitespace {
            field,
            value: value.to_string(),
        });
    }
    if value.chars().count() > MAX_IDENTIFIER_LEN {
        return Err(ValidationError::TooLong {
            field,
            max: MAX_IDENTIFIER_LEN,
        });
    }
    Ok(())
}
