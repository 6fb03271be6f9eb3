// ABOUTME: Types for switching the active model while an agent has a pin
// ABOUTME: A switch is planned first, then applied with the user's resolution

use std::fmt;
use std::str::FromStr;

/// What happens when the requested model differs from the agent's pin
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwitchPlan {
    /// No pin in the way
    Proceed,
    /// The agent is pinned to another model
    Conflict { agent: String, pinned: String },
}

/// How to settle a pin conflict
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinResolution {
    /// Change the model but leave the pin alone
    KeepPin,
    /// Change the model and re-pin the agent to it
    UpdatePin,
    /// Change the model and unpin the agent
    Unpin,
    /// Leave everything as it was
    Cancel,
}

impl PinResolution {
    pub const ALL: [PinResolution; 4] = [
        PinResolution::KeepPin,
        PinResolution::UpdatePin,
        PinResolution::Unpin,
        PinResolution::Cancel,
    ];
}

impl fmt::Display for PinResolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PinResolution::KeepPin => "Change model but leave pin alone",
            PinResolution::UpdatePin => "Change model and also update the pin",
            PinResolution::Unpin => "Change model and unpin",
            PinResolution::Cancel => "Cancel the change",
        };
        f.write_str(label)
    }
}

impl FromStr for PinResolution {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "keep" | "1" => Ok(PinResolution::KeepPin),
            "update" | "2" => Ok(PinResolution::UpdatePin),
            "unpin" | "3" => Ok(PinResolution::Unpin),
            "cancel" | "4" => Ok(PinResolution::Cancel),
            _ => Err(format!(
                "Invalid resolution '{}'. Must be one of: keep, update, unpin, cancel",
                s
            )),
        }
    }
}

/// What a switch did to the agent's pin
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PinChange {
    Unchanged,
    Updated { previous: Option<String> },
    Removed { previous: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwitchOutcome {
    Switched { model: String, pin: PinChange },
    Cancelled,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("keep", PinResolution::KeepPin)]
    #[case("UPDATE", PinResolution::UpdatePin)]
    #[case("3", PinResolution::Unpin)]
    #[case("cancel", PinResolution::Cancel)]
    fn test_parse_resolution(#[case] input: &str, #[case] expected: PinResolution) {
        assert_eq!(input.parse::<PinResolution>().unwrap(), expected);
    }

    #[test]
    fn test_parse_resolution_rejects_unknown() {
        assert!("maybe".parse::<PinResolution>().is_err());
    }

    #[test]
    fn test_menu_labels_in_order() {
        let labels: Vec<String> = PinResolution::ALL.iter().map(|r| r.to_string()).collect();
        assert_eq!(labels[0], "Change model but leave pin alone");
        assert_eq!(labels[3], "Cancel the change");
    }
}
