// ABOUTME: Pin validation runs behind `modelpin validate`
// ABOUTME: Optionally repairs stale pins and decides whether the command fails

use modelpin_pins::{PinManager, PinStatus, StalePin};

use crate::error::{CliError, CliResult};

/// Result of checking every pin
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// Pins unpinned by `--fix`
    pub removed: Vec<StalePin>,
    /// Stale pins left afterwards
    pub stale: Vec<StalePin>,
}

impl ValidationReport {
    /// Fails while stale pins remain
    pub fn ensure_clean(&self) -> CliResult<()> {
        if self.stale.is_empty() {
            Ok(())
        } else {
            Err(CliError::StalePins {
                count: self.stale.len(),
            })
        }
    }
}

pub async fn validate_pins(manager: &PinManager, fix: bool) -> CliResult<ValidationReport> {
    let removed = if fix {
        manager.repair_stale_pins().await?
    } else {
        Vec::new()
    };
    let stale = manager.validate_all().await?;
    Ok(ValidationReport { removed, stale })
}

/// Result of checking one agent's pin
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentValidation {
    pub agent: String,
    /// Stale model unpinned by `--fix`
    pub removed: Option<String>,
    pub status: PinStatus,
}

impl AgentValidation {
    pub fn ensure_clean(&self) -> CliResult<()> {
        match &self.status {
            PinStatus::Stale(model) => Err(CliError::StalePin {
                agent: self.agent.clone(),
                model: model.clone(),
            }),
            _ => Ok(()),
        }
    }
}

pub async fn validate_agent_pin(
    manager: &PinManager,
    agent: &str,
    fix: bool,
) -> CliResult<AgentValidation> {
    let mut status = manager.pin_status(agent).await?;
    let mut removed = None;

    if fix {
        if let PinStatus::Stale(model) = &status {
            manager.unpin(agent).await?;
            removed = Some(model.clone());
            status = manager.pin_status(agent).await?;
        }
    }

    Ok(AgentValidation {
        agent: agent.to_string(),
        removed,
        status,
    })
}
