// ABOUTME: Pin manager tying the pin state to the model registry and agent catalog
// ABOUTME: Every operation reloads state and registries, and persists changes immediately

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

use modelpin_core::{validate_agent_name, ValidationError};
use modelpin_models::{AgentCatalog, ModelRegistry};
use modelpin_storage::{PinState, PinStorage};

use crate::catalogs::CatalogSource;
use crate::error::{PinError, PinResult};
use crate::switch::{PinChange, PinResolution, SwitchOutcome, SwitchPlan};
use crate::validator::{self, PinStatus};

/// Status of a pin as shown by listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PinEntryStatus {
    Valid,
    Stale,
    /// The agent is no longer in the catalog
    Orphaned,
}

impl PinEntryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PinEntryStatus::Valid => "valid",
            PinEntryStatus::Stale => "stale",
            PinEntryStatus::Orphaned => "orphaned",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PinEntry {
    pub agent: String,
    pub model: String,
    pub status: PinEntryStatus,
    pub pinned_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StalePin {
    pub agent: String,
    pub model: String,
}

/// Why a model was chosen for an agent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelSelection {
    Pinned,
    Active,
    RegistryDefault,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EffectiveModel {
    pub model: String,
    pub selection: ModelSelection,
}

pub struct PinManager {
    storage: Arc<dyn PinStorage>,
    catalogs: Arc<dyn CatalogSource>,
}

impl PinManager {
    pub fn new(storage: Arc<dyn PinStorage>, catalogs: Arc<dyn CatalogSource>) -> Self {
        Self { storage, catalogs }
    }

    /// Where pins are persisted
    pub fn storage_location(&self) -> String {
        self.storage.location()
    }

    pub async fn models(&self) -> PinResult<ModelRegistry> {
        Ok(self.catalogs.models().await?)
    }

    pub async fn agents(&self) -> PinResult<AgentCatalog> {
        Ok(self.catalogs.agents().await?)
    }

    async fn require_agent(&self, agent: &str) -> PinResult<AgentCatalog> {
        validate_agent_name(agent)?;
        let catalog = self.catalogs.agents().await?;
        if !catalog.contains(agent) {
            return Err(PinError::AgentNotFound(agent.to_string()));
        }
        Ok(catalog)
    }

    /// Registry keys are opaque, so only emptiness is checked before lookup
    async fn require_model(&self, model: &str) -> PinResult<ModelRegistry> {
        if model.is_empty() {
            return Err(ValidationError::Empty("Model identifier").into());
        }
        let registry = self.catalogs.models().await?;
        if !registry.contains(model) {
            return Err(PinError::ModelNotFound(model.to_string()));
        }
        Ok(registry)
    }

    /// Pinned model for an agent
    pub async fn get_pin(&self, agent: &str) -> PinResult<Option<String>> {
        self.require_agent(agent).await?;
        let state = self.storage.load().await?;
        Ok(state.pinned_model(agent).map(str::to_string))
    }

    /// Pin an agent to a model, returning the model it was pinned to before
    pub async fn pin(&self, agent: &str, model: &str) -> PinResult<Option<String>> {
        self.require_agent(agent).await?;
        self.require_model(model).await?;

        let mut state = self.storage.load().await?;
        let previous = state.set_pin(agent, model);
        self.storage.save(&state).await?;

        info!("Pinned agent '{}' to model '{}'", agent, model);
        Ok(previous)
    }

    /// Remove an agent's pin, returning the model it pointed at
    ///
    /// Pins of agents that left the catalog can still be removed.
    pub async fn unpin(&self, agent: &str) -> PinResult<Option<String>> {
        validate_agent_name(agent)?;

        let mut state = self.storage.load().await?;
        if state.pinned_model(agent).is_none() {
            self.require_agent(agent).await?;
        }

        let removed = state.remove_pin(agent);
        if removed.is_some() {
            self.storage.save(&state).await?;
            info!("Unpinned agent '{}'", agent);
        } else {
            debug!("Agent '{}' had no pin", agent);
        }
        Ok(removed)
    }

    /// Every pin with its status, sorted by agent name
    pub async fn list_pins(&self) -> PinResult<Vec<PinEntry>> {
        let state = self.storage.load().await?;
        let registry = self.catalogs.models().await?;
        let catalog = self.catalogs.agents().await?;

        let entries = state
            .pins
            .iter()
            .map(|(agent, record)| {
                let status = if !catalog.contains(agent) {
                    PinEntryStatus::Orphaned
                } else if registry.contains(&record.model) {
                    PinEntryStatus::Valid
                } else {
                    PinEntryStatus::Stale
                };
                PinEntry {
                    agent: agent.clone(),
                    model: record.model.clone(),
                    status,
                    pinned_at: record.pinned_at,
                }
            })
            .collect();

        Ok(entries)
    }

    /// Pin every catalog agent to one model, returning how many were pinned
    pub async fn pin_all(&self, model: &str) -> PinResult<usize> {
        self.require_model(model).await?;
        let catalog = self.catalogs.agents().await?;

        let mut state = self.storage.load().await?;
        for agent in catalog.names() {
            state.set_pin(agent, model);
        }
        self.storage.save(&state).await?;

        let count = catalog.list().len();
        info!("Pinned {} agents to model '{}'", count, model);
        Ok(count)
    }

    /// Remove every pin, orphaned ones included
    pub async fn unpin_all(&self) -> PinResult<usize> {
        let mut state = self.storage.load().await?;
        let count = state.clear_pins();
        if count > 0 {
            self.storage.save(&state).await?;
        }
        info!("Removed {} pins", count);
        Ok(count)
    }

    /// Give `to` the same pin as `from`, returning the copied model
    pub async fn copy_pin(&self, from: &str, to: &str) -> PinResult<String> {
        let catalog = self.require_agent(from).await?;
        validate_agent_name(to)?;
        if !catalog.contains(to) {
            return Err(PinError::AgentNotFound(to.to_string()));
        }

        let mut state = self.storage.load().await?;
        let model = state
            .pinned_model(from)
            .map(str::to_string)
            .ok_or_else(|| PinError::NoPin(from.to_string()))?;

        let registry = self.catalogs.models().await?;
        if !registry.contains(&model) {
            return Err(PinError::StalePin {
                agent: from.to_string(),
                model,
            });
        }

        state.set_pin(to, &model);
        self.storage.save(&state).await?;

        info!("Copied pin '{}' from agent '{}' to '{}'", model, from, to);
        Ok(model)
    }

    /// Check whether an agent's pin still exists in the registry
    ///
    /// Returns the stale model identifier, or `None` when the agent has no
    /// pin or its pin is valid. The registry is loaded fresh for each call.
    pub async fn validate_pinned_model(&self, agent: &str) -> PinResult<Option<String>> {
        self.require_agent(agent).await?;
        let state = self.storage.load().await?;

        let Some(pinned) = state.pinned_model(agent) else {
            return Ok(None);
        };

        let registry = self.catalogs.models().await?;
        let stale = validator::validate_pin(Some(pinned), &registry);
        if let Some(model) = &stale {
            warn!(
                "Agent '{}' is pinned to '{}', which is not in the model registry",
                agent, model
            );
        }
        Ok(stale)
    }

    /// Like [`Self::validate_pinned_model`] but tells "no pin" and "valid pin" apart
    pub async fn pin_status(&self, agent: &str) -> PinResult<PinStatus> {
        self.require_agent(agent).await?;
        let state = self.storage.load().await?;
        let registry = self.catalogs.models().await?;
        Ok(validator::pin_status(state.pinned_model(agent), &registry))
    }

    /// Every pin whose model is missing from the registry
    pub async fn validate_all(&self) -> PinResult<Vec<StalePin>> {
        let state = self.storage.load().await?;
        let registry = self.catalogs.models().await?;
        let catalog = self.catalogs.agents().await?;
        Ok(stale_pins(&state, &registry, &catalog))
    }

    /// Unpin every stale pin, returning what was removed
    pub async fn repair_stale_pins(&self) -> PinResult<Vec<StalePin>> {
        let mut state = self.storage.load().await?;
        let registry = self.catalogs.models().await?;
        let catalog = self.catalogs.agents().await?;
        let stale = stale_pins(&state, &registry, &catalog);

        if !stale.is_empty() {
            for pin in &stale {
                state.remove_pin(&pin.agent);
                warn!("Unpinned '{}' from stale model '{}'", pin.agent, pin.model);
            }
            self.storage.save(&state).await?;
        }
        Ok(stale)
    }

    /// Model an agent should run with: a valid pin, else the active model,
    /// else the first registry entry
    pub async fn effective_model(&self, agent: &str) -> PinResult<Option<EffectiveModel>> {
        self.require_agent(agent).await?;
        let state = self.storage.load().await?;
        let registry = self.catalogs.models().await?;

        match validator::pin_status(state.pinned_model(agent), &registry) {
            PinStatus::Valid(model) => {
                return Ok(Some(EffectiveModel {
                    model,
                    selection: ModelSelection::Pinned,
                }))
            }
            PinStatus::Stale(model) => {
                warn!(
                    "Ignoring stale pin '{}' for agent '{}'; falling back",
                    model, agent
                );
            }
            PinStatus::Unpinned => {}
        }

        if let Some(active) = state.active_model.as_deref() {
            if registry.contains(active) {
                return Ok(Some(EffectiveModel {
                    model: active.to_string(),
                    selection: ModelSelection::Active,
                }));
            }
            warn!("Active model '{}' is not in the model registry", active);
        }

        Ok(registry.first().map(|m| EffectiveModel {
            model: m.id.clone(),
            selection: ModelSelection::RegistryDefault,
        }))
    }

    pub async fn active_model(&self) -> PinResult<Option<String>> {
        Ok(self.storage.load().await?.active_model)
    }

    pub async fn set_active_model(&self, model: &str) -> PinResult<()> {
        self.require_model(model).await?;
        let mut state = self.storage.load().await?;
        state.active_model = Some(model.to_string());
        self.storage.save(&state).await?;
        info!("Active model set to '{}'", model);
        Ok(())
    }

    /// The saved current agent, or `None` once it has left the catalog
    pub async fn current_agent(&self) -> PinResult<Option<String>> {
        let Some(agent) = self.storage.load().await?.current_agent else {
            return Ok(None);
        };
        let catalog = self.catalogs.agents().await?;
        if !catalog.contains(&agent) {
            warn!("Current agent '{}' is no longer in the agent catalog; ignoring it", agent);
            return Ok(None);
        }
        Ok(Some(agent))
    }

    pub async fn set_current_agent(&self, agent: &str) -> PinResult<()> {
        self.require_agent(agent).await?;
        let mut state = self.storage.load().await?;
        state.current_agent = Some(agent.to_string());
        self.storage.save(&state).await?;
        info!("Current agent set to '{}'", agent);
        Ok(())
    }

    /// Decide whether switching `agent` to `requested` collides with its pin
    pub async fn plan_model_switch(
        &self,
        agent: Option<&str>,
        requested: &str,
    ) -> PinResult<SwitchPlan> {
        self.require_model(requested).await?;

        let Some(agent) = agent else {
            return Ok(SwitchPlan::Proceed);
        };
        self.require_agent(agent).await?;

        let state = self.storage.load().await?;
        match state.pinned_model(agent) {
            Some(pinned) if pinned != requested => Ok(SwitchPlan::Conflict {
                agent: agent.to_string(),
                pinned: pinned.to_string(),
            }),
            _ => Ok(SwitchPlan::Proceed),
        }
    }

    /// Switch the active model and settle the agent's pin as requested
    pub async fn apply_model_switch(
        &self,
        agent: Option<&str>,
        requested: &str,
        resolution: PinResolution,
    ) -> PinResult<SwitchOutcome> {
        if resolution == PinResolution::Cancel {
            info!("Cancelled model change to '{}'", requested);
            return Ok(SwitchOutcome::Cancelled);
        }

        self.require_model(requested).await?;
        if let Some(agent) = agent {
            self.require_agent(agent).await?;
        }

        let mut state = self.storage.load().await?;
        state.active_model = Some(requested.to_string());

        let pin = match (agent, resolution) {
            (Some(agent), PinResolution::UpdatePin) => PinChange::Updated {
                previous: state.set_pin(agent, requested),
            },
            (Some(agent), PinResolution::Unpin) => match state.remove_pin(agent) {
                Some(previous) => PinChange::Removed { previous },
                None => PinChange::Unchanged,
            },
            _ => PinChange::Unchanged,
        };

        self.storage.save(&state).await?;
        info!("Switched active model to '{}' ({:?})", requested, pin);

        Ok(SwitchOutcome::Switched {
            model: requested.to_string(),
            pin,
        })
    }
}

/// Pins of catalog agents whose model left the registry; orphaned pins are not stale
fn stale_pins(
    state: &PinState,
    registry: &ModelRegistry,
    catalog: &AgentCatalog,
) -> Vec<StalePin> {
    state
        .pins
        .iter()
        .filter(|(agent, record)| catalog.contains(agent) && !registry.contains(&record.model))
        .map(|(agent, record)| StalePin {
            agent: agent.clone(),
            model: record.model.clone(),
        })
        .collect()
}
