// ABOUTME: Model-name completion for the interactive prompt
// ABOUTME: Suggests registry models after the trigger and marks the selected and pinned ones

use modelpin_core::DEFAULT_MODEL_TRIGGER;

/// A single completion candidate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub text: String,
    /// Offset from the cursor where the replacement starts (zero or negative)
    pub start_position: isize,
    pub display_meta: &'static str,
}

#[derive(Debug, Clone)]
pub struct ModelCompleter {
    trigger: String,
    model_names: Vec<String>,
}

impl ModelCompleter {
    pub fn new(trigger: impl Into<String>, model_names: Vec<String>) -> Self {
        Self {
            trigger: trigger.into(),
            model_names,
        }
    }

    /// Completer on the default `/model` trigger
    pub fn with_models(model_names: Vec<String>) -> Self {
        Self::new(DEFAULT_MODEL_TRIGGER, model_names)
    }

    pub fn trigger(&self) -> &str {
        &self.trigger
    }

    pub fn model_names(&self) -> &[String] {
        &self.model_names
    }

    /// Candidates for the text left of the cursor
    ///
    /// Only fires when the line (ignoring leading whitespace) starts with the
    /// trigger followed by a space.
    pub fn complete(
        &self,
        text_before_cursor: &str,
        active_model: Option<&str>,
        pinned_model: Option<&str>,
    ) -> Vec<Completion> {
        let opener = format!("{} ", self.trigger);
        if !text_before_cursor.trim_start().starts_with(&opener) {
            return Vec::new();
        }

        let Some(trigger_pos) = text_before_cursor.find(&self.trigger) else {
            return Vec::new();
        };
        let typed = text_before_cursor[trigger_pos + opener.len()..].trim_start();
        let start_position = -(typed.chars().count() as isize);

        self.model_names
            .iter()
            .filter(|name| typed.is_empty() || name.starts_with(typed))
            .map(|name| Completion {
                text: name.clone(),
                start_position,
                display_meta: meta_for(name, active_model, pinned_model),
            })
            .collect()
    }
}

fn meta_for(name: &str, active_model: Option<&str>, pinned_model: Option<&str>) -> &'static str {
    let selected = active_model == Some(name);
    let pinned = pinned_model == Some(name);
    match (selected, pinned) {
        (true, true) => "Model (selected + pinned)",
        (true, false) => "Model (selected)",
        (false, true) => "Model (pinned to agent)",
        (false, false) => "Model",
    }
}
