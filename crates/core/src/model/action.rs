use core::fmt;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::model::binding::InputBinding;
use crate::rebind::RebindError;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize, Default)]
pub enum ActionType {
    #[default]
    Value,
    Button,
    PassThrough,
}

impl ActionType {
    pub fn name(&self) -> &'static str {
        match self {
            ActionType::Value => "Value",
            ActionType::Button => "Button",
            ActionType::PassThrough => "PassThrough",
        }
    }

    pub const ALL: [ActionType; 3] = [
        ActionType::Value,
        ActionType::Button,
        ActionType::PassThrough,
    ];
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ActionType {
    type Err = &'static str;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "value" => Ok(ActionType::Value),
            "button" => Ok(ActionType::Button),
            "passthrough" | "pass-through" => Ok(ActionType::PassThrough),
            _ => Err("expected one of: value, button, passthrough"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InputAction {
    pub name: String,
    pub id: String,
    #[serde(rename = "type")]
    pub action_type: ActionType,
    pub expected_control_type: String,
    pub bindings: Vec<InputBinding>,
}

impl InputAction {
    pub fn new<N: Into<String>>(name: N, action_type: ActionType) -> Self {
        Self {
            name: name.into(),
            id: uuid::Uuid::new_v4().to_string(),
            action_type,
            ..Self::default()
        }
    }

    pub fn with_control_type<C: Into<String>>(mut self, control: C) -> Self {
        self.expected_control_type = control.into();
        self
    }

    /// Append a binding; its back-link is pointed at this action.
    pub fn with_binding(mut self, binding: InputBinding) -> Self {
        self.push_binding(binding);
        self
    }

    pub fn push_binding(&mut self, mut binding: InputBinding) -> &mut InputBinding {
        binding.action = self.name.clone();
        if binding.id.is_empty() {
            binding.id = uuid::Uuid::new_v4().to_string();
        }
        self.bindings.push(binding);
        let last = self.bindings.len() - 1;
        &mut self.bindings[last]
    }

    /// Add a plain binding tagged with a single device group.
    pub fn add_binding<P: Into<String>, G: Into<String>>(
        &mut self,
        path: P,
        group: G,
    ) -> &mut InputBinding {
        self.push_binding(InputBinding::new(path).with_groups(group))
    }

    /// Remove the binding at `index`. A composite head takes its parts with it.
    pub fn erase_binding(&mut self, index: usize) -> Option<InputBinding> {
        if index >= self.bindings.len() {
            return None;
        }
        let removed = self.bindings.remove(index);
        if removed.is_composite {
            while self
                .bindings
                .get(index)
                .is_some_and(|b| b.is_part_of_composite)
            {
                self.bindings.remove(index);
            }
        }
        Some(removed)
    }

    /// Overwrite path and interactions of one binding in place. Nothing else changes.
    pub fn apply_override(
        &mut self,
        index: usize,
        new_path: &str,
        new_interactions: &str,
    ) -> Result<(), RebindError> {
        let len = self.bindings.len();
        let Some(binding) = self.bindings.get_mut(index) else {
            return Err(RebindError::BindingIndexOutOfRange {
                action: self.name.clone(),
                index,
                len,
            });
        };
        binding.path = new_path.to_string();
        binding.interactions = new_interactions.to_string();
        Ok(())
    }
}
