use serde::{Deserialize, Serialize};

use crate::model::action::InputAction;

/// Named group of actions ("UI", "Gameplay", ...).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionMap {
    pub name: String,
    /// Stable identifier; survives renames.
    pub id: String,
    pub actions: Vec<InputAction>,
}

impl ActionMap {
    pub fn new<N: Into<String>>(name: N) -> Self {
        Self {
            name: name.into(),
            id: uuid::Uuid::new_v4().to_string(),
            actions: Vec::new(),
        }
    }

    pub fn with_id<I: Into<String>>(mut self, id: I) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_action(mut self, action: InputAction) -> Self {
        self.actions.push(action);
        self
    }

    pub fn find_action(&self, name: &str) -> Option<&InputAction> {
        self.actions.iter().find(|a| a.name == name)
    }

    pub fn find_action_mut(&mut self, name: &str) -> Option<&mut InputAction> {
        self.actions.iter_mut().find(|a| a.name == name)
    }
}
