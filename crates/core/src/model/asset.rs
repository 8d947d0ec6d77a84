use serde::{Deserialize, Serialize};

use crate::model::{action::InputAction, action_map::ActionMap};

/// Top-level binding configuration (a keymap file's worth of action maps).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InputAsset {
    pub name: String,
    pub maps: Vec<ActionMap>,
}

impl InputAsset {
    pub fn new<N: Into<String>>(name: N) -> Self {
        Self {
            name: name.into(),
            maps: Vec::new(),
        }
    }

    pub fn with_map(mut self, map: ActionMap) -> Self {
        self.maps.push(map);
        self
    }

    pub fn find_action_map(&self, name: &str) -> Option<&ActionMap> {
        self.maps.iter().find(|m| m.name == name)
    }

    pub fn find_action_map_mut(&mut self, name: &str) -> Option<&mut ActionMap> {
        self.maps.iter_mut().find(|m| m.name == name)
    }

    /// `map/action` lookup.
    pub fn find_action(&self, map: &str, action: &str) -> Option<&InputAction> {
        self.find_action_map(map).and_then(|m| m.find_action(action))
    }

    pub fn find_action_mut(&mut self, map: &str, action: &str) -> Option<&mut InputAction> {
        self.find_action_map_mut(map)
            .and_then(|m| m.find_action_mut(action))
    }

    /// Give every map and action without one a fresh id and point each binding's
    /// `action` back at the action that holds it.
    pub fn link(&mut self) {
        for map in &mut self.maps {
            if map.id.is_empty() {
                map.id = uuid::Uuid::new_v4().to_string();
            }
            for action in &mut map.actions {
                if action.id.is_empty() {
                    action.id = uuid::Uuid::new_v4().to_string();
                }
                for binding in &mut action.bindings {
                    if binding.action != action.name {
                        binding.action.clone_from(&action.name);
                    }
                }
            }
        }
    }
}
