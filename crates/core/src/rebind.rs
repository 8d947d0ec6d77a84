//! Runtime rebinding: overwrite one binding of a live action.
//!
//! Paths are not validated here; a bad path surfaces later in the host input layer.
//! Applying twice simply overwrites.

use core::fmt;
use std::sync::Arc;

use crate::core_log::CoreLog;
use crate::model::handle::ActionHandle;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RebindError {
    /// The handle no longer resolves to an action.
    ActionNotFound,
    BindingIndexOutOfRange {
        action: String,
        index: usize,
        len: usize,
    },
}

impl fmt::Display for RebindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RebindError::ActionNotFound => f.write_str("target action no longer exists"),
            RebindError::BindingIndexOutOfRange { action, index, len } => write!(
                f,
                "binding index {index} out of range for action '{action}' ({len} bindings)"
            ),
        }
    }
}

impl std::error::Error for RebindError {}

/// One override: new path + interaction spec for `binding_index` of `target`.
#[derive(Debug, Clone)]
pub struct Override {
    pub target: ActionHandle,
    pub binding_index: usize,
    pub new_path: String,
    pub new_interactions: String,
}

impl Override {
    pub fn new<P: Into<String>, I: Into<String>>(
        target: ActionHandle,
        binding_index: usize,
        new_path: P,
        new_interactions: I,
    ) -> Self {
        Self {
            target,
            binding_index,
            new_path: new_path.into(),
            new_interactions: new_interactions.into(),
        }
    }

    pub fn apply(&self) -> Result<(), RebindError> {
        self.target
            .with_action_mut(|action| {
                action.apply_override(self.binding_index, &self.new_path, &self.new_interactions)
            })
            .unwrap_or(Err(RebindError::ActionNotFound))
    }
}

/// Apply `ov` and report the outcome to `logger`. Returns whether the binding changed.
pub fn apply_rebind(ov: &Override, logger: &Arc<dyn CoreLog>) -> bool {
    let action = ov
        .target
        .name()
        .unwrap_or_else(|| "<missing>".to_string());
    match ov.apply() {
        Ok(()) => {
            logger.info(&format!(
                "[rebind] {action}[{}] -> '{}' interactions='{}'",
                ov.binding_index, ov.new_path, ov.new_interactions
            ));
            true
        }
        Err(e) => {
            logger.warn(&format!("[rebind] {action}: {e}"));
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_log::{BufferLog, Level};
    use crate::model::{
        action::{ActionType, InputAction},
        action_map::ActionMap,
        asset::InputAsset,
        handle::AssetHandle,
    };

    fn asset() -> AssetHandle {
        let mut next = InputAction::new("NextRound", ActionType::Button);
        next.add_binding("<Keyboard>/space", "Keyboard&Mouse")
            .interactions = "press".into();
        next.add_binding("<Gamepad>/buttonSouth", "Gamepad");
        AssetHandle::new(InputAsset::new("Controls").with_map(ActionMap::new("UI").with_action(next)))
    }

    #[test]
    fn override_touches_only_target_binding() {
        let a = asset();
        let before = a.snapshot();
        let ov = Override::new(
            a.action("UI", "NextRound").unwrap(),
            0,
            "<Keyboard>/k",
            "hold(duration=1.0)",
        );
        ov.apply().unwrap();

        let after = a.snapshot();
        let old = &before.maps[0].actions[0].bindings;
        let new = &after.maps[0].actions[0].bindings;
        assert_eq!(new[0].path, "<Keyboard>/k");
        assert_eq!(new[0].interactions, "hold(duration=1.0)");
        assert_eq!(new[0].groups, old[0].groups);
        assert_eq!(new[0].id, old[0].id);
        assert_eq!(new[1], old[1]);
    }

    #[test]
    fn second_apply_overwrites() {
        let a = asset();
        let target = a.action("UI", "NextRound").unwrap();
        Override::new(target.clone(), 1, "<Gamepad>/start", "").apply().unwrap();
        Override::new(target, 1, "<Gamepad>/select", "tap").apply().unwrap();

        let b = &a.snapshot().maps[0].actions[0].bindings[1];
        assert_eq!(b.path, "<Gamepad>/select");
        assert_eq!(b.interactions, "tap");
    }

    #[test]
    fn out_of_range_is_reported_not_panicked() {
        let a = asset();
        let buf = Arc::new(BufferLog::new());
        let log: Arc<dyn CoreLog> = buf.clone();
        let ov = Override::new(a.action("UI", "NextRound").unwrap(), 5, "<Keyboard>/k", "");

        assert_eq!(
            ov.apply(),
            Err(RebindError::BindingIndexOutOfRange {
                action: "NextRound".into(),
                index: 5,
                len: 2
            })
        );
        assert!(!apply_rebind(&ov, &log));
        assert!(buf.contains(Level::Warn, "out of range"));
    }

    #[test]
    fn removing_an_earlier_action_keeps_the_target() {
        let mut sort = InputAction::new("Sort", ActionType::Button);
        sort.add_binding("<Keyboard>/s", "Keyboard&Mouse");
        let mut next = InputAction::new("NextRound", ActionType::Button);
        next.add_binding("<Keyboard>/n", "Keyboard&Mouse");
        let mut pause = InputAction::new("Pause", ActionType::Button);
        pause.add_binding("<Keyboard>/p", "Keyboard&Mouse");
        let a = AssetHandle::new(
            InputAsset::new("Controls").with_map(
                ActionMap::new("UI")
                    .with_action(sort)
                    .with_action(next)
                    .with_action(pause),
            ),
        );
        let target = a.action("UI", "NextRound").unwrap();

        a.write().maps[0].actions.remove(0);
        Override::new(target.clone(), 0, "<Keyboard>/k", "").apply().unwrap();

        let live = a.snapshot();
        assert_eq!(live.find_action("UI", "NextRound").unwrap().bindings[0].path, "<Keyboard>/k");
        assert_eq!(live.find_action("UI", "Pause").unwrap().bindings[0].path, "<Keyboard>/p");

        a.write().maps[0].actions.retain(|x| x.name != "NextRound");
        assert_eq!(
            Override::new(target.clone(), 0, "<Keyboard>/j", "").apply(),
            Err(RebindError::ActionNotFound)
        );
        assert!(target.name().is_none());
        assert_eq!(
            a.snapshot().find_action("UI", "Pause").unwrap().bindings[0].path,
            "<Keyboard>/p"
        );
    }

    #[test]
    fn vanished_action_is_not_found() {
        let a = asset();
        let ov = Override::new(a.action("UI", "NextRound").unwrap(), 0, "<Keyboard>/k", "");
        a.write().maps[0].actions.clear();
        assert_eq!(ov.apply(), Err(RebindError::ActionNotFound));
    }
}
