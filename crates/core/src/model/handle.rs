//! Live references into externally owned binding assets.
//!
//! An `AssetHandle` is shared by every container that points at the same asset, so
//! identity is pointer identity: two handles are "the same asset" only if they share
//! the allocation, regardless of content. Actions inside it are addressed by their
//! map and action ids, so a handle survives the host reordering or inserting actions.

use core::fmt;
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::{
    hash::{Hash, Hasher},
    sync::Arc,
};

use crate::model::{action::InputAction, asset::InputAsset};

/// Identity key of a live asset (address of the shared allocation).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AssetId(usize);

#[derive(Clone)]
pub struct AssetHandle(Arc<RwLock<InputAsset>>);

impl AssetHandle {
    /// Wrap an asset; missing ids and binding back-links are filled in first.
    pub fn new(mut asset: InputAsset) -> Self {
        asset.link();
        Self(Arc::new(RwLock::new(asset)))
    }

    #[inline]
    pub fn id(&self) -> AssetId {
        AssetId(Arc::as_ptr(&self.0) as *const () as usize)
    }

    #[inline]
    pub fn same_as(&self, other: &AssetHandle) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    pub fn read(&self) -> RwLockReadGuard<'_, InputAsset> {
        self.0.read()
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, InputAsset> {
        self.0.write()
    }

    pub fn name(&self) -> String {
        self.0.read().name.clone()
    }

    /// Value copy of the current state.
    pub fn snapshot(&self) -> InputAsset {
        self.0.read().clone()
    }

    /// Resolve `map/action` into a handle that keeps pointing at this asset.
    pub fn action(&self, map: &str, action: &str) -> Option<ActionHandle> {
        let asset = self.0.read();
        let map = asset.find_action_map(map)?;
        let action = map.find_action(action)?;
        if map.id.is_empty() || action.id.is_empty() {
            return None;
        }
        Some(ActionHandle {
            asset: self.clone(),
            map_id: map.id.clone(),
            action_id: action.id.clone(),
        })
    }
}

impl PartialEq for AssetHandle {
    fn eq(&self, other: &Self) -> bool {
        self.same_as(other)
    }
}
impl Eq for AssetHandle {}

impl Hash for AssetHandle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id().hash(state);
    }
}

impl fmt::Debug for AssetHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssetHandle")
            .field("id", &self.id())
            .field("name", &self.0.read().name)
            .finish()
    }
}

/// An action inside a live asset, addressed by map id and action id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionHandle {
    asset: AssetHandle,
    map_id: String,
    action_id: String,
}

impl ActionHandle {
    /// The asset this action belongs to, reached through its map.
    /// `None` once the map or action is gone from the asset.
    pub fn owning_asset(&self) -> Option<&AssetHandle> {
        self.with_action(|_| ()).map(|_| &self.asset)
    }

    pub fn name(&self) -> Option<String> {
        self.with_action(|a| a.name.clone())
    }

    pub fn map_name(&self) -> Option<String> {
        self.asset
            .read()
            .maps
            .iter()
            .find(|m| m.id == self.map_id)
            .map(|m| m.name.clone())
    }

    pub fn with_action<R>(&self, f: impl FnOnce(&InputAction) -> R) -> Option<R> {
        let asset = self.asset.read();
        asset
            .maps
            .iter()
            .find(|m| m.id == self.map_id)
            .and_then(|m| m.actions.iter().find(|a| a.id == self.action_id))
            .map(f)
    }

    pub fn with_action_mut<R>(&self, f: impl FnOnce(&mut InputAction) -> R) -> Option<R> {
        let mut asset = self.asset.write();
        asset
            .maps
            .iter_mut()
            .find(|m| m.id == self.map_id)
            .and_then(|m| m.actions.iter_mut().find(|a| a.id == self.action_id))
            .map(f)
    }
}

/// Named reference object pointing at an action (may dangle).
#[derive(Clone, Debug)]
pub struct ActionReference {
    pub name: String,
    pub action: Option<ActionHandle>,
}

impl ActionReference {
    pub fn new<N: Into<String>>(name: N, action: Option<ActionHandle>) -> Self {
        Self {
            name: name.into(),
            action,
        }
    }

    pub fn asset(&self) -> Option<&AssetHandle> {
        self.action.as_ref().and_then(ActionHandle::owning_asset)
    }

    pub fn action_name(&self) -> Option<String> {
        self.action.as_ref().and_then(ActionHandle::name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        action::{ActionType, InputAction},
        action_map::ActionMap,
        binding::InputBinding,
    };

    fn sample() -> InputAsset {
        InputAsset::new("Controls")
            .with_map(ActionMap::new("UI").with_action(InputAction::new("Sort", ActionType::Button)))
    }

    #[test]
    fn identity_is_pointer_not_content() {
        let a = AssetHandle::new(sample());
        let b = AssetHandle::new(sample());
        let a2 = a.clone();

        assert_eq!(a, a2);
        assert_eq!(a.id(), a2.id());
        assert_ne!(a, b);
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn action_handle_reaches_owning_asset() {
        let asset = AssetHandle::new(sample());
        let handle = asset.action("UI", "Sort").unwrap();

        assert_eq!(handle.name().as_deref(), Some("Sort"));
        assert_eq!(handle.map_name().as_deref(), Some("UI"));
        assert!(handle.owning_asset().unwrap().same_as(&asset));
        assert!(asset.action("UI", "Missing").is_none());
        assert!(asset.action("Gameplay", "Sort").is_none());
    }

    #[test]
    fn action_handle_follows_the_action_not_its_position() {
        let asset = AssetHandle::new(
            InputAsset::new("Controls")
                .with_map(
                    ActionMap::new("UI")
                        .with_action(InputAction::new("Sort", ActionType::Button))
                        .with_action(InputAction::new("NextRound", ActionType::Button)),
                )
                .with_map(ActionMap::new("Gameplay")),
        );
        let handle = asset.action("UI", "NextRound").unwrap();

        asset.write().maps[0].actions.remove(0);
        assert_eq!(handle.name().as_deref(), Some("NextRound"));

        asset.write().maps[0]
            .actions
            .insert(0, InputAction::new("Added", ActionType::Button));
        asset.write().maps.swap(0, 1);
        assert_eq!(handle.name().as_deref(), Some("NextRound"));
        assert_eq!(handle.map_name().as_deref(), Some("UI"));
    }

    #[test]
    fn wrapping_links_bindings_and_fills_ids() {
        let mut next = InputAction::new("Next", ActionType::Button);
        next.id.clear();
        next.bindings.push(InputBinding::new("<Keyboard>/n").with_groups("Keyboard&Mouse"));
        let mut map = ActionMap::new("UI").with_action(next);
        map.id.clear();
        let asset = AssetHandle::new(InputAsset::new("Controls").with_map(map));

        let live = asset.snapshot();
        assert!(!live.maps[0].id.is_empty());
        assert!(!live.maps[0].actions[0].id.is_empty());
        assert_eq!(live.maps[0].actions[0].bindings[0].action, "Next");
        assert!(asset.action("UI", "Next").is_some());
    }

    #[test]
    fn detached_action_has_no_owner() {
        let asset = AssetHandle::new(sample());
        let handle = asset.action("UI", "Sort").unwrap();
        asset.write().maps.clear();

        assert!(handle.owning_asset().is_none());
        let reference = ActionReference::new("UI/Sort", Some(handle));
        assert!(reference.asset().is_none());
        assert!(reference.action_name().is_none());
    }
}
