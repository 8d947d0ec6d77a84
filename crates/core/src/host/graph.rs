use core::fmt;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::host::inspect::FieldInspectable;
use crate::model::handle::ActionReference;

/// Host-assigned identity of a runtime object.
pub type ObjectId = u64;

/// The two binder component kinds the collector partitions into.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum BinderKind {
    /// Momentary, attached to a button control.
    Button,
    /// Persistent, attached to a toggle control.
    Toggle,
}

impl BinderKind {
    pub fn name(&self) -> &'static str {
        match self {
            BinderKind::Button => "ButtonActionBinder",
            BinderKind::Toggle => "ToggleActionBinder",
        }
    }

    pub const ALL: [BinderKind; 2] = [BinderKind::Button, BinderKind::Toggle];
}

impl fmt::Display for BinderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A component that wires a UI control to an input action.
pub trait Binder: FieldInspectable {
    fn object_id(&self) -> ObjectId;
    fn kind(&self) -> BinderKind;
    /// Name of the object the binder sits on.
    fn owner_name(&self) -> &str;
    /// Name of the associated button/toggle control, if there is one.
    fn control_name(&self) -> Option<&str>;
    /// Active in the hierarchy and enabled.
    fn is_active(&self) -> bool;
    /// Lives in a loaded scene (as opposed to a template/prefab definition).
    fn is_scene_resident(&self) -> bool;
    fn action_reference(&self) -> Option<ActionReference>;
}

/// One container in the parent -> children hierarchy.
pub trait GraphNode: Send + Sync {
    fn name(&self) -> &str;
    fn is_canvas(&self) -> bool;
    fn binder(&self, kind: BinderKind) -> Option<Arc<dyn Binder>>;
    fn children(&self) -> Result<Vec<Arc<dyn GraphNode>>, String>;
}

/// Everything the collector needs from the host runtime.
pub trait RuntimeGraph {
    /// Active binders of `kind` in loaded scenes.
    fn live_binders(&self, kind: BinderKind) -> Vec<Arc<dyn Binder>>;
    /// Every binder of `kind`, inactive and template ones included.
    fn all_binders(&self, kind: BinderKind) -> Vec<Arc<dyn Binder>>;
    /// Every live container, at any depth. Hierarchy scans pick their roots from these.
    fn containers(&self) -> Vec<Arc<dyn GraphNode>>;
}
