use serde::Serialize;

use crate::host::graph::{Binder, BinderKind};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct KindStats {
    pub total: usize,
    pub active: usize,
    pub inactive: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BinderDetail {
    pub kind: BinderKind,
    pub owner: String,
    pub control: Option<String>,
    pub action: Option<String>,
    pub active: bool,
}

/// Read-only statistics over one collection pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CollectionSummary {
    pub buttons: KindStats,
    pub toggles: KindStats,
    pub binders: Vec<BinderDetail>,
    /// Provenance of every discovered asset, first-seen order.
    pub sources: Vec<String>,
}

impl CollectionSummary {
    pub fn total(&self) -> usize {
        self.buttons.total + self.toggles.total
    }

    pub(crate) fn stats_for(binders: &[std::sync::Arc<dyn Binder>]) -> KindStats {
        let active = binders.iter().filter(|b| b.is_active()).count();
        KindStats {
            total: binders.len(),
            active,
            inactive: binders.len() - active,
        }
    }

    pub(crate) fn detail_for(binder: &dyn Binder) -> BinderDetail {
        BinderDetail {
            kind: binder.kind(),
            owner: binder.owner_name().to_string(),
            control: binder.control_name().map(str::to_string),
            action: binder
                .action_reference()
                .map(|r| r.action_name().unwrap_or(r.name)),
            active: binder.is_active(),
        }
    }
}
