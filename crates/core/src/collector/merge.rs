use core::fmt;
use indexmap::IndexMap;
use std::{collections::HashSet, sync::Arc};

use crate::host::graph::{Binder, BinderKind, ObjectId};
use crate::model::handle::{AssetHandle, AssetId};

/// Where an asset was first found. Rendered to text only for logs and documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Provenance {
    Registry { kind: BinderKind, owner: String },
    ExhaustiveScan { detail: String },
    Hierarchical { root: String, detail: String },
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provenance::Registry { kind, owner } => write!(f, "registry: {kind} on {owner}"),
            Provenance::ExhaustiveScan { detail } => write!(f, "found via {detail}"),
            Provenance::Hierarchical { root, detail } => {
                write!(f, "found via {detail} under UI root {root}")
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct DiscoveryRecord {
    pub asset: AssetHandle,
    pub provenance: Provenance,
    /// Binder the asset was reached from.
    pub binder: ObjectId,
}

impl DiscoveryRecord {
    #[inline]
    pub fn source(&self) -> String {
        self.provenance.to_string()
    }
}

/// Assets keyed by identity, in first-seen order.
#[derive(Debug, Default)]
pub struct DiscoveredSet {
    records: IndexMap<AssetId, DiscoveryRecord>,
}

impl DiscoveredSet {
    /// First-seen wins: returns `false` and drops `record` if its asset is already present.
    pub fn insert(&mut self, record: DiscoveryRecord) -> bool {
        let id = record.asset.id();
        if self.records.contains_key(&id) {
            return false;
        }
        self.records.insert(id, record);
        true
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn contains(&self, asset: &AssetHandle) -> bool {
        self.records.contains_key(&asset.id())
    }

    pub fn get(&self, asset: &AssetHandle) -> Option<&DiscoveryRecord> {
        self.records.get(&asset.id())
    }

    pub fn iter(&self) -> impl Iterator<Item = &DiscoveryRecord> {
        self.records.values()
    }
}

/// Fold records into a set under the first-seen-wins policy.
pub fn merge_first_seen<I>(records: I) -> DiscoveredSet
where
    I: IntoIterator<Item = DiscoveryRecord>,
{
    let mut set = DiscoveredSet::default();
    for r in records {
        set.insert(r);
    }
    set
}

/// Binders partitioned by kind, each object recorded once.
#[derive(Default)]
pub struct BinderSet {
    buttons: Vec<Arc<dyn Binder>>,
    toggles: Vec<Arc<dyn Binder>>,
    seen: HashSet<ObjectId>,
}

impl BinderSet {
    pub fn insert(&mut self, binder: Arc<dyn Binder>) -> bool {
        if !self.seen.insert(binder.object_id()) {
            return false;
        }
        match binder.kind() {
            BinderKind::Button => self.buttons.push(binder),
            BinderKind::Toggle => self.toggles.push(binder),
        }
        true
    }

    pub fn buttons(&self) -> &[Arc<dyn Binder>] {
        &self.buttons
    }

    pub fn toggles(&self) -> &[Arc<dyn Binder>] {
        &self.toggles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::asset::InputAsset;

    fn record(asset: &AssetHandle, provenance: Provenance, binder: ObjectId) -> DiscoveryRecord {
        DiscoveryRecord {
            asset: asset.clone(),
            provenance,
            binder,
        }
    }

    #[test]
    fn first_seen_provenance_wins() {
        let a = AssetHandle::new(InputAsset::new("Controls"));
        let b = AssetHandle::new(InputAsset::new("Controls"));

        let set = merge_first_seen(vec![
            record(
                &a,
                Provenance::Registry {
                    kind: BinderKind::Button,
                    owner: "Sort".into(),
                },
                1,
            ),
            record(
                &a,
                Provenance::ExhaustiveScan {
                    detail: "field X.y on Z".into(),
                },
                2,
            ),
            record(
                &b,
                Provenance::Hierarchical {
                    root: "MainUI".into(),
                    detail: "field X.y on W".into(),
                },
                3,
            ),
        ]);

        assert_eq!(set.len(), 2);
        let first = set.get(&a).unwrap();
        assert_eq!(first.binder, 1);
        assert_eq!(first.source(), "registry: ButtonActionBinder on Sort");
        // Same content, different allocation: a separate asset.
        assert_eq!(
            set.get(&b).unwrap().source(),
            "found via field X.y on W under UI root MainUI"
        );
        let order: Vec<ObjectId> = set.iter().map(|r| r.binder).collect();
        assert_eq!(order, vec![1, 3]);
    }
}
