//! Binder discovery across the host's overlapping surfaces.
//!
//! Each `collect` pass starts empty, runs every surface for every binder kind, and
//! folds candidates into two sets: binders (deduped by object id, partitioned by kind)
//! and assets (deduped by identity, first-seen provenance wins). Failures on one
//! candidate or one hierarchy root are logged and skipped.

pub mod merge;
pub mod summary;
pub mod surfaces;

use std::sync::Arc;

use crate::config::DumpConfig;
use crate::core_log::CoreLog;
use crate::host::graph::{Binder, BinderKind, RuntimeGraph};
use crate::locator::{Located, locate};
use crate::model::handle::ActionReference;

use merge::{BinderSet, DiscoveredSet, DiscoveryRecord, Provenance};
use summary::CollectionSummary;
use surfaces::{Candidate, Origin, ScanOptions, default_surfaces};

pub struct Collector {
    log: Arc<dyn CoreLog>,
    options: ScanOptions,
    binders: BinderSet,
    discovered: DiscoveredSet,
}

impl Collector {
    pub fn new(log: Arc<dyn CoreLog>) -> Self {
        Self::with_config(log, &DumpConfig::default())
    }

    pub fn with_config(log: Arc<dyn CoreLog>, config: &DumpConfig) -> Self {
        Self::with_options(log, config.scan_options())
    }

    pub fn with_options(log: Arc<dyn CoreLog>, options: ScanOptions) -> Self {
        Self {
            log,
            options,
            binders: BinderSet::default(),
            discovered: DiscoveredSet::default(),
        }
    }

    /// Rebuild the binder and asset sets from scratch.
    pub fn collect(&mut self, graph: &dyn RuntimeGraph) {
        self.binders = BinderSet::default();
        self.discovered = DiscoveredSet::default();

        for surface in default_surfaces(&self.options) {
            for kind in BinderKind::ALL {
                let candidates = surface.scan(graph, kind, &self.log);
                for candidate in candidates {
                    self.admit(candidate);
                }
            }
        }

        self.log_summary();
    }

    fn admit(&mut self, candidate: Candidate) {
        let Candidate { binder, origin } = candidate;
        if !self.binders.insert(binder.clone()) {
            return;
        }
        if let Origin::Hierarchical { root } = &origin {
            self.log.info(&format!(
                "[collect] found {} in UI hierarchy: {} (root {root})",
                binder.kind(),
                binder.owner_name()
            ));
        }

        let located = match locate(binder.as_ref()) {
            Ok(Some(located)) => located,
            Ok(None) => {
                self.log.debug(&format!(
                    "[collect] {} on {} carries no asset",
                    binder.kind(),
                    binder.owner_name()
                ));
                return;
            }
            Err(e) => {
                self.log.error(&format!("[collect] {e}"));
                return;
            }
        };

        let record = DiscoveryRecord {
            provenance: provenance(&origin, binder.as_ref(), &located),
            asset: located.asset,
            binder: binder.object_id(),
        };
        let source = record.source();
        let name = record.asset.name();
        if self.discovered.insert(record) {
            self.log
                .info(&format!("[collect] asset '{name}' {source}"));
        } else {
            self.log.debug(&format!(
                "[collect] asset '{name}' already discovered; dropping {source}"
            ));
        }
    }

    /// Binders of the momentary (button) kind.
    pub fn button_binders(&self) -> &[Arc<dyn Binder>] {
        self.binders.buttons()
    }

    /// Binders of the persistent (toggle) kind.
    pub fn toggle_binders(&self) -> &[Arc<dyn Binder>] {
        self.binders.toggles()
    }

    /// Combined view for older callers: buttons, then toggles.
    pub fn binders(&self) -> Vec<Arc<dyn Binder>> {
        self.binders
            .buttons()
            .iter()
            .chain(self.binders.toggles())
            .cloned()
            .collect()
    }

    pub fn discovered(&self) -> &DiscoveredSet {
        &self.discovered
    }

    pub fn records(&self) -> Vec<DiscoveryRecord> {
        self.discovered.iter().cloned().collect()
    }

    /// Action reference of the binder attached to control `name`; buttons before toggles.
    pub fn find_specified_action_ref(&self, name: &str) -> Option<ActionReference> {
        let found = Self::find_by_control(self.binders.buttons(), name)
            .and_then(|b| b.action_reference())
            .or_else(|| {
                Self::find_by_control(self.binders.toggles(), name)
                    .and_then(|b| b.action_reference())
            });
        if found.is_none() {
            self.log
                .warn(&format!("[find] no action reference for control '{name}'"));
        }
        found
    }

    pub fn find_button_binder(&self, name: &str) -> Option<&Arc<dyn Binder>> {
        let found = Self::find_by_control(self.binders.buttons(), name);
        if found.is_none() {
            self.log
                .warn(&format!("[find] no ButtonActionBinder for button '{name}'"));
        }
        found
    }

    pub fn find_toggle_binder(&self, name: &str) -> Option<&Arc<dyn Binder>> {
        let found = Self::find_by_control(self.binders.toggles(), name);
        if found.is_none() {
            self.log
                .warn(&format!("[find] no ToggleActionBinder for toggle '{name}'"));
        }
        found
    }

    fn find_by_control<'a>(
        binders: &'a [Arc<dyn Binder>],
        name: &str,
    ) -> Option<&'a Arc<dyn Binder>> {
        binders.iter().find(|b| b.control_name() == Some(name))
    }

    pub fn summary(&self) -> CollectionSummary {
        CollectionSummary {
            buttons: CollectionSummary::stats_for(self.binders.buttons()),
            toggles: CollectionSummary::stats_for(self.binders.toggles()),
            binders: self
                .binders()
                .iter()
                .map(|b| CollectionSummary::detail_for(b.as_ref()))
                .collect(),
            sources: self.discovered.iter().map(DiscoveryRecord::source).collect(),
        }
    }

    fn log_summary(&self) {
        let s = self.summary();
        self.log.info(&format!(
            "[collect] {}: {} (active {}, inactive {})",
            BinderKind::Button,
            s.buttons.total,
            s.buttons.active,
            s.buttons.inactive
        ));
        self.log.info(&format!(
            "[collect] {}: {} (active {}, inactive {})",
            BinderKind::Toggle,
            s.toggles.total,
            s.toggles.active,
            s.toggles.inactive
        ));
        for d in &s.binders {
            let state = if d.active { "Active" } else { "Inactive" };
            self.log.debug(&format!(
                "[collect] [{state}] {} on {} control={} action={}",
                d.kind,
                d.owner,
                d.control.as_deref().unwrap_or("-"),
                d.action.as_deref().unwrap_or("-")
            ));
        }
        self.log.info(&format!(
            "[collect] {} binders total; {} assets discovered",
            s.total(),
            self.discovered.len()
        ));
    }
}

fn provenance(origin: &Origin, binder: &dyn Binder, located: &Located) -> Provenance {
    match origin {
        Origin::Registry => Provenance::Registry {
            kind: binder.kind(),
            owner: binder.owner_name().to_string(),
        },
        Origin::ExhaustiveScan => Provenance::ExhaustiveScan {
            detail: located.describe(),
        },
        Origin::Hierarchical { root } => Provenance::Hierarchical {
            root: root.clone(),
            detail: located.describe(),
        },
    }
}
