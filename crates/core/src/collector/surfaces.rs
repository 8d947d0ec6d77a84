use std::sync::Arc;

use crate::core_log::CoreLog;
use crate::host::graph::{Binder, BinderKind, GraphNode, RuntimeGraph};

/// How a candidate binder was reached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    Registry,
    ExhaustiveScan,
    Hierarchical { root: String },
}

pub struct Candidate {
    pub binder: Arc<dyn Binder>,
    pub origin: Origin,
}

#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Deepest level visited below each hierarchy scan root (the root is level 0).
    pub max_depth: usize,
    /// Lower-case name fragments that mark a container as a UI root.
    pub ui_root_markers: Vec<String>,
}

/// One way of finding binders. Surfaces only enumerate; dedup happens in the collector.
pub trait DiscoverySurface {
    fn scan(
        &self,
        graph: &dyn RuntimeGraph,
        kind: BinderKind,
        log: &Arc<dyn CoreLog>,
    ) -> Vec<Candidate>;
}

/// Active binders the runtime knows about.
pub struct RegistryScan;

impl DiscoverySurface for RegistryScan {
    fn scan(
        &self,
        graph: &dyn RuntimeGraph,
        kind: BinderKind,
        log: &Arc<dyn CoreLog>,
    ) -> Vec<Candidate> {
        let found = graph.live_binders(kind);
        log.info(&format!(
            "[collect] registry: found {} active {kind} components",
            found.len()
        ));
        found
            .into_iter()
            .map(|binder| Candidate {
                binder,
                origin: Origin::Registry,
            })
            .collect()
    }
}

/// Every binder instance, keeping only the ones living in a loaded scene.
pub struct ExhaustiveScan;

impl DiscoverySurface for ExhaustiveScan {
    fn scan(
        &self,
        graph: &dyn RuntimeGraph,
        kind: BinderKind,
        log: &Arc<dyn CoreLog>,
    ) -> Vec<Candidate> {
        let all = graph.all_binders(kind);
        let total = all.len();
        let resident: Vec<Candidate> = all
            .into_iter()
            .filter(|b| b.is_scene_resident())
            .map(|binder| Candidate {
                binder,
                origin: Origin::ExhaustiveScan,
            })
            .collect();
        log.info(&format!(
            "[collect] exhaustive: found {total} total {kind} components (including inactive), {} in scenes",
            resident.len()
        ));
        resident
    }
}

/// Depth-bounded walk below canvases and UI-named containers.
pub struct HierarchyScan {
    options: ScanOptions,
}

impl HierarchyScan {
    pub fn new(options: ScanOptions) -> Self {
        Self { options }
    }

    fn is_ui_root(&self, node: &dyn GraphNode) -> bool {
        let name = node.name().to_lowercase();
        self.options
            .ui_root_markers
            .iter()
            .any(|m| name.contains(m.as_str()))
    }

    /// Canvases first, then name-matched containers that are not canvases.
    fn roots(&self, graph: &dyn RuntimeGraph) -> Vec<Arc<dyn GraphNode>> {
        let containers = graph.containers();
        let (canvases, rest): (Vec<_>, Vec<_>) =
            containers.into_iter().partition(|n| n.is_canvas());
        canvases
            .into_iter()
            .chain(rest.into_iter().filter(|n| self.is_ui_root(n.as_ref())))
            .collect()
    }

    fn visit(
        &self,
        node: &dyn GraphNode,
        depth: usize,
        kind: BinderKind,
        out: &mut Vec<Arc<dyn Binder>>,
    ) -> Result<(), String> {
        if depth > self.options.max_depth {
            return Ok(());
        }
        if let Some(binder) = node.binder(kind) {
            out.push(binder);
        }
        for child in node.children()? {
            self.visit(child.as_ref(), depth + 1, kind, out)?;
        }
        Ok(())
    }
}

impl DiscoverySurface for HierarchyScan {
    fn scan(
        &self,
        graph: &dyn RuntimeGraph,
        kind: BinderKind,
        log: &Arc<dyn CoreLog>,
    ) -> Vec<Candidate> {
        let mut out = Vec::new();
        for root in self.roots(graph) {
            let mut found = Vec::new();
            // Whatever was found before a failure is kept.
            if let Err(e) = self.visit(root.as_ref(), 0, kind, &mut found) {
                log.error(&format!(
                    "[collect] error during UI hierarchy search for {kind} under '{}': {e}",
                    root.name()
                ));
            }
            out.extend(found.into_iter().map(|binder| Candidate {
                binder,
                origin: Origin::Hierarchical {
                    root: root.name().to_string(),
                },
            }));
        }
        log.info(&format!(
            "[collect] hierarchy: {} {kind} candidates",
            out.len()
        ));
        out
    }
}

/// Surfaces in the order they run.
pub fn default_surfaces(options: &ScanOptions) -> Vec<Box<dyn DiscoverySurface>> {
    vec![
        Box::new(RegistryScan),
        Box::new(ExhaustiveScan),
        Box::new(HierarchyScan::new(options.clone())),
    ]
}
