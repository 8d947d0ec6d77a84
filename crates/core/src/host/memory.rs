//! In-memory runtime graph built from a JSON scene snapshot.
//!
//! Used by the CLI to replay a captured scene and by tests to build synthetic
//! hierarchies. Objects under `templates` behave like prefab definitions: their
//! binders are visible to exhaustive scans but they are not scene-resident.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, sync::Arc};

use crate::host::graph::{Binder, BinderKind, GraphNode, ObjectId, RuntimeGraph};
use crate::host::inspect::{Field, FieldInspectable, FieldValue};
use crate::model::{
    asset::InputAsset,
    handle::{ActionReference, AssetHandle},
};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneSnapshot {
    pub assets: Vec<InputAsset>,
    pub scenes: Vec<SceneSpec>,
    pub templates: Vec<ObjectSpec>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneSpec {
    pub name: String,
    pub roots: Vec<ObjectSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectSpec {
    pub name: String,
    pub active: bool,
    pub canvas: bool,
    pub binders: Vec<BinderSpec>,
    pub children: Vec<ObjectSpec>,
}

impl Default for ObjectSpec {
    fn default() -> Self {
        Self {
            name: String::new(),
            active: true,
            canvas: false,
            binders: Vec::new(),
            children: Vec::new(),
        }
    }
}

impl ObjectSpec {
    pub fn new<N: Into<String>>(name: N) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    pub fn canvas(mut self) -> Self {
        self.canvas = true;
        self
    }

    pub fn child(mut self, child: ObjectSpec) -> Self {
        self.children.push(child);
        self
    }

    pub fn binder(mut self, binder: BinderSpec) -> Self {
        self.binders.push(binder);
        self
    }
}

/// `asset/map/action` address inside the snapshot's asset list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActionPath {
    pub asset: String,
    pub map: String,
    pub action: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BinderSpec {
    pub kind: BinderKind,
    #[serde(default)]
    pub control: Option<String>,
    #[serde(default = "enabled_default")]
    pub enabled: bool,
    #[serde(default)]
    pub action: Option<ActionPath>,
    /// Name of an asset held directly in a field of the binder.
    #[serde(default)]
    pub asset: Option<String>,
}

fn enabled_default() -> bool {
    true
}

impl BinderSpec {
    pub fn new(kind: BinderKind, control: Option<&str>) -> Self {
        Self {
            kind,
            control: control.map(str::to_string),
            enabled: true,
            action: None,
            asset: None,
        }
    }

    pub fn button(control: &str) -> Self {
        Self::new(BinderKind::Button, Some(control))
    }

    pub fn toggle(control: &str) -> Self {
        Self::new(BinderKind::Toggle, Some(control))
    }

    pub fn action(mut self, asset: &str, map: &str, action: &str) -> Self {
        self.action = Some(ActionPath {
            asset: asset.to_string(),
            map: map.to_string(),
            action: action.to_string(),
        });
        self
    }

    pub fn asset_field(mut self, asset: &str) -> Self {
        self.asset = Some(asset.to_string());
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

pub struct SceneBinder {
    id: ObjectId,
    kind: BinderKind,
    owner: String,
    control: Option<String>,
    active: bool,
    scene_resident: bool,
    action: Option<ActionReference>,
    asset: Option<AssetHandle>,
}

impl FieldInspectable for SceneBinder {
    fn type_name(&self) -> &str {
        self.kind.name()
    }

    fn object_name(&self) -> &str {
        &self.owner
    }

    fn fields(&self) -> Result<Vec<Field>, String> {
        let (control_field, control_kind) = match self.kind {
            BinderKind::Button => ("button", "Button"),
            BinderKind::Toggle => ("toggle", "Toggle"),
        };
        let mut out = vec![Field::new(
            control_field,
            control_kind,
            self.control
                .clone()
                .map_or(FieldValue::Null, FieldValue::Scalar),
        )];
        out.push(Field::new(
            "action",
            "InputActionReference",
            match &self.action {
                Some(r) => FieldValue::Object(Arc::new(r.clone())),
                None => FieldValue::Null,
            },
        ));
        if let Some(asset) = &self.asset {
            out.push(Field::new(
                "actions",
                "InputActionAsset",
                FieldValue::Asset(asset.clone()),
            ));
        }
        Ok(out)
    }
}

impl Binder for SceneBinder {
    fn object_id(&self) -> ObjectId {
        self.id
    }
    fn kind(&self) -> BinderKind {
        self.kind
    }
    fn owner_name(&self) -> &str {
        &self.owner
    }
    fn control_name(&self) -> Option<&str> {
        self.control.as_deref()
    }
    fn is_active(&self) -> bool {
        self.active
    }
    fn is_scene_resident(&self) -> bool {
        self.scene_resident
    }
    fn action_reference(&self) -> Option<ActionReference> {
        self.action.clone()
    }
}

pub struct SceneNode {
    name: String,
    /// Active in hierarchy (own flag and every ancestor's).
    active: bool,
    canvas: bool,
    binders: Vec<Arc<SceneBinder>>,
    children: Vec<Arc<SceneNode>>,
}

impl GraphNode for SceneNode {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_canvas(&self) -> bool {
        self.canvas
    }

    fn binder(&self, kind: BinderKind) -> Option<Arc<dyn Binder>> {
        self.binders
            .iter()
            .find(|b| b.kind == kind)
            .map(|b| b.clone() as Arc<dyn Binder>)
    }

    fn children(&self) -> Result<Vec<Arc<dyn GraphNode>>, String> {
        Ok(self
            .children
            .iter()
            .map(|c| c.clone() as Arc<dyn GraphNode>)
            .collect())
    }
}

pub struct SceneGraph {
    assets: IndexMap<String, AssetHandle>,
    scene_roots: Vec<Arc<SceneNode>>,
    templates: Vec<Arc<SceneNode>>,
}

impl SceneGraph {
    pub fn from_snapshot(snapshot: SceneSnapshot) -> Result<Self, String> {
        let mut assets = IndexMap::new();
        for asset in snapshot.assets {
            let name = asset.name.clone();
            if assets.insert(name.clone(), AssetHandle::new(asset)).is_some() {
                return Err(format!("duplicate asset '{name}' in snapshot"));
            }
        }

        let mut builder = Builder {
            assets: &assets,
            next_id: 1,
        };

        let mut scene_roots = Vec::new();
        for scene in &snapshot.scenes {
            for root in &scene.roots {
                scene_roots.push(builder.node(root, Some(&scene.name), true)?);
            }
        }
        let mut templates = Vec::new();
        for root in &snapshot.templates {
            templates.push(builder.node(root, None, true)?);
        }

        Ok(Self {
            assets,
            scene_roots,
            templates,
        })
    }

    pub fn from_json(content: &str) -> Result<Self, String> {
        let snapshot: SceneSnapshot =
            serde_json::from_str(content).map_err(|e| format!("parse scene snapshot: {e}"))?;
        Self::from_snapshot(snapshot)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let content = fs::read_to_string(&path)
            .map_err(|e| format!("read {}: {e}", path.as_ref().display()))?;
        Self::from_json(&content)
    }

    pub fn asset(&self, name: &str) -> Option<&AssetHandle> {
        self.assets.get(name)
    }

    pub fn assets(&self) -> impl Iterator<Item = &AssetHandle> {
        self.assets.values()
    }

    /// Pre-order walk over the given roots.
    fn walk<'a>(roots: &'a [Arc<SceneNode>]) -> Vec<&'a Arc<SceneNode>> {
        let mut out = Vec::new();
        let mut stack: Vec<&Arc<SceneNode>> = roots.iter().rev().collect();
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(node.children.iter().rev());
        }
        out
    }
}

impl RuntimeGraph for SceneGraph {
    fn live_binders(&self, kind: BinderKind) -> Vec<Arc<dyn Binder>> {
        Self::walk(&self.scene_roots)
            .into_iter()
            .flat_map(|n| n.binders.iter())
            .filter(|b| b.kind == kind && b.active)
            .map(|b| b.clone() as Arc<dyn Binder>)
            .collect()
    }

    fn all_binders(&self, kind: BinderKind) -> Vec<Arc<dyn Binder>> {
        Self::walk(&self.scene_roots)
            .into_iter()
            .chain(Self::walk(&self.templates))
            .flat_map(|n| n.binders.iter())
            .filter(|b| b.kind == kind)
            .map(|b| b.clone() as Arc<dyn Binder>)
            .collect()
    }

    fn containers(&self) -> Vec<Arc<dyn GraphNode>> {
        Self::walk(&self.scene_roots)
            .into_iter()
            .filter(|n| n.active)
            .map(|n| n.clone() as Arc<dyn GraphNode>)
            .collect()
    }
}

struct Builder<'a> {
    assets: &'a IndexMap<String, AssetHandle>,
    next_id: ObjectId,
}

impl<'a> Builder<'a> {
    fn node(
        &mut self,
        spec: &ObjectSpec,
        scene: Option<&str>,
        parent_active: bool,
    ) -> Result<Arc<SceneNode>, String> {
        let active = parent_active && spec.active;
        let scene_resident = scene.is_some_and(|s| !s.is_empty());

        let mut binders = Vec::with_capacity(spec.binders.len());
        for b in &spec.binders {
            let action = match &b.action {
                Some(path) => {
                    let asset = self.lookup_asset(&path.asset, &spec.name)?;
                    Some(ActionReference::new(
                        format!("{}/{}", path.map, path.action),
                        asset.action(&path.map, &path.action),
                    ))
                }
                None => None,
            };
            let asset = match &b.asset {
                Some(name) => Some(self.lookup_asset(name, &spec.name)?.clone()),
                None => None,
            };
            binders.push(Arc::new(SceneBinder {
                id: self.take_id(),
                kind: b.kind,
                owner: spec.name.clone(),
                control: b.control.clone(),
                active: active && b.enabled,
                scene_resident,
                action,
                asset,
            }));
        }

        let mut children = Vec::with_capacity(spec.children.len());
        for child in &spec.children {
            children.push(self.node(child, scene, active)?);
        }

        Ok(Arc::new(SceneNode {
            name: spec.name.clone(),
            active,
            canvas: spec.canvas,
            binders,
            children,
        }))
    }

    fn lookup_asset(&self, name: &str, owner: &str) -> Result<&'a AssetHandle, String> {
        self.assets
            .get(name)
            .ok_or_else(|| format!("unknown asset '{name}' referenced on '{owner}'"))
    }

    fn take_id(&mut self) -> ObjectId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}
