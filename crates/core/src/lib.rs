//! Core library for discovering, dumping and rebinding input-binding assets of a running host.
//!
//! This crate is UI-agnostic and host-agnostic. It exposes:
//! - `model`: asset -> action map -> action -> binding, plus identity handles.
//! - `host`: traits the runtime graph implements, and an in-memory `SceneGraph`.
//! - `locator` + `collector`: find binders on every surface and the assets they point at.
//! - `codec` + `display`: the persisted document format and the binding lookup table.
//! - `rebind` + `export`: in-place overrides and the sentinel-gated export pipeline.
//! - `core_log::CoreLog`: thin logging trait the host (CLI/tests) can implement.
//!
//! Import the `prelude` if you want the most common types in scope.

pub mod core_log;

pub mod codec;
pub mod collector;
pub mod config;
pub mod constants;
pub mod display;
pub mod export;
pub mod host;
pub mod locator;
pub mod model;
pub mod rebind;

/// Convenient re-exports for downstream users (CLI/tests).
pub use core_log::CoreLog;

pub mod prelude {
    pub use crate::core_log::{BufferLog, CoreLog, Level, NoopLog};

    // Binding model
    pub use crate::model::action::{ActionType, InputAction};
    pub use crate::model::action_map::ActionMap;
    pub use crate::model::asset::InputAsset;
    pub use crate::model::binding::InputBinding;
    pub use crate::model::handle::{ActionHandle, ActionReference, AssetHandle, AssetId};

    // Host interfaces
    pub use crate::host::graph::{Binder, BinderKind, GraphNode, ObjectId, RuntimeGraph};
    pub use crate::host::inspect::{Field, FieldInspectable, FieldValue};
    pub use crate::host::memory::{BinderSpec, ObjectSpec, SceneGraph, SceneSnapshot};

    // Discovery
    pub use crate::collector::Collector;
    pub use crate::collector::merge::{DiscoveredSet, DiscoveryRecord, Provenance};
    pub use crate::collector::summary::CollectionSummary;
    pub use crate::locator::{LocateError, Located, locate};

    // Documents + display
    pub use crate::codec::decode::{decode_display, decode_document, decode_document_for_display};
    pub use crate::codec::document::{DisplayAsset, ExportDocument};
    pub use crate::codec::encode::{encode_display, encode_document};
    pub use crate::display::{BindingRow, BindingTable};

    // Rebind + export
    pub use crate::config::DumpConfig;
    pub use crate::export::{ExportGate, ExportOutcome, ExportPipeline};
    pub use crate::rebind::{Override, RebindError, apply_rebind};
}
