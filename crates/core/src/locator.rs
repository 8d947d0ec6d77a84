//! Find the binding asset a container refers to, by inspecting its fields.
//!
//! Two shapes are recognised, in field order:
//! - a field holding an asset directly;
//! - a field declared as an action reference, whose referenced action resolves to an
//!   asset through its owning map (one extra hop through the reference object).

use core::fmt;

use crate::constants::{ACTION_REFERENCE_FIELD, ACTION_REFERENCE_KIND};
use crate::host::inspect::{FieldInspectable, FieldValue};
use crate::model::handle::AssetHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocatedVia {
    AssetField,
    ActionReference,
}

/// Asset found on a container plus a description of where.
#[derive(Debug, Clone)]
pub struct Located {
    pub asset: AssetHandle,
    pub via: LocatedVia,
    /// `Type.field`
    pub field: String,
    pub owner: String,
}

impl Located {
    /// `field Type.field on Owner` / `action reference field Type.field on Owner`
    pub fn describe(&self) -> String {
        match self.via {
            LocatedVia::AssetField => format!("field {} on {}", self.field, self.owner),
            LocatedVia::ActionReference => {
                format!("action reference field {} on {}", self.field, self.owner)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocateError {
    /// The container's fields could not be read.
    Inspection { owner: String, kind: String, reason: String },
}

impl fmt::Display for LocateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocateError::Inspection {
                owner,
                kind,
                reason,
            } => write!(f, "inspect {kind} on {owner}: {reason}"),
        }
    }
}

impl std::error::Error for LocateError {}

/// Inspect `container` for an asset. Pure; never mutates the container.
pub fn locate<C>(container: &C) -> Result<Option<Located>, LocateError>
where
    C: FieldInspectable + ?Sized,
{
    let fields = container
        .fields()
        .map_err(|reason| LocateError::Inspection {
            owner: container.object_name().to_string(),
            kind: container.type_name().to_string(),
            reason,
        })?;

    for field in fields {
        let hit = match &field.value {
            FieldValue::Asset(asset) => Some((asset.clone(), LocatedVia::AssetField)),
            FieldValue::Object(obj) if field.declared_kind.contains(ACTION_REFERENCE_KIND) => {
                resolve_reference(obj.as_ref()).map(|a| (a, LocatedVia::ActionReference))
            }
            _ => None,
        };
        if let Some((asset, via)) = hit {
            return Ok(Some(Located {
                asset,
                via,
                field: format!("{}.{}", container.type_name(), field.name),
                owner: container.object_name().to_string(),
            }));
        }
    }

    Ok(None)
}

/// Follow a reference object's `action` field to the action's asset.
/// An unreadable reference counts as "no asset"; only the outer container reports errors.
fn resolve_reference(reference: &dyn FieldInspectable) -> Option<AssetHandle> {
    let fields = reference.fields().ok()?;
    fields
        .into_iter()
        .filter(|f| f.name == ACTION_REFERENCE_FIELD)
        .find_map(|f| match f.value {
            FieldValue::Action(action) => action.owning_asset().cloned(),
            _ => None,
        })
}
