use std::sync::Arc;

use crate::constants::{ACTION_REFERENCE_FIELD, ACTION_REFERENCE_KIND};
use crate::model::handle::{ActionHandle, ActionReference, AssetHandle};

/// Value read off a named field.
#[derive(Clone)]
pub enum FieldValue {
    Null,
    Scalar(String),
    Asset(AssetHandle),
    Action(ActionHandle),
    /// Reference to another inspectable object.
    Object(Arc<dyn FieldInspectable>),
}

/// `(name, declared kind, value)` triple exposed by a container.
#[derive(Clone)]
pub struct Field {
    pub name: String,
    /// Declared type of the field, not of the value it currently holds.
    pub declared_kind: String,
    pub value: FieldValue,
}

impl Field {
    pub fn new<N: Into<String>, K: Into<String>>(name: N, declared_kind: K, value: FieldValue) -> Self {
        Self {
            name: name.into(),
            declared_kind: declared_kind.into(),
            value,
        }
    }
}

/// Reflection-like access to an object's fields.
pub trait FieldInspectable: Send + Sync {
    /// Runtime type name, used in provenance and log lines.
    fn type_name(&self) -> &str;

    /// Name of the object (or the object it is attached to).
    fn object_name(&self) -> &str;

    /// Read every field. An `Err` means the object could not be inspected at all.
    fn fields(&self) -> Result<Vec<Field>, String>;
}

impl FieldInspectable for ActionReference {
    fn type_name(&self) -> &str {
        ACTION_REFERENCE_KIND
    }

    fn object_name(&self) -> &str {
        &self.name
    }

    fn fields(&self) -> Result<Vec<Field>, String> {
        let value = match &self.action {
            Some(handle) => FieldValue::Action(handle.clone()),
            None => FieldValue::Null,
        };
        Ok(vec![Field::new(ACTION_REFERENCE_FIELD, "InputAction", value)])
    }
}
