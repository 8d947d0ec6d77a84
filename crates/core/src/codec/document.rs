use serde::{Deserialize, Serialize};

use crate::codec::serde_helpers::{bool_from_bool_or_str, string_or_null};
use crate::model::asset::InputAsset;

/// Parsed export document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportDocument {
    pub items: Vec<ExportItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportItem {
    pub source: String,
    pub data: InputAsset,
}

/// Reduced, display-only view of an asset. `maps == None` means "no data".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayAsset {
    #[serde(deserialize_with = "string_or_null")]
    pub name: String,
    pub maps: Option<Vec<DisplayMap>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayMap {
    #[serde(deserialize_with = "string_or_null")]
    pub name: String,
    #[serde(deserialize_with = "string_or_null")]
    pub id: String,
    pub actions: Vec<DisplayAction>,
    /// Bindings of every action in the map, flat; `action` says which one.
    pub bindings: Vec<DisplayBinding>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayAction {
    #[serde(deserialize_with = "string_or_null")]
    pub name: String,
    #[serde(rename = "type", deserialize_with = "string_or_null")]
    pub action_type: String,
    #[serde(deserialize_with = "string_or_null")]
    pub id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DisplayBinding {
    #[serde(deserialize_with = "string_or_null")]
    pub name: String,
    #[serde(deserialize_with = "string_or_null")]
    pub id: String,
    #[serde(deserialize_with = "string_or_null")]
    pub path: String,
    #[serde(deserialize_with = "string_or_null")]
    pub groups: String,
    #[serde(deserialize_with = "string_or_null")]
    pub action: String,
    #[serde(deserialize_with = "bool_from_bool_or_str")]
    pub is_composite: bool,
    #[serde(deserialize_with = "bool_from_bool_or_str")]
    pub is_part_of_composite: bool,
}

impl DisplayAsset {
    /// Render state for an unreadable or empty document.
    pub fn no_data() -> Self {
        Self::default()
    }

    #[inline]
    pub fn has_data(&self) -> bool {
        self.maps.is_some()
    }
}

impl From<&InputAsset> for DisplayAsset {
    fn from(asset: &InputAsset) -> Self {
        DisplayAsset {
            name: asset.name.clone(),
            maps: Some(
                asset
                    .maps
                    .iter()
                    .map(|m| DisplayMap {
                        name: m.name.clone(),
                        id: m.id.clone(),
                        actions: m
                            .actions
                            .iter()
                            .map(|a| DisplayAction {
                                name: a.name.clone(),
                                action_type: a.action_type.name().to_string(),
                                id: a.id.clone(),
                            })
                            .collect(),
                        bindings: m
                            .actions
                            .iter()
                            .flat_map(|a| a.bindings.iter())
                            .map(|b| DisplayBinding {
                                name: b.name.clone(),
                                id: b.id.clone(),
                                path: b.path.clone(),
                                groups: b.groups.clone(),
                                action: b.action.clone(),
                                is_composite: b.is_composite,
                                is_part_of_composite: b.is_part_of_composite,
                            })
                            .collect(),
                    })
                    .collect(),
            ),
        }
    }
}
