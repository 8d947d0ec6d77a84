//! Read-only lookups for the display layer: "keyboard / gamepad binding of action A".
//!
//! Selection scans bindings in declaration order and takes the first one that names
//! the action, is not part of a composite, and whose `groups` text contains the
//! requested group. The group test is a substring match, so `"Keyboard"` matches
//! `"Keyboard&Mouse"` and any comma-joined list mentioning it.

use serde::Serialize;

use crate::codec::document::{DisplayAsset, DisplayBinding, DisplayMap};
use crate::config::DumpConfig;
use crate::constants::{DEVICE_PREFIX, NONE_LABEL, TABLE_ACTION_TYPE};
use crate::model::{action::InputAction, binding::InputBinding};

/// The few binding fields the lookup policy looks at.
pub trait BindingView {
    fn action_name(&self) -> &str;
    fn path(&self) -> &str;
    fn groups(&self) -> &str;
    fn is_composite(&self) -> bool;
    fn is_part_of_composite(&self) -> bool;

    fn is_standalone(&self) -> bool {
        !self.is_composite() && !self.is_part_of_composite()
    }
}

impl BindingView for InputBinding {
    fn action_name(&self) -> &str {
        &self.action
    }
    fn path(&self) -> &str {
        &self.path
    }
    fn groups(&self) -> &str {
        &self.groups
    }
    fn is_composite(&self) -> bool {
        self.is_composite
    }
    fn is_part_of_composite(&self) -> bool {
        self.is_part_of_composite
    }
    fn is_standalone(&self) -> bool {
        InputBinding::is_standalone(self)
    }
}

impl BindingView for DisplayBinding {
    fn action_name(&self) -> &str {
        &self.action
    }
    fn path(&self) -> &str {
        &self.path
    }
    fn groups(&self) -> &str {
        &self.groups
    }
    fn is_composite(&self) -> bool {
        self.is_composite
    }
    fn is_part_of_composite(&self) -> bool {
        self.is_part_of_composite
    }
}

pub fn select_binding<'a, B, I>(bindings: I, action: &str, group: &str) -> Option<&'a B>
where
    B: BindingView + 'a,
    I: IntoIterator<Item = &'a B>,
{
    bindings.into_iter().find(|b| {
        b.action_name() == action && b.is_standalone() && b.groups().contains(group)
    })
}

/// Control path without its `<Keyboard>/` or `<Gamepad>/` prefix.
pub fn strip_device_prefix(path: &str) -> &str {
    match DEVICE_PREFIX.find(path) {
        Some(m) => &path[m.end()..],
        None => path,
    }
}

/// Display text for `action` in `group`, or `"None"`.
pub fn binding_text<'a, B, I>(bindings: I, action: &str, group: &str) -> String
where
    B: BindingView + 'a,
    I: IntoIterator<Item = &'a B>,
{
    select_binding(bindings, action, group)
        .map(|b| strip_device_prefix(b.path()).to_string())
        .unwrap_or_else(|| NONE_LABEL.to_string())
}

impl DisplayMap {
    pub fn binding_text(&self, action: &str, group: &str) -> String {
        binding_text(&self.bindings, action, group)
    }
}

impl InputAction {
    pub fn binding_text(&self, group: &str) -> String {
        binding_text(&self.bindings, &self.name, group)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BindingRow {
    pub map: String,
    pub action: String,
    pub keyboard: String,
    pub gamepad: String,
}

/// Action -> (keyboard text, gamepad text), one row per button action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum BindingTable {
    /// The document had no maps (absent or unreadable).
    NoData,
    Rows(Vec<BindingRow>),
}

impl BindingTable {
    pub fn from_display(asset: &DisplayAsset, config: &DumpConfig) -> Self {
        let Some(maps) = asset.maps.as_ref() else {
            return BindingTable::NoData;
        };
        let rows = maps
            .iter()
            .flat_map(|map| {
                map.actions
                    .iter()
                    .filter(|a| a.action_type == TABLE_ACTION_TYPE)
                    .map(move |a| BindingRow {
                        map: map.name.clone(),
                        action: a.name.clone(),
                        keyboard: map.binding_text(&a.name, &config.keyboard_group),
                        gamepad: map.binding_text(&a.name, &config.gamepad_group),
                    })
            })
            .collect();
        BindingTable::Rows(rows)
    }

    pub fn rows(&self) -> &[BindingRow] {
        match self {
            BindingTable::NoData => &[],
            BindingTable::Rows(rows) => rows,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::document::DisplayAction;
    use crate::model::action::ActionType;

    fn jump() -> InputAction {
        let mut a = InputAction::new("Jump", ActionType::Button);
        a.add_binding("<Keyboard>/space", "Keyboard&Mouse");
        a.add_binding("<Gamepad>/buttonSouth", "Gamepad");
        a
    }

    #[test]
    fn group_substring_selects_binding() {
        let a = jump();
        assert_eq!(a.binding_text("Keyboard"), "space");
        assert_eq!(a.binding_text("Gamepad"), "buttonSouth");
        assert_eq!(a.binding_text("Touch"), "None");
    }

    #[test]
    fn composites_are_never_selected() {
        let mut a = InputAction::new("Move", ActionType::Value);
        a.push_binding(InputBinding::composite("WASD").with_groups("Keyboard&Mouse"));
        a.push_binding(InputBinding::part("up", "<Keyboard>/w").with_groups("Keyboard&Mouse"));
        assert_eq!(a.binding_text("Keyboard&Mouse"), "None");

        a.add_binding("<Keyboard>/upArrow", "Keyboard&Mouse");
        assert_eq!(a.binding_text("Keyboard&Mouse"), "upArrow");
    }

    #[test]
    fn first_match_in_declaration_order_and_multi_group_tags() {
        let mut a = InputAction::new("Sort", ActionType::Button);
        a.add_binding("<Keyboard>/s", "Keyboard&Mouse,Gamepad");
        a.add_binding("<Gamepad>/buttonWest", "Gamepad");
        assert_eq!(a.binding_text("Gamepad"), "s");
    }

    #[test]
    fn other_action_bindings_are_skipped() {
        let bindings = vec![
            InputBinding::new("<Keyboard>/a").with_groups("Keyboard&Mouse").with_action("Other"),
            InputBinding::new("<Keyboard>/b").with_groups("Keyboard&Mouse").with_action("Sort"),
        ];
        assert_eq!(binding_text(&bindings, "Sort", "Keyboard"), "b");
    }

    #[test]
    fn only_leading_device_prefix_is_stripped() {
        assert_eq!(strip_device_prefix("<Keyboard>/space"), "space");
        assert_eq!(strip_device_prefix("<Gamepad>/start"), "start");
        assert_eq!(strip_device_prefix("<Mouse>/leftButton"), "<Mouse>/leftButton");
        assert_eq!(strip_device_prefix("x<Keyboard>/y"), "x<Keyboard>/y");
    }

    #[test]
    fn table_rows_for_button_actions_only() {
        let asset = DisplayAsset {
            name: "Controls".into(),
            maps: Some(vec![DisplayMap {
                name: "UI".into(),
                id: "m".into(),
                actions: vec![
                    DisplayAction {
                        name: "NextRound".into(),
                        action_type: "Button".into(),
                        id: "1".into(),
                    },
                    DisplayAction {
                        name: "Point".into(),
                        action_type: "PassThrough".into(),
                        id: "2".into(),
                    },
                ],
                bindings: vec![DisplayBinding {
                    path: "<Keyboard>/n".into(),
                    groups: "Keyboard&Mouse".into(),
                    action: "NextRound".into(),
                    ..DisplayBinding::default()
                }],
            }]),
        };

        let table = BindingTable::from_display(&asset, &DumpConfig::default());
        assert_eq!(
            table.rows(),
            &[BindingRow {
                map: "UI".into(),
                action: "NextRound".into(),
                keyboard: "n".into(),
                gamepad: "None".into(),
            }]
        );
        assert_eq!(
            BindingTable::from_display(&DisplayAsset::no_data(), &DumpConfig::default()),
            BindingTable::NoData
        );
    }
}
