//! Hand-written document emitter.
//!
//! Field order and escaping are fixed by documents already on disk; see `escape`.

use crate::codec::escape::escape;
use crate::collector::merge::DiscoveredSet;
use crate::model::{
    action::InputAction, action_map::ActionMap, asset::InputAsset, binding::InputBinding,
};

/// `{"items":[{"source":"...","data":{asset}}, ...]}` in discovery order.
pub fn encode_document(set: &DiscoveredSet) -> String {
    let mut out = String::from("{\"items\":[");
    for (i, record) in set.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        let asset = record.asset.read();
        write_item(&mut out, &record.source(), &asset);
    }
    out.push_str("]}");
    out
}

/// A single `{"source":..., "data":...}` entry.
pub fn encode_item(source: &str, asset: &InputAsset) -> String {
    let mut out = String::new();
    write_item(&mut out, source, asset);
    out
}

pub fn encode_asset(asset: &InputAsset) -> String {
    let mut out = String::new();
    write_asset(&mut out, asset);
    out
}

/// Reduced schema consumed by the binding table: bindings are listed per map.
pub fn encode_display(asset: &InputAsset) -> String {
    let mut out = String::from("{");
    str_field(&mut out, "name", &asset.name);
    out.push_str(",\"maps\":[");
    for (i, map) in asset.maps.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push('{');
        str_field(&mut out, "name", &map.name);
        out.push(',');
        str_field(&mut out, "id", &map.id);
        out.push_str(",\"actions\":[");
        for (j, action) in map.actions.iter().enumerate() {
            if j > 0 {
                out.push(',');
            }
            out.push('{');
            str_field(&mut out, "name", &action.name);
            out.push(',');
            str_field(&mut out, "type", action.action_type.name());
            out.push(',');
            str_field(&mut out, "id", &action.id);
            out.push('}');
        }
        out.push_str("],\"bindings\":[");
        let bindings = map.actions.iter().flat_map(|a| a.bindings.iter());
        for (j, b) in bindings.enumerate() {
            if j > 0 {
                out.push(',');
            }
            out.push('{');
            str_field(&mut out, "name", &b.name);
            out.push(',');
            str_field(&mut out, "id", &b.id);
            out.push(',');
            write_binding_fields(&mut out, b);
            out.push('}');
        }
        out.push_str("]}");
    }
    out.push_str("]}");
    out
}

fn write_item(out: &mut String, source: &str, asset: &InputAsset) {
    out.push('{');
    str_field(out, "source", source);
    out.push_str(",\"data\":");
    write_asset(out, asset);
    out.push('}');
}

fn write_asset(out: &mut String, asset: &InputAsset) {
    out.push('{');
    str_field(out, "name", &asset.name);
    out.push_str(",\"maps\":[");
    for (i, map) in asset.maps.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        write_map(out, map);
    }
    out.push_str("]}");
}

fn write_map(out: &mut String, map: &ActionMap) {
    out.push('{');
    str_field(out, "name", &map.name);
    out.push(',');
    str_field(out, "id", &map.id);
    out.push_str(",\"actions\":[");
    for (i, action) in map.actions.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        write_action(out, action);
    }
    out.push_str("]}");
}

fn write_action(out: &mut String, action: &InputAction) {
    out.push('{');
    str_field(out, "name", &action.name);
    out.push(',');
    str_field(out, "type", action.action_type.name());
    out.push(',');
    str_field(out, "expectedControlType", &action.expected_control_type);
    out.push_str(",\"bindings\":[");
    for (i, b) in action.bindings.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push('{');
        write_binding_fields(out, b);
        out.push('}');
    }
    out.push_str("]}");
}

/// `path, interactions, processors, groups, action, isComposite, isPartOfComposite`
fn write_binding_fields(out: &mut String, b: &InputBinding) {
    str_field(out, "path", &b.path);
    out.push(',');
    str_field(out, "interactions", &b.interactions);
    out.push(',');
    str_field(out, "processors", &b.processors);
    out.push(',');
    str_field(out, "groups", &b.groups);
    out.push(',');
    str_field(out, "action", &b.action);
    out.push(',');
    bool_field(out, "isComposite", b.is_composite);
    out.push(',');
    bool_field(out, "isPartOfComposite", b.is_part_of_composite);
}

#[inline]
fn str_field(out: &mut String, key: &str, value: &str) {
    out.push('"');
    out.push_str(key);
    out.push_str("\":\"");
    out.push_str(&escape(value));
    out.push('"');
}

#[inline]
fn bool_field(out: &mut String, key: &str, value: bool) {
    out.push('"');
    out.push_str(key);
    out.push_str("\":");
    out.push_str(if value { "true" } else { "false" });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::action::ActionType;

    fn asset() -> InputAsset {
        let mut jump = InputAction::new("Jump", ActionType::Button).with_control_type("Button");
        jump.bindings.push(InputBinding {
            path: "<Keyboard>/space".into(),
            groups: "Keyboard&Mouse".into(),
            action: "Jump".into(),
            ..InputBinding::default()
        });
        jump.bindings.push(InputBinding {
            path: "<Gamepad>/buttonSouth".into(),
            interactions: "hold(duration=0.4)".into(),
            processors: "invert".into(),
            groups: "Gamepad".into(),
            action: "Jump".into(),
            is_part_of_composite: true,
            ..InputBinding::default()
        });
        InputAsset::new("Player").with_map(ActionMap::new("Gameplay").with_id("m-1").with_action(jump))
    }

    #[test]
    fn asset_field_order_is_fixed() {
        assert_eq!(
            encode_asset(&asset()),
            concat!(
                r#"{"name":"Player","maps":[{"name":"Gameplay","id":"m-1","actions":["#,
                r#"{"name":"Jump","type":"Button","expectedControlType":"Button","bindings":["#,
                r#"{"path":"<Keyboard>/space","interactions":"","processors":"","groups":"Keyboard&Mouse","action":"Jump","isComposite":false,"isPartOfComposite":false},"#,
                r#"{"path":"<Gamepad>/buttonSouth","interactions":"hold(duration=0.4)","processors":"invert","groups":"Gamepad","action":"Jump","isComposite":false,"isPartOfComposite":true}"#,
                r#"]}]}]}"#
            )
        );
    }

    #[test]
    fn item_wraps_source_and_data() {
        let doc = encode_item(r#"registry: "quoted""#, &InputAsset::new("A"));
        assert_eq!(
            doc,
            r#"{"source":"registry: \"quoted\"","data":{"name":"A","maps":[]}}"#
        );
    }

    #[test]
    fn empty_set_is_empty_items() {
        assert_eq!(encode_document(&DiscoveredSet::default()), r#"{"items":[]}"#);
    }

    #[test]
    fn display_schema_lists_bindings_per_map() {
        let mut a = asset();
        a.maps[0].actions[0].id = "a-1".into();
        for (i, b) in a.maps[0].actions[0].bindings.iter_mut().enumerate() {
            b.id = format!("b-{i}");
        }
        let doc = encode_display(&a);
        assert!(doc.starts_with(
            r#"{"name":"Player","maps":[{"name":"Gameplay","id":"m-1","actions":[{"name":"Jump","type":"Button","id":"a-1"}],"bindings":[{"name":"","id":"b-0","path":"<Keyboard>/space""#
        ));
        assert!(doc.ends_with(r#""isComposite":false,"isPartOfComposite":true}]}]}"#));
    }
}
