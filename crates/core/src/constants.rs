use once_cell::sync::Lazy;
use regex::Regex;

/// Application id used for the per-user data directory.
pub const APP_ID: &str = "inputmap-dump";

/// Hierarchy scans stop descending below this many levels under a scan root.
pub const MAX_SCAN_DEPTH: usize = 10;

pub const KEYBOARD_GROUP: &str = "Keyboard&Mouse";
pub const GAMEPAD_GROUP: &str = "Gamepad";

/// Display value for a lookup that found nothing.
pub const NONE_LABEL: &str = "None";

/// Only actions of this type get a row in the binding table.
pub const TABLE_ACTION_TYPE: &str = "Button";

pub const DUMP_DIR_NAME: &str = "DumpInputBindings";
pub const SENTINEL_FILE_NAME: &str = "modified_bindings.json";
pub const DUMP_FILE_PREFIX: &str = "bindings";

/// Declared kind of a field holding a reference object that points at an action.
pub const ACTION_REFERENCE_KIND: &str = "InputActionReference";

/// Field that an action reference object resolves through.
pub const ACTION_REFERENCE_FIELD: &str = "action";

pub static UI_ROOT_MARKERS: Lazy<Vec<String>> =
    Lazy::new(|| ["ui", "canvas"].into_iter().map(String::from).collect());

/// `<Keyboard>/` or `<Gamepad>/` at the start of a control path.
pub static DEVICE_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^<(?:Keyboard|Gamepad)>/").unwrap());
