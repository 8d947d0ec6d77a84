use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::collector::surfaces::ScanOptions;
use crate::constants::{
    APP_ID, DUMP_DIR_NAME, DUMP_FILE_PREFIX, GAMEPAD_GROUP, KEYBOARD_GROUP, MAX_SCAN_DEPTH,
    SENTINEL_FILE_NAME, UI_ROOT_MARKERS,
};

/// Settings for a discovery + export run. Every field has a default, so a partial
/// JSON file (or none at all) is fine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DumpConfig {
    /// Where timestamped documents go. `None`: `<data dir>/inputmap-dump/DumpInputBindings`.
    pub output_dir: Option<PathBuf>,
    /// Presence of this file suppresses export. `None`: `<data dir>/inputmap-dump/modified_bindings.json`.
    pub sentinel_path: Option<PathBuf>,
    pub max_depth: usize,
    pub ui_root_markers: Vec<String>,
    pub keyboard_group: String,
    pub gamepad_group: String,
    pub file_prefix: String,
}

impl Default for DumpConfig {
    fn default() -> Self {
        Self {
            output_dir: None,
            sentinel_path: None,
            max_depth: MAX_SCAN_DEPTH,
            ui_root_markers: UI_ROOT_MARKERS.clone(),
            keyboard_group: KEYBOARD_GROUP.to_string(),
            gamepad_group: GAMEPAD_GROUP.to_string(),
            file_prefix: DUMP_FILE_PREFIX.to_string(),
        }
    }
}

impl DumpConfig {
    /// Read a JSON config. A missing file yields the defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let path = path.as_ref();
        if !path.try_exists().unwrap_or(false) {
            return Ok(Self::default());
        }
        let content =
            fs::read_to_string(path).map_err(|e| format!("read {}: {e}", path.display()))?;
        serde_json::from_str(&content).map_err(|e| format!("parse {}: {e}", path.display()))
    }

    pub fn output_dir(&self) -> Result<PathBuf, String> {
        match &self.output_dir {
            Some(p) => Ok(p.clone()),
            None => Ok(appdata_dir()?.join(DUMP_DIR_NAME)),
        }
    }

    pub fn sentinel_path(&self) -> Result<PathBuf, String> {
        match &self.sentinel_path {
            Some(p) => Ok(p.clone()),
            None => Ok(appdata_dir()?.join(SENTINEL_FILE_NAME)),
        }
    }

    pub fn scan_options(&self) -> ScanOptions {
        ScanOptions {
            max_depth: self.max_depth,
            ui_root_markers: self
                .ui_root_markers
                .iter()
                .map(|m| m.to_lowercase())
                .collect(),
        }
    }
}

/// Compute (and create) the per-user data folder for this tool.
pub fn appdata_dir() -> Result<PathBuf, String> {
    let base = directories::BaseDirs::new().ok_or("Could not find user data directory")?;
    let dir = base.data_dir().join(APP_ID);
    fs::create_dir_all(&dir).map_err(|e| format!("create {}: {e}", dir.display()))?;
    Ok(dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_gives_defaults() {
        let temp = TempDir::new().unwrap();
        let cfg = DumpConfig::load(temp.path().join("nope.json")).unwrap();
        assert_eq!(cfg, DumpConfig::default());
        assert_eq!(cfg.max_depth, 10);
        assert_eq!(cfg.keyboard_group, "Keyboard&Mouse");
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("dump.json");
        fs::write(&path, r#"{ "max_depth": 4, "ui_root_markers": ["HUD"] }"#).unwrap();

        let cfg = DumpConfig::load(&path).unwrap();
        assert_eq!(cfg.max_depth, 4);
        assert_eq!(cfg.gamepad_group, "Gamepad");
        assert_eq!(cfg.scan_options().ui_root_markers, vec!["hud".to_string()]);
    }

    #[test]
    fn bad_json_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("dump.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(DumpConfig::load(&path).unwrap_err().starts_with("parse "));
    }
}
