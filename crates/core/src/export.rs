//! Persisting discovered bindings: one timestamped document per run, gated by a sentinel file.

use chrono::Local;
use std::{
    fs::{self, OpenOptions},
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
    sync::Arc,
};

use crate::codec::encode::{encode_display, encode_document};
use crate::collector::Collector;
use crate::config::DumpConfig;
use crate::core_log::CoreLog;
use crate::host::graph::RuntimeGraph;

/// Presence of the sentinel file alone suppresses export. Content is never compared.
#[derive(Debug, Clone)]
pub struct ExportGate {
    sentinel: PathBuf,
}

impl ExportGate {
    pub fn new<P: Into<PathBuf>>(sentinel: P) -> Self {
        Self {
            sentinel: sentinel.into(),
        }
    }

    pub fn should_export(&self) -> bool {
        !self.sentinel.try_exists().unwrap_or(false)
    }

    pub fn sentinel_path(&self) -> &Path {
        &self.sentinel
    }

    pub fn write_sentinel(&self, content: &str) -> Result<(), String> {
        if let Some(parent) = self.sentinel.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .map_err(|e| format!("create {}: {e}", parent.display()))?;
            }
        }
        fs::write(&self.sentinel, content)
            .map_err(|e| format!("write {}: {e}", self.sentinel.display()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// Sentinel already present.
    Skipped,
    Written {
        document: PathBuf,
        /// `None` when nothing was discovered.
        sentinel: Option<PathBuf>,
        assets: usize,
    },
    Failed(String),
}

pub struct ExportPipeline {
    config: DumpConfig,
    log: Arc<dyn CoreLog>,
    force: bool,
}

impl ExportPipeline {
    pub fn new(config: DumpConfig, log: Arc<dyn CoreLog>) -> Self {
        Self {
            config,
            log,
            force: false,
        }
    }

    /// Export even if the sentinel exists.
    pub fn force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    /// Gate, collect, write. Never returns an error; failures come back as `Failed`.
    pub fn run(&self, graph: &dyn RuntimeGraph) -> ExportOutcome {
        let gate = match self.open_gate() {
            Ok(Some(gate)) => gate,
            Ok(None) => return ExportOutcome::Skipped,
            Err(e) => return self.fail(e),
        };
        let mut collector = Collector::with_config(self.log.clone(), &self.config);
        collector.collect(graph);
        self.write_all(&gate, &collector)
    }

    /// Same as `run` for an already-populated collector.
    pub fn export(&self, collector: &Collector) -> ExportOutcome {
        match self.open_gate() {
            Ok(Some(gate)) => self.write_all(&gate, collector),
            Ok(None) => ExportOutcome::Skipped,
            Err(e) => self.fail(e),
        }
    }

    fn open_gate(&self) -> Result<Option<ExportGate>, String> {
        let gate = ExportGate::new(self.config.sentinel_path()?);
        if !self.force && !gate.should_export() {
            self.log.info(&format!(
                "[export] {} exists; skipping export",
                gate.sentinel_path().display()
            ));
            return Ok(None);
        }
        Ok(Some(gate))
    }

    fn write_all(&self, gate: &ExportGate, collector: &Collector) -> ExportOutcome {
        let discovered = collector.discovered();
        let dir = match self.config.output_dir() {
            Ok(dir) => dir,
            Err(e) => return self.fail(e),
        };
        let content = encode_document(discovered);
        let document = match write_document(&dir, &self.config.file_prefix, &content) {
            Ok(path) => path,
            Err(e) => return self.fail(e),
        };
        self.log.info(&format!(
            "[export] wrote {} asset(s) to {}",
            discovered.len(),
            document.display()
        ));

        let Some(first) = discovered.iter().next() else {
            self.log
                .warn("[export] no binding assets discovered; sentinel not written");
            return ExportOutcome::Written {
                document,
                sentinel: None,
                assets: 0,
            };
        };
        let display = encode_display(&first.asset.read());
        if let Err(e) = gate.write_sentinel(&display) {
            return self.fail(e);
        }
        self.log.info(&format!(
            "[export] wrote {}",
            gate.sentinel_path().display()
        ));

        ExportOutcome::Written {
            document,
            sentinel: Some(gate.sentinel_path().to_path_buf()),
            assets: discovered.len(),
        }
    }

    fn fail(&self, e: String) -> ExportOutcome {
        self.log.error(&format!("[export] {e}"));
        ExportOutcome::Failed(e)
    }
}

/// Write `content` to `<dir>/<prefix>-YYYYMMDD-HHMMSS.json`. Existing files are left
/// alone; a clash within the same second gets a numeric suffix.
pub fn write_document(dir: &Path, prefix: &str, content: &str) -> Result<PathBuf, String> {
    fs::create_dir_all(dir).map_err(|e| format!("create {}: {e}", dir.display()))?;
    let stamp = Local::now().format("%Y%m%d-%H%M%S").to_string();

    for n in 0..100u32 {
        let name = if n == 0 {
            format!("{prefix}-{stamp}.json")
        } else {
            format!("{prefix}-{stamp}-{n}.json")
        };
        let path = dir.join(name);
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(mut file) => {
                file.write_all(content.as_bytes())
                    .map_err(|e| format!("write {}: {e}", path.display()))?;
                return Ok(path);
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
            Err(e) => return Err(format!("create {}: {e}", path.display())),
        }
    }
    Err(format!(
        "no free file name for {prefix}-{stamp} in {}",
        dir.display()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_log::{BufferLog, Level, NoopLog};
    use tempfile::TempDir;

    #[test]
    fn gate_follows_sentinel_presence() {
        let temp = TempDir::new().unwrap();
        let gate = ExportGate::new(temp.path().join("nested").join("sentinel.json"));
        assert!(gate.should_export());
        gate.write_sentinel("{}").unwrap();
        assert!(!gate.should_export());
    }

    #[test]
    fn documents_are_never_overwritten() {
        let temp = TempDir::new().unwrap();
        let a = write_document(temp.path(), "bindings", "first").unwrap();
        let b = write_document(temp.path(), "bindings", "second").unwrap();
        assert_ne!(a, b);
        assert_eq!(fs::read_to_string(&a).unwrap(), "first");
        assert_eq!(fs::read_to_string(&b).unwrap(), "second");

        let name = a.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("bindings-"));
        assert!(name.ends_with(".json"));
    }

    #[test]
    fn unreadable_output_dir_fails_without_panic() {
        let temp = TempDir::new().unwrap();
        let blocker = temp.path().join("file");
        fs::write(&blocker, "x").unwrap();

        let buf = Arc::new(BufferLog::new());
        let log: Arc<dyn CoreLog> = buf.clone();
        let config = DumpConfig {
            output_dir: Some(blocker.join("out")),
            sentinel_path: Some(temp.path().join("sentinel.json")),
            ..DumpConfig::default()
        };
        let collector = Collector::new(Arc::new(NoopLog));
        let outcome = ExportPipeline::new(config, log).export(&collector);

        assert!(matches!(outcome, ExportOutcome::Failed(_)));
        assert!(buf.contains(Level::Error, "[export]"));
        assert!(!temp.path().join("sentinel.json").exists());
    }
}
