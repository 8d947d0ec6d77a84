use parking_lot::Mutex;

/// Logging sink handed to the collector, codec and export pipeline.
/// Implement this in the host (CLI, plugin loader, tests).
pub trait CoreLog: Send + Sync {
    fn info(&self, msg: &str) {
        let _ = msg;
    }
    fn warn(&self, msg: &str) {
        let _ = msg;
    }
    fn error(&self, msg: &str) {
        let _ = msg;
    }
    fn debug(&self, msg: &str) {
        let _ = msg;
    }
}

/// No-op logger if you don't care about logs.
pub struct NoopLog;
impl CoreLog for NoopLog {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
}

/// Keeps every message in memory, in the order it was reported.
#[derive(Default)]
pub struct BufferLog {
    lines: Mutex<Vec<(Level, String)>>,
}

impl BufferLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages at `level` only.
    pub fn at(&self, level: Level) -> Vec<String> {
        self.lines
            .lock()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }

    pub fn contains(&self, level: Level, needle: &str) -> bool {
        self.lines
            .lock()
            .iter()
            .any(|(l, m)| *l == level && m.contains(needle))
    }

    fn push(&self, level: Level, msg: &str) {
        self.lines.lock().push((level, msg.to_string()));
    }
}

impl CoreLog for BufferLog {
    fn info(&self, msg: &str) {
        self.push(Level::Info, msg);
    }
    fn warn(&self, msg: &str) {
        self.push(Level::Warn, msg);
    }
    fn error(&self, msg: &str) {
        self.push(Level::Error, msg);
    }
    fn debug(&self, msg: &str) {
        self.push(Level::Debug, msg);
    }
}
