use super::LogSink;
use crate::entry::LogEntry;
use crate::levels::Level;
use std::sync::Mutex;

#[derive(Debug, Default)]
pub struct MemSinkState {
    pub startup_count: usize,
    pub shutdown_count: usize,
    pub entries: Vec<LogEntry>,
}

/// for tests where we want to inspect the collected entries
#[derive(Debug, Default)]
pub struct InMemorySink {
    pub state: Mutex<MemSinkState>,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything captured so far.
    pub fn entries(&self) -> Vec<LogEntry> {
        self.state.lock().unwrap().entries.clone()
    }
}

impl LogSink for InMemorySink {
    fn on_startup(&self) {
        self.state.lock().unwrap().startup_count += 1;
    }

    fn on_shutdown(&self) {
        self.state.lock().unwrap().shutdown_count += 1;
    }

    fn on_log_enabled(&self, _: Level) -> bool {
        true
    }

    fn on_log(&self, entry: &LogEntry) {
        self.state.lock().unwrap().entries.push(entry.clone());
    }
}
