//! Sink interface consumed by the dispatch

use crate::entry::LogEntry;
use crate::levels::Level;

mod in_memory;
pub use in_memory::*;

/// Interface the dispatch module uses to hand entries out. Implementations
/// absorb their own I/O failures; none of these calls reports an error back
/// to the logging call site.
pub trait LogSink: Send + Sync {
    fn on_startup(&self);
    fn on_shutdown(&self);

    /// Sink-side veto, consulted after the process-wide maximum level.
    fn on_log_enabled(&self, level: Level) -> bool;
    fn on_log(&self, entry: &LogEntry);
}

/// for tests where the data can be dropped
pub struct NullLogSink {}

impl LogSink for NullLogSink {
    fn on_startup(&self) {}
    fn on_shutdown(&self) {}

    fn on_log_enabled(&self, _: Level) -> bool {
        false
    }
    fn on_log(&self, _: &LogEntry) {}
}
