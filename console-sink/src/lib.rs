//! Console sink library
//!
//! Renders entries as single lines with level coloring and `key=value`
//! context, for local development and tests.

pub mod console_sink;

pub use console_sink::ConsoleSink;

use fieldlog::dispatch::Result;
use fieldlog::guards::LogSystemGuard;
use std::sync::Arc;

/// Installs a console sink as the process-wide dispatch; logging stops when
/// the returned guard is dropped.
pub fn init_console_logging() -> Result<LogSystemGuard> {
    LogSystemGuard::new(Arc::new(ConsoleSink::new()))
}
