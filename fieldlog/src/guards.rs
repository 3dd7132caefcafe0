//! RAII guards tying the dispatch lifetime to a scope

use crate::dispatch::{Result, init_log_dispatch, shutdown_dispatch};
use crate::sink::LogSink;
use std::sync::Arc;

/// Initializes the process-wide dispatch and shuts it down when dropped.
/// The application owns one of these; libraries should not install any.
pub struct LogSystemGuard {}

impl LogSystemGuard {
    pub fn new(sink: Arc<dyn LogSink>) -> Result<Self> {
        init_log_dispatch(sink)?;
        Ok(Self {})
    }
}

impl Drop for LogSystemGuard {
    fn drop(&mut self) {
        shutdown_dispatch();
    }
}
