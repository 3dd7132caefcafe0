//! Helpers for tests that need a live dispatch

use crate::dispatch::{force_uninit, init_log_dispatch, shutdown_dispatch};
use crate::sink::InMemorySink;
use std::sync::Arc;

/// RAII guard for in-memory logging that handles cleanup
///
/// Shuts the dispatch down and force-uninitializes it when dropped, so the
/// next test can install its own sink.
///
/// # Important
/// Tests using this guard MUST be marked with #[serial] since they share
/// global state through init_log_dispatch.
pub struct InMemoryLogGuard {
    pub sink: Arc<InMemorySink>,
}

impl Default for InMemoryLogGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryLogGuard {
    pub fn new() -> Self {
        let sink = Arc::new(InMemorySink::new());
        init_log_dispatch(sink.clone()).expect("failed to initialize log dispatch");
        Self { sink }
    }
}

impl Drop for InMemoryLogGuard {
    fn drop(&mut self) {
        shutdown_dispatch();
        unsafe { force_uninit() };
    }
}

/// Initialize in-memory logging for unit tests
///
/// # Important
/// Tests using this function MUST be marked with #[serial] since they share
/// global state through init_log_dispatch.
pub fn init_in_memory_log() -> InMemoryLogGuard {
    InMemoryLogGuard::new()
}
