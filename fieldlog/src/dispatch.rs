//! Where entries are routed to the configured sink

pub use crate::errors::{Error, Result};
use crate::entry::LogEntry;
use crate::levels::level_enabled;
use crate::sink::{LogSink, NullLogSink};
use crate::spans::{SpanPool, SpanRecord};
use std::cell::UnsafeCell;
use std::sync::{Arc, Mutex, RwLock};

/// Installs the process-wide sink and span pool. The application does this
/// once, before any handle is used; libraries should not.
pub fn init_log_dispatch(sink: Arc<dyn LogSink>) -> Result<()> {
    lazy_static::lazy_static! {
        static ref INIT_MUTEX: Mutex<()> = Mutex::new(());
    }
    let _guard = INIT_MUTEX.lock().unwrap();
    if G_DISPATCH.get().is_some() {
        return Err(Error::AlreadyInitialized());
    }
    unsafe { G_DISPATCH.set(Dispatch::new(sink)) };
    Ok(())
}

pub fn get_sink() -> Option<Arc<dyn LogSink>> {
    G_DISPATCH.get().map(Dispatch::get_sink)
}

/// Swaps the null sink in and notifies the old sink so it can flush.
pub fn shutdown_dispatch() {
    if let Some(d) = G_DISPATCH.get() {
        d.shutdown();
    }
}

/// Tears the dispatch down entirely so a new one can be installed.
///
/// # Safety
/// No other thread may be logging or holding an open span. Intended for
/// teardown between serial tests.
pub unsafe fn force_uninit() {
    unsafe { G_DISPATCH.clear() };
}

#[inline(always)]
pub fn log_entry(entry: &LogEntry) {
    if let Some(d) = G_DISPATCH.get() {
        d.log(entry);
    }
}

pub(crate) fn acquire_span_record() -> SpanRecord {
    match G_DISPATCH.get() {
        Some(d) => d.span_pool.acquire(),
        None => SpanRecord::default(),
    }
}

pub(crate) fn release_span_record(record: SpanRecord) {
    if let Some(d) = G_DISPATCH.get() {
        d.span_pool.release(record);
    }
}

struct DispatchCell {
    inner: UnsafeCell<Option<Dispatch>>,
}

impl DispatchCell {
    const fn new() -> Self {
        Self {
            inner: UnsafeCell::new(None),
        }
    }

    fn get(&self) -> Option<&Dispatch> {
        unsafe { (*self.inner.get()).as_ref() }
    }

    unsafe fn set(&self, dispatch: Dispatch) {
        unsafe { *self.inner.get() = Some(dispatch) };
    }

    unsafe fn clear(&self) {
        unsafe { *self.inner.get() = None };
    }
}

// very unsafe indeed - we don't want to pay for locking every time we record
// an entry; writes happen only at init and at test teardown
unsafe impl Sync for DispatchCell {}

static G_DISPATCH: DispatchCell = DispatchCell::new();

struct Dispatch {
    sink: RwLock<Arc<dyn LogSink>>,
    span_pool: SpanPool,
}

impl Dispatch {
    fn new(sink: Arc<dyn LogSink>) -> Self {
        let obj = Self {
            sink: RwLock::new(sink),
            span_pool: SpanPool::new(),
        };
        obj.get_sink().on_startup();
        obj
    }

    fn get_sink(&self) -> Arc<dyn LogSink> {
        if let Ok(guard) = self.sink.try_read() {
            (*guard).clone()
        } else {
            Arc::new(NullLogSink {})
        }
    }

    fn shutdown(&self) {
        let old_sink = self.get_sink();
        let null_sink = Arc::new(NullLogSink {});
        if let Ok(mut guard) = self.sink.write() {
            *guard = null_sink;
            drop(guard);
        }
        old_sink.on_shutdown();
    }

    #[inline]
    fn log(&self, entry: &LogEntry) {
        if !level_enabled(entry.level) {
            return;
        }
        let sink = self.get_sink();
        if !sink.on_log_enabled(entry.level) {
            return;
        }
        sink.on_log(entry);
    }
}
