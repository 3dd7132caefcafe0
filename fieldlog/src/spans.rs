//! Pooled, timed spans producing duration-annotated entries on close

use crate::dispatch;
use crate::entry::LogEntry;
use crate::fields::field;
use crate::levels::Level;
use crate::prepared::PreparedLogger;
use chrono::{DateTime, Utc};
use std::sync::Mutex;

/// Reserved key under which a closed span records its elapsed time.
pub const DURATION_KEY: &str = "duration";

/// Backing storage for one in-flight span. The entry keeps its message and
/// field allocations between acquisitions, so steady-state tracing does not
/// allocate.
#[derive(Debug)]
pub struct SpanRecord {
    pub(crate) entry: LogEntry,
}

impl Default for SpanRecord {
    fn default() -> Self {
        Self {
            entry: LogEntry::new(Level::Trace, String::new(), Vec::new(), 0),
        }
    }
}

impl SpanRecord {
    fn reset(&mut self) {
        self.entry.level = Level::Trace;
        self.entry.message.clear();
        self.entry.fields.clear();
        self.entry.caller_skip = 0;
    }
}

const MAX_POOLED_RECORDS: usize = 64;

/// Synchronized pool of span records. Acquire/release may race freely; an
/// acquired record belongs to a single caller until released.
pub struct SpanPool {
    records: Mutex<Vec<SpanRecord>>,
}

impl SpanPool {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
        }
    }

    pub fn acquire(&self) -> SpanRecord {
        self.records.lock().unwrap().pop().unwrap_or_default()
    }

    /// Resets the record before pooling it. Records beyond the pool bound
    /// are dropped, keeping retained memory proportional to real
    /// concurrency.
    pub fn release(&self, mut record: SpanRecord) {
        record.reset();
        let mut records = self.records.lock().unwrap();
        if records.len() < MAX_POOLED_RECORDS {
            records.push(record);
        }
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for SpanPool {
    fn default() -> Self {
        Self::new()
    }
}

/// An open timing span. Holds a shared borrow of its logger, so the field
/// set it emits is exactly the one current when the span was started; the
/// handle cannot gain fields while a span is open.
///
/// Closing attaches the elapsed time under [`DURATION_KEY`] and emits a
/// Trace-level entry. [`TraceSpan::end`] consumes the span; a span that
/// goes out of scope unclosed closes itself, so the bracket holds on
/// early-return paths.
pub struct TraceSpan<'a> {
    logger: &'a PreparedLogger,
    record: Option<SpanRecord>,
    start: DateTime<Utc>,
}

impl<'a> TraceSpan<'a> {
    pub(crate) fn new(logger: &'a PreparedLogger, record: SpanRecord, start: DateTime<Utc>) -> Self {
        Self {
            logger,
            record: Some(record),
            start,
        }
    }

    /// Start timestamp, UTC.
    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// Closes the span: computes the elapsed time, emits the entry, and
    /// returns the backing record to the pool.
    pub fn end(mut self) {
        self.finish();
    }

    fn finish(&mut self) {
        let Some(mut record) = self.record.take() else {
            return;
        };
        let elapsed = (Utc::now() - self.start).to_std().unwrap_or_default();
        record.entry.fields.extend_from_slice(self.logger.fields());
        record.entry.fields.push(field(DURATION_KEY, elapsed));
        record.entry.emit();
        dispatch::release_span_record(record);
    }
}

impl Drop for TraceSpan<'_> {
    fn drop(&mut self) {
        self.finish();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn release_resets_record_state_and_keeps_capacity() {
        let pool = SpanPool::new();
        let mut record = pool.acquire();
        record.entry.level = Level::Trace;
        record.entry.message.push_str("querying index");
        record.entry.fields.push(field("k", "v"));
        record.entry.caller_skip = 3;

        pool.release(record);
        assert_eq!(pool.len(), 1);

        let record = pool.acquire();
        assert!(record.entry.message.is_empty());
        assert!(record.entry.fields.is_empty());
        assert_eq!(record.entry.caller_skip, 0);
        assert!(record.entry.message.capacity() >= "querying index".len());
        assert!(record.entry.fields.capacity() >= 1);
    }

    #[test]
    fn pool_is_bounded() {
        let pool = SpanPool::new();
        for _ in 0..MAX_POOLED_RECORDS + 8 {
            pool.release(SpanRecord::default());
        }
        assert_eq!(pool.len(), MAX_POOLED_RECORDS);
    }

    #[test]
    fn acquire_on_empty_pool_builds_a_fresh_record() {
        let pool = SpanPool::new();
        assert!(pool.is_empty());
        let record = pool.acquire();
        assert!(record.entry.message.is_empty());
        assert_eq!(record.entry.level, Level::Trace);
    }
}
