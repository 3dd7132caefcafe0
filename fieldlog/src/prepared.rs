//! Mutable logging handles accumulating contextual fields

use crate::dispatch;
use crate::entry::{CALLER_SKIP, LogEntry};
use crate::fields::{Field, copy_fields, field};
use crate::levels::Level;
use crate::spans::TraceSpan;
use crate::stack_trace::{STACK_TRACE_KEY, STACK_TRACE_LIMIT, capture_stack_trace};
use chrono::Utc;
use std::fmt;
use std::fmt::Write as _;

/// Creates a handle pre-seeded with the given fields.
pub fn with_fields(fields: impl IntoIterator<Item = Field>) -> PreparedLogger {
    let mut pl = PreparedLogger::new();
    pl.with_fields(fields);
    pl
}

/// A caller-owned logging handle. Fields accumulate on the handle and ride
/// along on every entry it emits; emission itself takes a defensive copy,
/// so an entry already handed to the sink never observes later mutation.
///
/// One handle belongs to one thread of execution. To fan out, `clone()` the
/// handle per task: the clone shares no backing storage with the original,
/// and the borrow checker rejects mutating a shared handle anyway.
#[derive(Debug, Clone, Default)]
pub struct PreparedLogger {
    fields: Vec<Field>,
}

impl PreparedLogger {
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Current field set, in insertion order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Appends fields in place and returns the same handle for chaining.
    /// Duplicate keys are kept; rendering decides shadowing.
    pub fn with_fields(&mut self, fields: impl IntoIterator<Item = Field>) -> &mut Self {
        self.fields.extend(fields);
        self
    }

    /// Sugar for attaching an error under the `err` key.
    pub fn with_error(&mut self, err: &dyn std::error::Error) -> &mut Self {
        self.fields.push(field("err", err.to_string()));
        self
    }

    fn emit_at(&self, level: Level, message: String, caller_skip: usize) {
        LogEntry::new(level, message, copy_fields(&self.fields), caller_skip).emit();
    }

    pub fn debug(&self, msg: impl Into<String>) {
        self.emit_at(Level::Debug, msg.into(), CALLER_SKIP + 1);
    }

    pub fn info(&self, msg: impl Into<String>) {
        self.emit_at(Level::Info, msg.into(), CALLER_SKIP + 1);
    }

    pub fn notice(&self, msg: impl Into<String>) {
        self.emit_at(Level::Notice, msg.into(), CALLER_SKIP + 1);
    }

    pub fn warn(&self, msg: impl Into<String>) {
        self.emit_at(Level::Warn, msg.into(), CALLER_SKIP + 1);
    }

    pub fn error(&self, msg: impl Into<String>) {
        self.emit_at(Level::Error, msg.into(), CALLER_SKIP + 1);
    }

    /// Logs above Error severity. Unlike [`PreparedLogger::panic`], control
    /// returns to the caller.
    pub fn alert(&self, msg: impl Into<String>) {
        self.emit_at(Level::Alert, msg.into(), CALLER_SKIP + 1);
    }

    /// Logs at Panic severity, then panics. The log write completes before
    /// the unwind starts.
    pub fn panic(&self, msg: impl Into<String>) -> ! {
        let message = msg.into();
        self.emit_at(Level::Panic, message.clone(), CALLER_SKIP + 1);
        panic!("{message}");
    }

    /// Logs at Fatal severity, shuts the dispatch down so the sink can
    /// flush, then terminates the process. Does not return.
    pub fn fatal(&self, msg: impl Into<String>) -> ! {
        self.emit_at(Level::Fatal, msg.into(), CALLER_SKIP + 1);
        dispatch::shutdown_dispatch();
        std::process::exit(1);
    }

    pub fn debugf(&self, args: fmt::Arguments<'_>) {
        self.emit_at(Level::Debug, fmt_message(args), CALLER_SKIP + 1);
    }

    pub fn infof(&self, args: fmt::Arguments<'_>) {
        self.emit_at(Level::Info, fmt_message(args), CALLER_SKIP + 1);
    }

    pub fn noticef(&self, args: fmt::Arguments<'_>) {
        self.emit_at(Level::Notice, fmt_message(args), CALLER_SKIP + 1);
    }

    pub fn warnf(&self, args: fmt::Arguments<'_>) {
        self.emit_at(Level::Warn, fmt_message(args), CALLER_SKIP + 1);
    }

    pub fn errorf(&self, args: fmt::Arguments<'_>) {
        self.emit_at(Level::Error, fmt_message(args), CALLER_SKIP + 1);
    }

    pub fn alertf(&self, args: fmt::Arguments<'_>) {
        self.emit_at(Level::Alert, fmt_message(args), CALLER_SKIP + 1);
    }

    /// Formatted counterpart of [`PreparedLogger::panic`].
    pub fn panicf(&self, args: fmt::Arguments<'_>) -> ! {
        let message = fmt_message(args);
        self.emit_at(Level::Panic, message.clone(), CALLER_SKIP + 1);
        panic!("{message}");
    }

    /// Formatted counterpart of [`PreparedLogger::fatal`].
    pub fn fatalf(&self, args: fmt::Arguments<'_>) -> ! {
        self.emit_at(Level::Fatal, fmt_message(args), CALLER_SKIP + 1);
        dispatch::shutdown_dispatch();
        std::process::exit(1);
    }

    /// Returns a Debug-level entry carrying a copy of the current fields
    /// plus the calling thread's stack trace under [`STACK_TRACE_KEY`],
    /// bounded to [`STACK_TRACE_LIMIT`] bytes. Nothing is emitted; the
    /// caller decides whether to hand the entry to the sink.
    pub fn stack_trace(&self) -> LogEntry {
        let mut fields = copy_fields(&self.fields);
        fields.push(field(STACK_TRACE_KEY, capture_stack_trace(STACK_TRACE_LIMIT)));
        LogEntry::new(Level::Debug, String::new(), fields, CALLER_SKIP)
    }

    /// Starts a timed span over the live field set. Close it with
    /// [`TraceSpan::end`] (or let it drop) to emit the Trace-level entry
    /// with the elapsed time attached.
    pub fn trace(&self, msg: &str) -> TraceSpan<'_> {
        self.begin_trace(format_args!("{msg}"), CALLER_SKIP + 1)
    }

    /// Formatted counterpart of [`PreparedLogger::trace`].
    pub fn tracef(&self, args: fmt::Arguments<'_>) -> TraceSpan<'_> {
        self.begin_trace(args, CALLER_SKIP + 1)
    }

    fn begin_trace(&self, args: fmt::Arguments<'_>, caller_skip: usize) -> TraceSpan<'_> {
        let mut record = dispatch::acquire_span_record();
        record.entry.level = Level::Trace;
        record.entry.caller_skip = caller_skip;
        let _ = write!(record.entry.message, "{args}");
        TraceSpan::new(self, record, Utc::now())
    }
}

fn fmt_message(args: fmt::Arguments<'_>) -> String {
    match args.as_str() {
        Some(s) => s.to_owned(),
        None => args.to_string(),
    }
}
