//! Structured, leveled logging facade
//!
//! A caller accumulates contextual key/value fields on a reusable
//! [`PreparedLogger`] handle, then emits entries at a chosen severity,
//! captures a bounded stack trace, or brackets an operation with a pooled,
//! timed [`TraceSpan`].
//!
//! Handles are cheap to fork: `clone()` yields an independent handle that
//! shares no backing storage, which is the intended way to hand a base
//! logger out to concurrent tasks. Emission always snapshots the field set,
//! so an entry in flight never observes later mutation of its handle.
//!
//! # Examples
//! ```
//! use fieldlog::prelude::*;
//! use fieldlog::{field, guards::LogSystemGuard, sink::NullLogSink};
//!
//! // The application installs a sink once; libraries only hold handles.
//! let _log_guard =
//!     LogSystemGuard::new(std::sync::Arc::new(NullLogSink {})).expect("log dispatch");
//!
//! let mut pl = PreparedLogger::new();
//! pl.with_fields([field("request", "r-1"), field("attempt", 2)]);
//! pl.info("request accepted");
//! pl.warnf(format_args!("retrying in {}ms", 250));
//!
//! // Timed span: emits a Trace entry with the elapsed time on end() or drop.
//! let span = pl.trace("handling request");
//! span.end();
//! ```

// crate-specific lint exceptions:
#![allow(unsafe_code, clippy::missing_errors_doc)]

pub mod dispatch;
pub mod entry;
pub mod errors;
pub mod fields;
pub mod guards;
pub mod levels;
pub mod panic_hook;
pub mod prepared;
pub mod sink;
pub mod spans;
pub mod stack_trace;
pub mod test_utils;

pub use entry::{CALLER_SKIP, LogEntry};
pub use fields::{Field, FieldValue, copy_fields, field};
pub use prepared::{PreparedLogger, with_fields};
pub use spans::{DURATION_KEY, TraceSpan};
pub use stack_trace::{STACK_TRACE_KEY, STACK_TRACE_LIMIT};

pub mod prelude {
    pub use crate::entry::LogEntry;
    pub use crate::fields::{Field, FieldValue, field};
    pub use crate::levels::*;
    pub use crate::prepared::{PreparedLogger, with_fields};
    pub use crate::spans::TraceSpan;
}
