//! Bounded capture of the calling thread's stack

use std::backtrace::Backtrace;

/// Reserved field key for captured stack traces.
pub const STACK_TRACE_KEY: &str = "stack trace";

/// Upper bound, in bytes, on captured stack-trace text.
pub const STACK_TRACE_LIMIT: usize = 64 * 1024;

/// Captures the calling thread's stack as text, cut to `limit` bytes. The
/// bound is on length, not frames: a frame may be split at the boundary.
/// The runtime offers no cross-thread capture, so other threads are not
/// included.
pub(crate) fn capture_stack_trace(limit: usize) -> String {
    truncate_to_limit(Backtrace::force_capture().to_string(), limit)
}

fn truncate_to_limit(mut text: String, limit: usize) -> String {
    if text.len() > limit {
        let mut end = limit;
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        text.truncate(end);
    }
    text
}
