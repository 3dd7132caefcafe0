//! Immutable, fully-formed log records ready for sink dispatch

use crate::dispatch;
use crate::fields::Field;
use crate::levels::Level;
use serde::Serialize;

/// Facade-internal frames on the stack when an entry is constructed by the
/// generic emit primitive, the public method's frame included. Each
/// level-specific method forwards through one extra frame and must pass
/// `CALLER_SKIP + 1` so a resolver lands on the original call site.
pub const CALLER_SKIP: usize = 1;

/// One fully-formed log record. Built once, never mutated; the field set is
/// private to the entry, so mutation of the originating handle after
/// construction cannot reach it.
#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    pub level: Level,
    pub message: String,
    pub fields: Vec<Field>,
    /// Stack frames to discount when attributing this entry to a call site.
    pub caller_skip: usize,
}

impl LogEntry {
    /// Pure constructor: no level check, no I/O, no global state.
    pub fn new(level: Level, message: String, fields: Vec<Field>, caller_skip: usize) -> Self {
        Self {
            level,
            message,
            fields,
            caller_skip,
        }
    }

    /// Hands the entry to the configured sink. Sink failures stay at the
    /// sink boundary; this never reports an error to the caller.
    pub fn emit(&self) {
        dispatch::log_entry(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::field;

    #[test]
    fn construction_is_pure() {
        let entry = LogEntry::new(
            Level::Info,
            String::from("hello"),
            vec![field("a", 1)],
            CALLER_SKIP + 1,
        );
        assert_eq!(entry.level, Level::Info);
        assert_eq!(entry.message, "hello");
        assert_eq!(entry.fields, vec![field("a", 1)]);
        assert_eq!(entry.caller_skip, CALLER_SKIP + 1);
    }

    #[test]
    fn serializes_to_json() {
        let entry = LogEntry::new(
            Level::Warn,
            String::from("disk nearly full"),
            vec![field("disk", "/dev/sda1"), field("pct", 97u32)],
            CALLER_SKIP,
        );
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["level"], "Warn");
        assert_eq!(value["message"], "disk nearly full");
        assert_eq!(value["fields"][0]["key"], "disk");
        assert_eq!(value["fields"][1]["value"], 97);
    }
}
