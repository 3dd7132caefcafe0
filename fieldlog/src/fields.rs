//! Structured key/value context attached to log entries

use serde::Serialize;
use std::borrow::Cow;
use std::fmt;
use std::time::Duration;

/// Value of a [`Field`]. Owned, so a field stays valid after the call site
/// that produced it has returned.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Str(Cow<'static, str>),
    I64(i64),
    U64(u64),
    F64(f64),
    Bool(bool),
    Duration(Duration),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::I64(v) => write!(f, "{v}"),
            Self::U64(v) => write!(f, "{v}"),
            Self::F64(v) => write!(f, "{v}"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Duration(v) => write!(f, "{v:?}"),
        }
    }
}

impl From<&'static str> for FieldValue {
    fn from(value: &'static str) -> Self {
        Self::Str(Cow::Borrowed(value))
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Str(Cow::Owned(value))
    }
}

impl From<Cow<'static, str>> for FieldValue {
    fn from(value: Cow<'static, str>) -> Self {
        Self::Str(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::I64(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        Self::I64(i64::from(value))
    }
}

impl From<u64> for FieldValue {
    fn from(value: u64) -> Self {
        Self::U64(value)
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        Self::U64(u64::from(value))
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::F64(value)
    }
}

impl From<f32> for FieldValue {
    fn from(value: f32) -> Self {
        Self::F64(f64::from(value))
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<Duration> for FieldValue {
    fn from(value: Duration) -> Self {
        Self::Duration(value)
    }
}

/// One named value attached to a log record. Immutable once constructed.
/// Duplicate keys are permitted within a field set; rendering decides
/// shadowing, the set itself keeps every entry in insertion order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Field {
    pub key: Cow<'static, str>,
    pub value: FieldValue,
}

impl Field {
    pub fn new(key: impl Into<Cow<'static, str>>, value: impl Into<FieldValue>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Terse field constructor, the everyday spelling at call sites:
/// `pl.with_fields([field("req", "r-1")])`.
pub fn field(key: impl Into<Cow<'static, str>>, value: impl Into<FieldValue>) -> Field {
    Field::new(key, value)
}

/// Defensive copy of a field set: a fresh backing sequence with the same
/// elements in the same order, sharing no storage with the source.
pub fn copy_fields(fields: &[Field]) -> Vec<Field> {
    fields.to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copy_has_its_own_storage() {
        let mut source = vec![field("a", 1), field("b", "two")];
        let mut copied = copy_fields(&source);
        assert_eq!(copied, source);

        copied.push(field("c", 3));
        assert_eq!(source.len(), 2);

        source.push(field("d", 4));
        assert_eq!(copied.len(), 3);
        assert_eq!(copied[2], field("c", 3));
    }

    #[test]
    fn conversions() {
        assert_eq!(FieldValue::from("x"), FieldValue::Str(Cow::Borrowed("x")));
        assert_eq!(FieldValue::from(7i32), FieldValue::I64(7));
        assert_eq!(FieldValue::from(7u32), FieldValue::U64(7));
        assert_eq!(FieldValue::from(0.5f32), FieldValue::F64(0.5));
        assert_eq!(FieldValue::from(true), FieldValue::Bool(true));
        assert_eq!(
            FieldValue::from(Duration::from_millis(10)),
            FieldValue::Duration(Duration::from_millis(10))
        );
    }

    #[test]
    fn display() {
        assert_eq!(field("k", "v").value.to_string(), "v");
        assert_eq!(field("k", -3).value.to_string(), "-3");
        assert_eq!(field("k", true).value.to_string(), "true");
        assert_eq!(
            field("k", Duration::from_millis(1500)).value.to_string(),
            "1.5s"
        );
    }

    #[test]
    fn duplicate_keys_are_distinct_fields() {
        let set = vec![field("k", 1), field("k", 2)];
        assert_eq!(set.len(), 2);
        assert_ne!(set[0], set[1]);
    }
}
