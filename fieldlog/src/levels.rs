//! Severity levels and the process-wide maximum level

use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU32, Ordering};
use thiserror::Error;

/// Severity of a log entry. Smaller discriminants are more severe; an entry
/// passes the level check when `level as u32 <= max_level as u32`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[repr(u32)]
pub enum Level {
    Fatal = 1,
    Alert,
    Panic,
    Error,
    Warn,
    Notice,
    Info,
    Debug,
    Trace,
}

impl Level {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fatal => "FATAL",
            Self::Alert => "ALERT",
            Self::Panic => "PANIC",
            Self::Error => "ERROR",
            Self::Warn => "WARN",
            Self::Notice => "NOTICE",
            Self::Info => "INFO",
            Self::Debug => "DEBUG",
            Self::Trace => "TRACE",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// A level threshold: `Off`, or everything at least as severe as the named
/// level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u32)]
pub enum LevelFilter {
    Off = 0,
    Fatal,
    Alert,
    Panic,
    Error,
    Warn,
    Notice,
    Info,
    Debug,
    Trace,
}

impl LevelFilter {
    pub fn from_u32(value: u32) -> Option<Self> {
        match value {
            0 => Some(Self::Off),
            1 => Some(Self::Fatal),
            2 => Some(Self::Alert),
            3 => Some(Self::Panic),
            4 => Some(Self::Error),
            5 => Some(Self::Warn),
            6 => Some(Self::Notice),
            7 => Some(Self::Info),
            8 => Some(Self::Debug),
            9 => Some(Self::Trace),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Off => "OFF",
            Self::Fatal => "FATAL",
            Self::Alert => "ALERT",
            Self::Panic => "PANIC",
            Self::Error => "ERROR",
            Self::Warn => "WARN",
            Self::Notice => "NOTICE",
            Self::Info => "INFO",
            Self::Debug => "DEBUG",
            Self::Trace => "TRACE",
        }
    }
}

impl fmt::Display for LevelFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Error, Debug)]
#[error("unknown level filter: {0}")]
pub struct ParseLevelFilterError(String);

impl FromStr for LevelFilter {
    type Err = ParseLevelFilterError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "OFF" => Ok(Self::Off),
            "FATAL" => Ok(Self::Fatal),
            "ALERT" => Ok(Self::Alert),
            "PANIC" => Ok(Self::Panic),
            "ERROR" => Ok(Self::Error),
            "WARN" => Ok(Self::Warn),
            "NOTICE" => Ok(Self::Notice),
            "INFO" => Ok(Self::Info),
            "DEBUG" => Ok(Self::Debug),
            "TRACE" => Ok(Self::Trace),
            _ => Err(ParseLevelFilterError(s.into())),
        }
    }
}

static MAX_LEVEL: AtomicU32 = AtomicU32::new(LevelFilter::Trace as u32);

pub fn set_max_level(filter: LevelFilter) {
    MAX_LEVEL.store(filter as u32, Ordering::Relaxed);
}

pub fn max_level() -> LevelFilter {
    LevelFilter::from_u32(MAX_LEVEL.load(Ordering::Relaxed)).unwrap_or(LevelFilter::Off)
}

#[inline(always)]
pub fn level_enabled(level: Level) -> bool {
    (level as u32) <= MAX_LEVEL.load(Ordering::Relaxed)
}
