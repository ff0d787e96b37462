//! Error types for the record model
//!
//! Codec and identifier errors using thiserror

use thiserror::Error;

/// A packed timestamp that cannot be decoded.
///
/// Recoverable per record: callers flag or skip the tick and surface the
/// failure in aggregate counts, never abort a whole batch.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedTimestamp {
    #[error("Timestamp is null")]
    Null,

    #[error("Timestamp {packed} outside [0, 235959999999999]")]
    OutOfRange { packed: i64 },

    #[error(
        "Timestamp {packed} has invalid components: hour={hour} minute={minute} second={second} nanosecond={nanosecond}"
    )]
    InvalidComponents {
        packed: i64,
        hour: u32,
        minute: u32,
        second: u32,
        nanosecond: u32,
    },
}

impl MalformedTimestamp {
    /// The original input, if there was one.
    pub fn input(&self) -> Option<i64> {
        match self {
            MalformedTimestamp::Null => None,
            MalformedTimestamp::OutOfRange { packed } => Some(*packed),
            MalformedTimestamp::InvalidComponents { packed, .. } => Some(*packed),
        }
    }
}

/// Symbol validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SymbolError {
    #[error("Symbol is empty")]
    Empty,

    #[error("Symbol {symbol:?} is {len} characters, maximum is {max}")]
    TooLong { symbol: String, len: usize, max: usize },

    #[error("Symbol {symbol:?} contains non-ASCII or control characters")]
    InvalidCharacters { symbol: String },
}

/// Trading session configuration errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Invalid session boundary: {0}")]
    InvalidBoundary(#[from] MalformedTimestamp),

    #[error("Session open {open} is not before close {close}")]
    EmptyWindow { open: i64, close: i64 },
}
