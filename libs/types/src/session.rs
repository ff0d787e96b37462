//! Regular trading hours
//!
//! The session is a half-open window `[open, close)` of packed times. This
//! core has no holiday or early-close table: the window is a configuration
//! value and `TradingCalendar` is the seam where a real calendar would plug in.

use crate::errors::SessionError;
use crate::timestamp::{self, PackedTime};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 09:30:00.000000000
pub const DEFAULT_OPEN: i64 = 93_000_000_000_000;
/// 16:00:00.000000000
pub const DEFAULT_CLOSE: i64 = 160_000_000_000_000;

/// Half-open regular session window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionWindow {
    pub open: PackedTime,
    pub close: PackedTime,
}

impl SessionWindow {
    pub fn new(open: i64, close: i64) -> Result<Self, SessionError> {
        let open = PackedTime::new(open)?;
        let close = PackedTime::new(close)?;
        if open >= close {
            return Err(SessionError::EmptyWindow {
                open: open.raw(),
                close: close.raw(),
            });
        }
        Ok(Self { open, close })
    }

    /// True iff `packed` decodes and falls inside `[open, close)`.
    pub fn contains(&self, packed: Option<i64>) -> bool {
        match packed {
            Some(raw) if timestamp::is_valid(raw) => self.open.raw() <= raw && raw < self.close.raw(),
            _ => false,
        }
    }
}

impl Default for SessionWindow {
    fn default() -> Self {
        Self {
            open: PackedTime::new(DEFAULT_OPEN).unwrap_or(PackedTime::MIDNIGHT),
            close: PackedTime::new(DEFAULT_CLOSE).unwrap_or(PackedTime::END_OF_DAY),
        }
    }
}

/// Source of the regular session window for a trading date.
pub trait TradingCalendar: Send + Sync {
    /// Session window for `date`, or `None` when the market is closed.
    fn session(&self, date: NaiveDate) -> Option<SessionWindow>;

    fn is_regular_trading_hours(&self, date: NaiveDate, packed: Option<i64>) -> bool {
        self.session(date).is_some_and(|w| w.contains(packed))
    }
}

/// Same window on every date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedSession {
    pub window: SessionWindow,
}

impl FixedSession {
    pub fn new(window: SessionWindow) -> Self {
        Self { window }
    }
}

impl TradingCalendar for FixedSession {
    fn session(&self, _date: NaiveDate) -> Option<SessionWindow> {
        Some(self.window)
    }
}

/// Regular trading hours check against the default 09:30-16:00 window.
pub fn is_regular_trading_hours(date: NaiveDate, packed: Option<i64>) -> bool {
    FixedSession::default().is_regular_trading_hours(date, packed)
}
