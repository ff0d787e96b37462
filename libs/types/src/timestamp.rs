//! Packed intraday timestamp codec
//!
//! Tick times are carried as a signed 64-bit integer laid out as the
//! zero-padded 15-digit decimal `HHMMSSnnnnnnnnn`:
//!
//! ```text
//! digits 1-2   hour          (00-23)
//! digits 3-4   minute        (00-59)
//! digits 5-6   second        (00-59)
//! digits 7-15  nanosecond    (000000000-999999999)
//! ```
//!
//! The packed integer is the canonical, lossless representation. For valid
//! values its numeric order is chronological order, so ordering and
//! tie-breaking are done on the integer directly.
//!
//! The civil projection (`to_civil_time`) is a lossy view: it is limited to
//! microsecond resolution and truncates the sub-microsecond nanoseconds.

use crate::errors::MalformedTimestamp;
use chrono::{DateTime, Duration, NaiveDate, Offset, TimeZone};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Largest valid packed value: 23:59:59.999999999
pub const MAX_PACKED: i64 = 235_959_999_999_999;

const NANOS_PER_SECOND: i64 = 1_000_000_000;
const NANOS_PER_MICRO: u32 = 1_000;

/// Civil timestamp in an exchange time zone, microsecond resolution.
///
/// Produced by [`to_civil_time`]; nanoseconds below 1000 are always zero.
pub type CivilTimestamp = DateTime<Tz>;

/// Decoded components of a packed timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DecodedTime {
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    pub nanosecond: u32,
}

impl DecodedTime {
    /// Build from components, rejecting out-of-range fields.
    pub fn new(hour: u32, minute: u32, second: u32, nanosecond: u32) -> Result<Self, MalformedTimestamp> {
        if hour > 23 || minute > 59 || second > 59 || nanosecond as i64 >= NANOS_PER_SECOND {
            return Err(MalformedTimestamp::InvalidComponents {
                packed: raw_pack(hour, minute, second, nanosecond),
                hour,
                minute,
                second,
                nanosecond,
            });
        }
        Ok(Self {
            hour,
            minute,
            second,
            nanosecond,
        })
    }

    /// Exact inverse of [`decode`].
    pub fn pack(&self) -> PackedTime {
        PackedTime(raw_pack(self.hour, self.minute, self.second, self.nanosecond))
    }

    /// Nanoseconds elapsed since midnight.
    pub fn nanos_since_midnight(&self) -> i64 {
        (self.hour as i64 * 3600 + self.minute as i64 * 60 + self.second as i64) * NANOS_PER_SECOND
            + self.nanosecond as i64
    }
}

// Saturates at i64::MAX for components far outside the valid range
fn raw_pack(hour: u32, minute: u32, second: u32, nanosecond: u32) -> i64 {
    let packed = (hour as i128 * 10_000 + minute as i128 * 100 + second as i128)
        * NANOS_PER_SECOND as i128
        + nanosecond as i128;
    i64::try_from(packed).unwrap_or(i64::MAX)
}

/// Decode a packed `HHMMSSnnnnnnnnn` value.
///
/// `None` models a null column value. Field slicing is done arithmetically on
/// the fixed-width decimal layout, no allocation.
pub fn decode(packed: Option<i64>) -> Result<DecodedTime, MalformedTimestamp> {
    let packed = packed.ok_or(MalformedTimestamp::Null)?;
    if !(0..=MAX_PACKED).contains(&packed) {
        return Err(MalformedTimestamp::OutOfRange { packed });
    }

    let nanosecond = (packed % NANOS_PER_SECOND) as u32;
    let hms = packed / NANOS_PER_SECOND;
    let second = (hms % 100) as u32;
    let minute = ((hms / 100) % 100) as u32;
    let hour = (hms / 10_000) as u32;

    if hour > 23 || minute > 59 || second > 59 {
        return Err(MalformedTimestamp::InvalidComponents {
            packed,
            hour,
            minute,
            second,
            nanosecond,
        });
    }

    Ok(DecodedTime {
        hour,
        minute,
        second,
        nanosecond,
    })
}

/// True when the raw value decodes successfully.
pub fn is_valid(packed: i64) -> bool {
    decode(Some(packed)).is_ok()
}

/// Project a packed time onto a civil timestamp.
///
/// Starts at midnight of `date` in `tz` and adds the hour, minute and second
/// offsets as elapsed time, then the nanosecond remainder truncated to whole
/// microseconds. On a DST transition day the offsets are elapsed time from
/// local midnight, not wall-clock fields.
pub fn to_civil_time(
    date: NaiveDate,
    packed: Option<i64>,
    tz: Tz,
) -> Result<CivilTimestamp, MalformedTimestamp> {
    let decoded = decode(packed)?;

    let local_midnight = date.and_time(chrono::NaiveTime::MIN);
    let midnight = match tz.from_local_datetime(&local_midnight).earliest() {
        Some(midnight) => midnight,
        None => {
            // Midnight falls in a DST gap: the offset in force before the
            // transition maps it onto the first valid instant after the gap
            let before = tz.offset_from_utc_datetime(&(local_midnight - Duration::days(1)));
            let shift = Duration::seconds(before.fix().local_minus_utc() as i64);
            tz.from_utc_datetime(&(local_midnight - shift))
        }
    };

    let micros = decoded.nanosecond / NANOS_PER_MICRO;
    Ok(midnight
        + Duration::hours(decoded.hour as i64)
        + Duration::minutes(decoded.minute as i64)
        + Duration::seconds(decoded.second as i64)
        + Duration::microseconds(micros as i64))
}

/// Validated packed timestamp value type.
///
/// Construction always validates, so a `PackedTime` is always decodable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct PackedTime(i64);

impl PackedTime {
    /// 00:00:00.000000000
    pub const MIDNIGHT: PackedTime = PackedTime(0);
    /// 23:59:59.999999999
    pub const END_OF_DAY: PackedTime = PackedTime(MAX_PACKED);

    /// Validate a raw packed value.
    pub fn new(raw: i64) -> Result<Self, MalformedTimestamp> {
        decode(Some(raw)).map(|_| Self(raw))
    }

    /// Build from clock components.
    pub fn from_hms_nano(hour: u32, minute: u32, second: u32, nanosecond: u32) -> Result<Self, MalformedTimestamp> {
        DecodedTime::new(hour, minute, second, nanosecond).map(|d| d.pack())
    }

    /// Raw packed integer.
    pub const fn raw(self) -> i64 {
        self.0
    }

    /// Decoded components (infallible, the value was validated on construction).
    pub fn decode(self) -> DecodedTime {
        let hms = self.0 / NANOS_PER_SECOND;
        DecodedTime {
            hour: (hms / 10_000) as u32,
            minute: ((hms / 100) % 100) as u32,
            second: (hms % 100) as u32,
            nanosecond: (self.0 % NANOS_PER_SECOND) as u32,
        }
    }

    pub fn nanos_since_midnight(self) -> i64 {
        self.decode().nanos_since_midnight()
    }

    /// Civil projection; see [`to_civil_time`].
    pub fn to_civil(self, date: NaiveDate, tz: Tz) -> CivilTimestamp {
        // Cannot fail: the value is valid.
        to_civil_time(date, Some(self.0), tz)
            .unwrap_or_else(|_| tz.from_utc_datetime(&date.and_time(chrono::NaiveTime::MIN)))
    }
}

impl TryFrom<i64> for PackedTime {
    type Error = MalformedTimestamp;

    fn try_from(raw: i64) -> Result<Self, Self::Error> {
        Self::new(raw)
    }
}

impl From<PackedTime> for i64 {
    fn from(t: PackedTime) -> Self {
        t.0
    }
}

impl fmt::Display for PackedTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = self.decode();
        write!(
            f,
            "{:02}:{:02}:{:02}.{:09}",
            d.hour, d.minute, d.second, d.nanosecond
        )
    }
}
