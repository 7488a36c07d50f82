//! Points in time.

use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, TimeDelta, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CalendarError;

const NANOS_PER_SEC: i128 = 1_000_000_000;

/// An immutable point in time with nanosecond resolution.
///
/// Instants carry no time zone; a [`Calendar`](crate::Calendar) supplies one
/// whenever an instant is broken down into components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Instant(DateTime<Utc>);

impl Instant {
    /// 1970-01-01T00:00:00Z.
    pub const EPOCH: Instant = Instant(DateTime::<Utc>::UNIX_EPOCH);

    /// The current wall-clock time.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Create an instant from seconds and nanoseconds since the Unix epoch.
    pub fn from_timestamp(secs: i64, nanos: u32) -> Option<Self> {
        DateTime::from_timestamp(secs, nanos).map(Self)
    }

    /// Create an instant from any time-zone-aware date time.
    pub fn from_datetime<Tz: TimeZone>(datetime: DateTime<Tz>) -> Self {
        Self(datetime.with_timezone(&Utc))
    }

    /// Parse an RFC 3339 timestamp such as `2024-02-01T12:00:00+01:00`.
    pub fn parse_rfc3339(input: &str) -> Result<Self, CalendarError> {
        DateTime::parse_from_rfc3339(input)
            .map(Self::from_datetime)
            .map_err(|source| CalendarError::InvalidTimestamp {
                input: input.to_string(),
                source,
            })
    }

    /// The underlying UTC date time.
    pub fn as_datetime(&self) -> DateTime<Utc> {
        self.0
    }

    /// Whole seconds since the Unix epoch.
    pub fn timestamp(&self) -> i64 {
        self.0.timestamp()
    }

    /// Nanoseconds past the whole second.
    pub fn subsec_nanos(&self) -> u32 {
        self.0.timestamp_subsec_nanos()
    }

    /// Seconds elapsed from `earlier` to `self`, negative if `earlier` is later.
    pub fn seconds_since(&self, earlier: Instant) -> f64 {
        let whole = (self.timestamp() - earlier.timestamp()) as f64;
        let frac = (self.subsec_nanos() as f64 - earlier.subsec_nanos() as f64) / 1e9;
        whole + frac
    }

    /// Nanoseconds elapsed from `earlier` to `self`.
    pub fn nanos_since(&self, earlier: Instant) -> i128 {
        let whole = (self.timestamp() as i128 - earlier.timestamp() as i128) * NANOS_PER_SEC;
        whole + self.subsec_nanos() as i128 - earlier.subsec_nanos() as i128
    }

    /// Add a duration, returning `None` on overflow.
    pub fn checked_add(&self, delta: TimeDelta) -> Option<Self> {
        self.0.checked_add_signed(delta).map(Self)
    }

    /// Subtract a duration, returning `None` on overflow.
    pub fn checked_sub(&self, delta: TimeDelta) -> Option<Self> {
        self.0.checked_sub_signed(delta).map(Self)
    }
}

impl From<DateTime<Utc>> for Instant {
    fn from(datetime: DateTime<Utc>) -> Self {
        Self(datetime)
    }
}

impl From<Instant> for DateTime<Utc> {
    fn from(instant: Instant) -> Self {
        instant.0
    }
}

impl Add<TimeDelta> for Instant {
    type Output = Instant;

    fn add(self, rhs: TimeDelta) -> Instant {
        Self(self.0 + rhs)
    }
}

impl Sub<TimeDelta> for Instant {
    type Output = Instant;

    fn sub(self, rhs: TimeDelta) -> Instant {
        Self(self.0 - rhs)
    }
}

impl Sub<Instant> for Instant {
    type Output = TimeDelta;

    fn sub(self, rhs: Instant) -> TimeDelta {
        self.0.signed_duration_since(rhs.0)
    }
}

impl FromStr for Instant {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_rfc3339(s)
    }
}

impl fmt::Display for Instant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epoch() {
        assert_eq!(Instant::EPOCH.timestamp(), 0);
        assert_eq!(Instant::from_timestamp(0, 0), Some(Instant::EPOCH));
        assert_eq!(Instant::EPOCH.to_string(), "1970-01-01T00:00:00Z");
    }

    #[test]
    fn test_parse_with_offset() {
        let instant: Instant = "2024-02-01T13:00:00+01:00".parse().unwrap();
        assert_eq!(instant.to_string(), "2024-02-01T12:00:00Z");
        assert!(Instant::parse_rfc3339("yesterday").is_err());
    }

    #[test]
    fn test_elapsed() {
        let a = Instant::from_timestamp(10, 500_000_000).unwrap();
        let b = Instant::from_timestamp(12, 0).unwrap();
        assert_eq!(b.seconds_since(a), 1.5);
        assert_eq!(a.seconds_since(b), -1.5);
        assert_eq!(b.nanos_since(a), 1_500_000_000);
        assert_eq!((b - a).num_milliseconds(), 1500);
    }

    #[test]
    fn test_ordering() {
        let a = Instant::from_timestamp(1, 0).unwrap();
        let b = a + TimeDelta::nanoseconds(1);
        assert!(a < b);
        assert_eq!(b - TimeDelta::nanoseconds(1), a);
    }
}
