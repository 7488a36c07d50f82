//! Granularity comparisons and day-level queries.

use chrono::{Datelike, Weekday};

use crate::calendar::Calendar;
use crate::instant::Instant;
use crate::unit::CalendarUnit;

impl Calendar {
    /// Whether two instants fall in the same `unit` period.
    ///
    /// Units without a period compare the instants exactly.
    pub fn is_same(&self, a: Instant, b: Instant, unit: CalendarUnit) -> bool {
        if !unit.has_period() {
            return a == b;
        }
        self.start_of(a, unit) == self.start_of(b, unit)
    }

    /// Local midnight starting the day of `instant`.
    pub fn start_of_day(&self, instant: Instant) -> Instant {
        self.start_of(instant, CalendarUnit::Day)
    }

    /// Whether `instant` is on the same local day as `now`.
    pub fn is_today(&self, instant: Instant, now: Instant) -> bool {
        self.is_same(instant, now, CalendarUnit::Day)
    }

    /// Whether `instant` is on the local day before `now`.
    pub fn is_yesterday(&self, instant: Instant, now: Instant) -> bool {
        self.is_same(instant, self.previous(now, CalendarUnit::Day), CalendarUnit::Day)
    }

    /// Whether `instant` is on the local day after `now`.
    pub fn is_tomorrow(&self, instant: Instant, now: Instant) -> bool {
        self.is_same(instant, self.next(now, CalendarUnit::Day), CalendarUnit::Day)
    }

    /// Whether `instant` falls on a Saturday or Sunday in local time.
    pub fn is_weekend(&self, instant: Instant) -> bool {
        matches!(
            self.local(instant).weekday(),
            Weekday::Sat | Weekday::Sun
        )
    }

    /// Whether `instant` falls on a Monday through Friday in local time.
    pub fn is_workday(&self, instant: Instant) -> bool {
        !self.is_weekend(instant)
    }

    /// Number of days in the local month of `instant`.
    pub fn days_in_month(&self, instant: Instant) -> u32 {
        let start = self.start_of(instant, CalendarUnit::Month);
        let next = self.next(start, CalendarUnit::Month);
        self.count(start, next, CalendarUnit::Day) as u32
    }
}
