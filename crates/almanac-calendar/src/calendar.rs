//! Calendar configuration, component breakdown and week numbering.

use chrono::{
    Datelike, Days, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeDelta,
    TimeZone, Timelike, Utc, Weekday,
};
use serde::{Deserialize, Serialize};

use crate::instant::Instant;
use crate::unit::CalendarUnit;

/// Time zone and week-numbering rules used to interpret instants.
///
/// Every arithmetic operation takes the calendar explicitly. There is no
/// process-wide current calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Calendar {
    /// Offset from UTC in seconds, east positive.
    #[serde(default)]
    utc_offset_secs: i32,
    /// Day that starts a week.
    first_weekday: Weekday,
    /// Days of the new year the first week must contain (1..=7).
    minimum_days_in_first_week: u8,
}

impl Calendar {
    /// ISO 8601 rules in UTC: weeks start on Monday and week 1 contains the
    /// year's first Thursday.
    pub fn iso() -> Self {
        Self {
            utc_offset_secs: 0,
            first_weekday: Weekday::Mon,
            minimum_days_in_first_week: 4,
        }
    }

    /// US-style Gregorian rules in UTC: weeks start on Sunday and week 1 is
    /// the week containing January 1st.
    pub fn gregorian() -> Self {
        Self {
            utc_offset_secs: 0,
            first_weekday: Weekday::Sun,
            minimum_days_in_first_week: 1,
        }
    }

    /// Use a fixed UTC offset for local time.
    pub fn with_utc_offset(mut self, offset: FixedOffset) -> Self {
        self.utc_offset_secs = offset.local_minus_utc();
        self
    }

    /// Set the weekday that starts a week.
    pub fn with_first_weekday(mut self, weekday: Weekday) -> Self {
        self.first_weekday = weekday;
        self
    }

    /// Set the minimum number of days of a new year in its first week.
    /// Values are clamped to 1..=7.
    pub fn with_minimum_days_in_first_week(mut self, days: u8) -> Self {
        self.minimum_days_in_first_week = days.clamp(1, 7);
        self
    }

    /// The UTC offset of local time.
    pub fn utc_offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_secs).unwrap_or(Utc.fix())
    }

    /// The weekday that starts a week.
    pub fn first_weekday(&self) -> Weekday {
        self.first_weekday
    }

    /// The minimum number of days of a new year in its first week.
    pub fn minimum_days_in_first_week(&self) -> u8 {
        self.minimum_days_in_first_week.clamp(1, 7)
    }

    /// Break an instant down into all of its components.
    pub fn components(&self, instant: Instant) -> Components {
        let local = self.local(instant);
        let date = local.date();
        let (year_for_week_of_year, week_of_year) = self
            .week_of_year(date)
            .unwrap_or((date.year(), date.ordinal0() / 7 + 1));

        Components {
            era: if date.year() > 0 { 1 } else { 0 },
            year: date.year(),
            quarter: (date.month0() / 3 + 1) as i32,
            month: date.month() as i32,
            day: date.day() as i32,
            hour: local.hour() as i32,
            minute: local.minute() as i32,
            second: local.second() as i32,
            nanosecond: local.nanosecond() as i32,
            weekday: weekday_index(date.weekday()),
            weekday_ordinal: (date.day0() / 7 + 1) as i32,
            week_of_month: self.week_of_month(date),
            week_of_year: week_of_year as i32,
            year_for_week_of_year,
        }
    }

    /// A single component of an instant.
    pub fn component(&self, instant: Instant, unit: CalendarUnit) -> i32 {
        self.components(instant).value(unit)
    }

    /// Local wall-clock time of an instant.
    pub(crate) fn local(&self, instant: Instant) -> NaiveDateTime {
        instant
            .as_datetime()
            .with_timezone(&self.utc_offset())
            .naive_local()
    }

    /// Instant for a local wall-clock time.
    pub(crate) fn instant_from_local(&self, local: NaiveDateTime) -> Option<Instant> {
        self.utc_offset()
            .from_local_datetime(&local)
            .single()
            .map(Instant::from_datetime)
    }

    /// Days from the start of the week to `date` (0..=6).
    pub(crate) fn days_into_week(&self, date: NaiveDate) -> u64 {
        let day = date.weekday().num_days_from_monday();
        let first = self.first_weekday.num_days_from_monday();
        ((day + 7 - first) % 7) as u64
    }

    /// First day of the week containing `date`.
    pub(crate) fn week_start(&self, date: NaiveDate) -> Option<NaiveDate> {
        date.checked_sub_days(Days::new(self.days_into_week(date)))
    }

    /// First day of week 1 of a week-numbering year.
    pub(crate) fn first_week_start(&self, year: i32) -> Option<NaiveDate> {
        let jan1 = NaiveDate::from_ymd_opt(year, 1, 1)?;
        let lead = self.days_into_week(jan1);
        let start = jan1.checked_sub_days(Days::new(lead))?;
        if 7 - lead >= self.minimum_days_in_first_week() as u64 {
            Some(start)
        } else {
            start.checked_add_days(Days::new(7))
        }
    }

    /// Week-numbering year and week number of `date`.
    pub(crate) fn week_of_year(&self, date: NaiveDate) -> Option<(i32, u32)> {
        let year = date.year();
        let next_start = self.first_week_start(year.checked_add(1)?)?;
        if date >= next_start {
            return Some((year + 1, 1));
        }

        let start = self.first_week_start(year)?;
        let (week_year, start) = if date >= start {
            (year, start)
        } else {
            (year - 1, self.first_week_start(year - 1)?)
        };
        let week = (date - start).num_days() / 7 + 1;
        Some((week_year, week as u32))
    }

    /// Number of weeks in a week-numbering year (52 or 53).
    pub(crate) fn weeks_in_week_year(&self, year: i32) -> Option<u32> {
        let start = self.first_week_start(year)?;
        let next = self.first_week_start(year.checked_add(1)?)?;
        Some(((next - start).num_days() / 7) as u32)
    }

    /// Week of the month, counting a partial first week as week 1.
    fn week_of_month(&self, date: NaiveDate) -> i32 {
        let first = date.with_day(1).unwrap_or(date);
        ((date.day0() as u64 + self.days_into_week(first)) / 7 + 1) as i32
    }

    /// Date for a week-numbering year, week and weekday index.
    ///
    /// Out-of-range weeks roll into adjacent years; weekday indices wrap
    /// modulo 7.
    pub(crate) fn week_date(&self, week_year: i32, week: i32, weekday: i32) -> Option<NaiveDate> {
        let start = self.first_week_start(week_year)?;
        let first = weekday_index(self.first_weekday) as i64;
        let offset = (weekday as i64 - first).rem_euclid(7);
        let days = (week as i64 - 1) * 7 + offset;
        start.checked_add_signed(TimeDelta::try_days(days)?)
    }

    /// Move `date` to the given weekday index within its week.
    pub(crate) fn with_weekday(&self, date: NaiveDate, weekday: i32) -> Option<NaiveDate> {
        let start = self.week_start(date)?;
        let first = weekday_index(self.first_weekday) as i64;
        let offset = (weekday as i64 - first).rem_euclid(7) as u64;
        start.checked_add_days(Days::new(offset))
    }
}

impl Default for Calendar {
    fn default() -> Self {
        Self::iso()
    }
}

/// Weekday index with 1 = Sunday through 7 = Saturday.
pub(crate) fn weekday_index(weekday: Weekday) -> i32 {
    weekday.num_days_from_sunday() as i32 + 1
}

/// Build a local date from year, month and day, letting out-of-range months
/// and days overflow into neighbouring months and years.
pub(crate) fn overflowing_date(year: i32, month: i32, day: i32) -> Option<NaiveDate> {
    let month0 = month as i64 - 1;
    let year = year.checked_add(month0.div_euclid(12) as i32)?;
    let first = NaiveDate::from_ymd_opt(year, month0.rem_euclid(12) as u32 + 1, 1)?;
    first.checked_add_signed(TimeDelta::try_days(day as i64 - 1)?)
}

/// Attach a time of day to `date`, letting out-of-range fields overflow.
pub(crate) fn overflowing_time(
    date: NaiveDate,
    hour: i32,
    minute: i32,
    second: i32,
    nanosecond: i32,
) -> Option<NaiveDateTime> {
    let seconds = hour as i64 * 3_600 + minute as i64 * 60 + second as i64;
    date.and_time(NaiveTime::MIN)
        .checked_add_signed(TimeDelta::try_seconds(seconds)?)?
        .checked_add_signed(TimeDelta::nanoseconds(nanosecond as i64))
}

/// Breakdown of an instant in a particular calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Components {
    /// 1 for the common era, 0 before it.
    pub era: i32,
    /// Proleptic Gregorian year (year 0 is 1 BCE).
    pub year: i32,
    pub quarter: i32,
    pub month: i32,
    pub day: i32,
    pub hour: i32,
    pub minute: i32,
    pub second: i32,
    pub nanosecond: i32,
    /// 1 = Sunday through 7 = Saturday.
    pub weekday: i32,
    pub weekday_ordinal: i32,
    pub week_of_month: i32,
    pub week_of_year: i32,
    pub year_for_week_of_year: i32,
}

impl Components {
    /// Value of the component for a unit. `Week` reads `week_of_year`.
    pub fn value(&self, unit: CalendarUnit) -> i32 {
        match unit {
            CalendarUnit::Nanosecond => self.nanosecond,
            CalendarUnit::Second => self.second,
            CalendarUnit::Minute => self.minute,
            CalendarUnit::Hour => self.hour,
            CalendarUnit::Day => self.day,
            CalendarUnit::Weekday => self.weekday,
            CalendarUnit::WeekdayOrdinal => self.weekday_ordinal,
            CalendarUnit::Week | CalendarUnit::WeekOfYear => self.week_of_year,
            CalendarUnit::WeekOfMonth => self.week_of_month,
            CalendarUnit::Month => self.month,
            CalendarUnit::Quarter => self.quarter,
            CalendarUnit::Year => self.year,
            CalendarUnit::YearForWeekOfYear => self.year_for_week_of_year,
            CalendarUnit::Era => self.era,
        }
    }

    /// Overwrite the component for a unit. `Week` writes `week_of_year`.
    pub fn set(&mut self, unit: CalendarUnit, value: i32) {
        let slot = match unit {
            CalendarUnit::Nanosecond => &mut self.nanosecond,
            CalendarUnit::Second => &mut self.second,
            CalendarUnit::Minute => &mut self.minute,
            CalendarUnit::Hour => &mut self.hour,
            CalendarUnit::Day => &mut self.day,
            CalendarUnit::Weekday => &mut self.weekday,
            CalendarUnit::WeekdayOrdinal => &mut self.weekday_ordinal,
            CalendarUnit::Week | CalendarUnit::WeekOfYear => &mut self.week_of_year,
            CalendarUnit::WeekOfMonth => &mut self.week_of_month,
            CalendarUnit::Month => &mut self.month,
            CalendarUnit::Quarter => &mut self.quarter,
            CalendarUnit::Year => &mut self.year,
            CalendarUnit::YearForWeekOfYear => &mut self.year_for_week_of_year,
            CalendarUnit::Era => &mut self.era,
        };
        *slot = value;
    }
}
