//! Period boundaries, stepping and component edits.

use chrono::{Datelike, Days, Months, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike};
use tracing::trace;

use crate::calendar::{Calendar, overflowing_date, overflowing_time};
use crate::instant::Instant;
use crate::unit::CalendarUnit;

fn midnight(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

impl Calendar {
    /// The earliest instant in the same `unit` period as `instant`.
    ///
    /// Finer components are reset to their minimum. Week-like units start on
    /// the calendar's first weekday. Units without a period (nanosecond,
    /// weekday ordinal, era) return `instant` unchanged.
    pub fn start_of(&self, instant: Instant, unit: CalendarUnit) -> Instant {
        let local = self.local(instant);
        let date = local.date();

        let start = match unit {
            CalendarUnit::Nanosecond | CalendarUnit::WeekdayOrdinal | CalendarUnit::Era => {
                return instant;
            }
            CalendarUnit::Second => local.with_nanosecond(0),
            CalendarUnit::Minute => date.and_hms_opt(local.hour(), local.minute(), 0),
            CalendarUnit::Hour => date.and_hms_opt(local.hour(), 0, 0),
            CalendarUnit::Day | CalendarUnit::Weekday => Some(midnight(date)),
            CalendarUnit::Week | CalendarUnit::WeekOfYear | CalendarUnit::WeekOfMonth => {
                self.week_start(date).map(midnight)
            }
            CalendarUnit::Month => date.with_day(1).map(midnight),
            CalendarUnit::Quarter => {
                NaiveDate::from_ymd_opt(date.year(), date.month0() / 3 * 3 + 1, 1).map(midnight)
            }
            CalendarUnit::Year => NaiveDate::from_ymd_opt(date.year(), 1, 1).map(midnight),
            CalendarUnit::YearForWeekOfYear => self
                .week_of_year(date)
                .and_then(|(week_year, _)| self.first_week_start(week_year))
                .map(midnight),
        };

        self.resolve(start, instant, "start_of")
    }

    /// The last whole second of the `unit` period containing `instant`.
    ///
    /// Computed as one second before the start of the following period.
    /// Units without a period return `instant` unchanged.
    pub fn end_of(&self, instant: Instant, unit: CalendarUnit) -> Instant {
        if !unit.has_period() {
            return instant;
        }
        let next_start = self.start_of(self.next(instant, unit), unit);
        next_start
            .checked_sub(TimeDelta::seconds(1))
            .unwrap_or(instant)
    }

    /// `instant` advanced by one calendar-aware `unit`.
    pub fn next(&self, instant: Instant, unit: CalendarUnit) -> Instant {
        self.adding(instant, unit, 1)
    }

    /// `instant` moved back by one calendar-aware `unit`.
    pub fn previous(&self, instant: Instant, unit: CalendarUnit) -> Instant {
        self.adding(instant, unit, -1)
    }

    /// `instant` shifted by `amount` calendar-aware units.
    ///
    /// Month-based steps keep the day of month, clamped to the length of the
    /// target month. Week-like units step 7 days. Era is not steppable and
    /// returns `instant` unchanged.
    pub fn adding(&self, instant: Instant, unit: CalendarUnit, amount: i32) -> Instant {
        let amount = amount as i64;
        let shifted = match unit {
            CalendarUnit::Nanosecond => instant.checked_add(TimeDelta::nanoseconds(amount)),
            CalendarUnit::Second => self.add_seconds(instant, amount),
            CalendarUnit::Minute => self.add_seconds(instant, amount * 60),
            CalendarUnit::Hour => self.add_seconds(instant, amount * 3_600),
            CalendarUnit::Day | CalendarUnit::Weekday => self.add_days(instant, amount),
            CalendarUnit::Week
            | CalendarUnit::WeekOfYear
            | CalendarUnit::WeekOfMonth
            | CalendarUnit::WeekdayOrdinal => self.add_days(instant, amount * 7),
            CalendarUnit::Month => self.add_months(instant, amount),
            CalendarUnit::Quarter => self.add_months(instant, amount * 3),
            CalendarUnit::Year => self.add_months(instant, amount * 12),
            CalendarUnit::YearForWeekOfYear => self.add_week_years(instant, amount),
            CalendarUnit::Era => Some(instant),
        };

        shifted.unwrap_or_else(|| {
            trace!(%instant, %unit, amount, "step out of range, keeping instant");
            instant
        })
    }

    /// A new instant with the given components overridden.
    ///
    /// All edits apply to one snapshot of `instant`'s components, which is
    /// then recomposed once, so edit order does not matter. The result has
    /// whole-second precision unless `Nanosecond` is among the edits.
    ///
    /// Editing `Week`, `WeekOfYear` or `YearForWeekOfYear` recomposes from
    /// week-year, week number and weekday; in that mode an edited `Year`
    /// is applied to the week-numbering year. Otherwise an edited `Weekday`
    /// moves the date within its week. `Quarter`, `Era`, `WeekdayOrdinal`
    /// and `WeekOfMonth` edits are ignored.
    ///
    /// Out-of-range values overflow into the neighbouring period: February
    /// 30th becomes March 1st or 2nd and month 13 becomes January of the
    /// next year.
    pub fn changing<I>(&self, instant: Instant, edits: I) -> Instant
    where
        I: IntoIterator<Item = (CalendarUnit, i32)>,
    {
        let mut comps = self.components(instant);
        comps.nanosecond = 0;

        let mut edited = Vec::new();
        for (unit, value) in edits {
            comps.set(unit, value);
            edited.push(unit);
        }

        let touched = |unit: CalendarUnit| edited.contains(&unit);
        let week_based = edited.iter().any(|u| u.is_week_numbering());

        let date = if week_based {
            if touched(CalendarUnit::Year) && !touched(CalendarUnit::YearForWeekOfYear) {
                comps.year_for_week_of_year = comps.year;
            }
            self.week_date(comps.year_for_week_of_year, comps.week_of_year, comps.weekday)
        } else {
            let date = overflowing_date(comps.year, comps.month, comps.day);
            if touched(CalendarUnit::Weekday) {
                date.and_then(|d| self.with_weekday(d, comps.weekday))
            } else {
                date
            }
        };

        let local = date.and_then(|d| {
            overflowing_time(d, comps.hour, comps.minute, comps.second, comps.nanosecond)
        });
        self.resolve(local, instant, "changing")
    }

    /// Build an instant from local date and time fields.
    ///
    /// Out-of-range fields overflow the same way as in [`Calendar::changing`].
    /// Returns `None` only when the result is not representable.
    pub fn date(
        &self,
        year: i32,
        month: i32,
        day: i32,
        hour: i32,
        minute: i32,
        second: i32,
    ) -> Option<Instant> {
        let date = overflowing_date(year, month, day)?;
        let local = overflowing_time(date, hour, minute, second, 0)?;
        self.instant_from_local(local)
    }

    /// Build an instant at local midnight of the given day.
    pub fn date_ymd(&self, year: i32, month: i32, day: i32) -> Option<Instant> {
        self.date(year, month, day, 0, 0, 0)
    }

    fn resolve(
        &self,
        local: Option<NaiveDateTime>,
        fallback: Instant,
        op: &'static str,
    ) -> Instant {
        local
            .and_then(|l| self.instant_from_local(l))
            .unwrap_or_else(|| {
                trace!(%fallback, op, "result out of range, keeping instant");
                fallback
            })
    }

    fn add_seconds(&self, instant: Instant, seconds: i64) -> Option<Instant> {
        instant.checked_add(TimeDelta::try_seconds(seconds)?)
    }

    fn add_days(&self, instant: Instant, days: i64) -> Option<Instant> {
        let local = self.local(instant);
        let shifted = local.checked_add_signed(TimeDelta::try_days(days)?)?;
        self.instant_from_local(shifted)
    }

    fn add_months(&self, instant: Instant, months: i64) -> Option<Instant> {
        let local = self.local(instant);
        let shifted = shift_months(local, months)?;
        self.instant_from_local(shifted)
    }

    fn add_week_years(&self, instant: Instant, years: i64) -> Option<Instant> {
        let local = self.local(instant);
        let date = local.date();
        let (week_year, week) = self.week_of_year(date)?;
        let target = week_year.checked_add(i32::try_from(years).ok()?)?;
        let week = week.min(self.weeks_in_week_year(target)?);
        let day = self
            .first_week_start(target)?
            .checked_add_days(Days::new((week as u64 - 1) * 7 + self.days_into_week(date)))?;
        self.instant_from_local(NaiveDateTime::new(day, local.time()))
    }
}

/// Shift a local date time by whole months, clamping the day of month.
pub(crate) fn shift_months(local: NaiveDateTime, months: i64) -> Option<NaiveDateTime> {
    let count = Months::new(u32::try_from(months.unsigned_abs()).ok()?);
    let date = if months >= 0 {
        local.date().checked_add_months(count)?
    } else {
        local.date().checked_sub_months(count)?
    };
    Some(NaiveDateTime::new(date, local.time()))
}
