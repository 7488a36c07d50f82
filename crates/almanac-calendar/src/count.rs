//! Measuring intervals between instants.

use chrono::Datelike;

use crate::arithmetic::shift_months;
use crate::calendar::Calendar;
use crate::instant::Instant;
use crate::unit::CalendarUnit;

impl Calendar {
    /// Fractional number of `unit`s from `from` to `to`.
    ///
    /// Units with a fixed length divide the elapsed seconds by that length.
    /// Month, quarter and year count whole calendar months first and add the
    /// remainder as a fraction of the following month step, so one calendar
    /// month is exactly `1.0` whatever its length. The result is negative
    /// when `to` is before `from`.
    pub fn precise_count(&self, from: Instant, to: Instant, unit: CalendarUnit) -> f64 {
        match unit.normalized() {
            CalendarUnit::Nanosecond => to.nanos_since(from) as f64,
            CalendarUnit::Month => self.month_steps(from, to, 1),
            CalendarUnit::Quarter => self.month_steps(from, to, 3),
            CalendarUnit::Year | CalendarUnit::YearForWeekOfYear => self.month_steps(from, to, 12),
            CalendarUnit::Era => {
                (self.components(to).era - self.components(from).era) as f64
            }
            flat => match flat.canonical_seconds() {
                Some(length) => to.seconds_since(from) / length,
                None => to.seconds_since(from),
            },
        }
    }

    /// Whole number of `unit`s from `from` to `to`, truncated toward zero.
    pub fn count(&self, from: Instant, to: Instant, unit: CalendarUnit) -> i64 {
        self.precise_count(from, to, unit).trunc() as i64
    }

    fn month_steps(&self, from: Instant, to: Instant, step: i64) -> f64 {
        if to < from {
            return -self.month_steps(to, from, step);
        }

        let start = self.local(from);
        let end = self.local(to);
        let shift = |steps: i64| shift_months(start, steps * step);

        let span = (end.year() as i64 - start.year() as i64) * 12 + end.month() as i64
            - start.month() as i64;
        let mut whole = span.max(0) / step;
        while whole > 0 && shift(whole).is_none_or(|t| t > end) {
            whole -= 1;
        }
        while shift(whole + 1).is_some_and(|t| t <= end) {
            whole += 1;
        }

        match (shift(whole), shift(whole + 1)) {
            (Some(lower), Some(upper)) => {
                let done = (end - lower).num_milliseconds() as f64;
                let length = (upper - lower).num_milliseconds() as f64;
                if length > 0.0 {
                    whole as f64 + done / length
                } else {
                    whole as f64
                }
            }
            _ => whole as f64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> Instant {
        Instant::parse_rfc3339(s).unwrap()
    }

    #[test]
    fn test_flat_units() {
        let cal = Calendar::iso();
        let from = Instant::EPOCH;
        let to = at("1970-01-02T12:00:00Z");

        assert_eq!(cal.precise_count(from, to, CalendarUnit::Day), 1.5);
        assert_eq!(cal.count(from, to, CalendarUnit::Day), 1);
        assert_eq!(cal.precise_count(from, to, CalendarUnit::Hour), 36.0);
        assert_eq!(cal.precise_count(from, to, CalendarUnit::Minute), 2_160.0);
        assert_eq!(cal.precise_count(from, to, CalendarUnit::Second), 129_600.0);
        assert_eq!(cal.count(from, to, CalendarUnit::Week), 0);
    }

    #[test]
    fn test_reversed_counts_are_negative() {
        let cal = Calendar::iso();
        let from = at("1970-01-02T12:00:00Z");
        assert_eq!(cal.precise_count(from, Instant::EPOCH, CalendarUnit::Day), -1.5);
        assert_eq!(cal.count(from, Instant::EPOCH, CalendarUnit::Day), -1);
    }

    #[test]
    fn test_calendar_months() {
        let cal = Calendar::iso();
        let feb = at("2024-02-01T12:00:00Z");
        let mar = at("2024-03-01T12:00:00Z");
        assert_eq!(cal.precise_count(feb, mar, CalendarUnit::Month), 1.0);

        let jan = at("2023-01-01T00:00:00Z");
        let jan_next = at("2024-01-01T00:00:00Z");
        assert_eq!(cal.precise_count(jan, jan_next, CalendarUnit::Year), 1.0);
        assert_eq!(cal.precise_count(jan, jan_next, CalendarUnit::Quarter), 4.0);
        assert_eq!(cal.precise_count(jan, jan_next, CalendarUnit::Month), 12.0);
    }

    #[test]
    fn test_fractional_month() {
        let cal = Calendar::iso();
        // Half of April (30 days) after a whole month.
        let from = at("2024-03-01T00:00:00Z");
        let to = at("2024-04-16T00:00:00Z");
        assert_eq!(cal.precise_count(from, to, CalendarUnit::Month), 1.5);
        assert_eq!(cal.count(from, to, CalendarUnit::Month), 1);
    }

    #[test]
    fn test_month_end_clamping() {
        let cal = Calendar::iso();
        let from = at("2024-01-31T00:00:00Z");
        let to = at("2024-02-29T00:00:00Z");
        assert_eq!(cal.count(from, to, CalendarUnit::Month), 1);
        assert_eq!(cal.count(to, from, CalendarUnit::Month), -1);
    }

    #[test]
    fn test_count_same_instant() {
        let cal = Calendar::gregorian();
        let x = at("2024-05-17T13:45:30Z");
        assert_eq!(cal.count(x, x, CalendarUnit::Year), 0);
        assert_eq!(cal.precise_count(x, x, CalendarUnit::Month), 0.0);
        assert_eq!(cal.count(x, x, CalendarUnit::Era), 0);
    }
}
