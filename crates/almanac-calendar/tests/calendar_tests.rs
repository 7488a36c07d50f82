use almanac_calendar::{Calendar, CalendarUnit, FixedOffset, Instant, Weekday};
use strum::IntoEnumIterator;

fn at(s: &str) -> Instant {
    Instant::parse_rfc3339(s).unwrap()
}

/// Whole-second instants chosen around month, year and week-year boundaries.
fn sample_instants() -> Vec<Instant> {
    [
        "1970-01-01T00:00:00Z",
        "1999-12-31T23:59:59Z",
        "2020-12-31T12:00:00Z",
        "2021-01-01T08:30:00Z",
        "2023-03-31T23:15:42Z",
        "2024-01-31T09:00:00Z",
        "2024-02-29T00:00:00Z",
        "2024-06-01T18:45:10Z",
        "2024-12-30T06:00:00Z",
        "2026-10-18T14:07:03Z",
    ]
    .iter()
    .map(|s| at(s))
    .collect()
}

fn sample_calendars() -> Vec<Calendar> {
    vec![
        Calendar::iso(),
        Calendar::gregorian(),
        Calendar::iso()
            .with_utc_offset(FixedOffset::east_opt(5 * 3600 + 1800).unwrap())
            .with_first_weekday(Weekday::Sat)
            .with_minimum_days_in_first_week(2),
        Calendar::gregorian().with_utc_offset(FixedOffset::west_opt(8 * 3600).unwrap()),
    ]
}

#[test]
fn test_start_and_end_bracket_instant() {
    for cal in sample_calendars() {
        for x in sample_instants() {
            for unit in CalendarUnit::iter() {
                let start = cal.start_of(x, unit);
                let end = cal.end_of(x, unit);
                assert!(start <= x, "{unit}: start {start} > {x}");
                assert!(x <= end, "{unit}: end {end} < {x}");
            }
        }
    }
}

#[test]
fn test_period_boundaries_stable_under_next() {
    for cal in sample_calendars() {
        for x in sample_instants() {
            for unit in CalendarUnit::iter().filter(|u| *u != CalendarUnit::Nanosecond) {
                assert_eq!(
                    cal.start_of(cal.next(x, unit), unit),
                    cal.next(cal.start_of(x, unit), unit),
                    "{unit} at {x}"
                );
            }
        }
    }
}

#[test]
fn test_count_is_reflexive() {
    let cal = Calendar::iso();
    for x in sample_instants() {
        for unit in CalendarUnit::iter() {
            assert_eq!(cal.count(x, x, unit), 0, "{unit}");
        }
    }
}

#[test]
fn test_component_round_trip() {
    let x = at("2024-06-01T18:45:10.987654321Z");
    for cal in sample_calendars() {
        let comps = cal.components(x);
        let rebuilt = cal.changing(
            x,
            [
                (CalendarUnit::Year, comps.year),
                (CalendarUnit::Month, comps.month),
                (CalendarUnit::Day, comps.day),
                (CalendarUnit::Hour, comps.hour),
                (CalendarUnit::Minute, comps.minute),
                (CalendarUnit::Second, comps.second),
            ],
        );
        assert_eq!(rebuilt, cal.start_of(x, CalendarUnit::Second));
    }
}

#[test]
fn test_epoch_plus_36_hours() {
    let cal = Calendar::iso();
    let epoch = Instant::EPOCH;
    let later = at("1970-01-02T12:00:00Z");

    assert!((cal.precise_count(epoch, later, CalendarUnit::Day) - 1.5).abs() < 1e-12);
    assert_eq!(cal.count(epoch, later, CalendarUnit::Day), 1);
}

#[test]
fn test_month_count_is_calendar_based() {
    let cal = Calendar::iso();
    let feb = at("2024-02-01T12:00:00Z");
    let mar = at("2024-03-01T12:00:00Z");

    // A flat 30-day month would give 29/30.
    assert_eq!(cal.precise_count(feb, mar, CalendarUnit::Month), 1.0);
    assert_eq!(cal.count(feb, mar, CalendarUnit::Month), 1);
}

#[test]
fn test_week_alias_matches_week_of_year() {
    let cal = Calendar::iso();
    for x in sample_instants() {
        assert_eq!(
            cal.start_of(x, CalendarUnit::Week),
            cal.start_of(x, CalendarUnit::WeekOfYear)
        );
        assert_eq!(
            cal.next(x, CalendarUnit::Week),
            cal.next(x, CalendarUnit::WeekOfYear)
        );
        assert_eq!(
            cal.component(x, CalendarUnit::Week),
            cal.component(x, CalendarUnit::WeekOfYear)
        );
    }
}

#[test]
fn test_next_then_previous() {
    let cal = Calendar::gregorian();
    let x = at("2023-03-15T10:20:30Z");
    for unit in CalendarUnit::iter() {
        assert_eq!(cal.previous(cal.next(x, unit), unit), x, "{unit}");
    }
}

#[test]
fn test_invalid_dates_overflow_consistently() {
    let cal = Calendar::iso();
    let x = at("2023-04-10T00:00:00Z");

    let via_changing = cal.changing(x, [(CalendarUnit::Day, 31)]);
    let via_date = cal.date_ymd(2023, 4, 31).unwrap();
    assert_eq!(via_changing, at("2023-05-01T00:00:00Z"));
    assert_eq!(via_changing, via_date);

    let feb = cal.changing(x, [(CalendarUnit::Month, 2), (CalendarUnit::Day, 30)]);
    assert_eq!(feb, cal.date_ymd(2023, 2, 30).unwrap());
    assert_eq!(feb, at("2023-03-02T00:00:00Z"));
}

#[test]
fn test_calendars_are_independent() {
    let x = at("2024-05-17T02:00:00Z");
    let utc = Calendar::iso();
    let west = Calendar::iso().with_utc_offset(FixedOffset::west_opt(5 * 3600).unwrap());

    assert_eq!(utc.component(x, CalendarUnit::Day), 17);
    assert_eq!(west.component(x, CalendarUnit::Day), 16);
    // The first calendar is unaffected by building the second.
    assert_eq!(utc.start_of(x, CalendarUnit::Day), at("2024-05-17T00:00:00Z"));
}

#[test]
fn test_calendar_serde() {
    let cal = Calendar::gregorian().with_utc_offset(FixedOffset::east_opt(3600).unwrap());
    let json = serde_json::to_string(&cal).unwrap();
    let back: Calendar = serde_json::from_str(&json).unwrap();
    assert_eq!(back, cal);
    assert_eq!(back.utc_offset().local_minus_utc(), 3600);
}

#[test]
fn test_concurrent_use() {
    let cal = Calendar::iso();
    let x = at("2024-05-17T13:45:30Z");
    let expected = cal.end_of(x, CalendarUnit::Month);

    let handles: Vec<_> = (0..8)
        .map(|_| std::thread::spawn(move || cal.end_of(x, CalendarUnit::Month)))
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}
