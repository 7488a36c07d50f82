//! Calendar units.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// A named granularity of calendar time.
///
/// Variants are declared from finest to coarsest, so the derived ordering
/// follows granularity.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum CalendarUnit {
    Nanosecond,
    Second,
    Minute,
    Hour,
    Day,
    /// Day of the week, 1 = Sunday through 7 = Saturday.
    Weekday,
    /// Which occurrence of its weekday a day is within the month.
    WeekdayOrdinal,
    /// Alias for [`CalendarUnit::WeekOfYear`].
    Week,
    WeekOfMonth,
    WeekOfYear,
    Month,
    Quarter,
    Year,
    /// The year a week-of-year number belongs to.
    YearForWeekOfYear,
    Era,
}

impl CalendarUnit {
    /// Map `Week` to `WeekOfYear`; every other unit is returned as-is.
    pub fn normalized(self) -> Self {
        match self {
            Self::Week => Self::WeekOfYear,
            other => other,
        }
    }

    /// Fixed length of one unit in seconds, for units that have one.
    ///
    /// Month, quarter, year and era vary in length and return `None`.
    pub fn canonical_seconds(self) -> Option<f64> {
        match self.normalized() {
            Self::Nanosecond => Some(1e-9),
            Self::Second => Some(1.0),
            Self::Minute => Some(60.0),
            Self::Hour => Some(3_600.0),
            Self::Day | Self::Weekday => Some(86_400.0),
            Self::WeekdayOrdinal | Self::WeekOfMonth | Self::WeekOfYear => Some(604_800.0),
            _ => None,
        }
    }

    /// Whether the unit describes a period with a start and an end.
    pub fn has_period(self) -> bool {
        !matches!(self, Self::Nanosecond | Self::WeekdayOrdinal | Self::Era)
    }

    /// Whether the unit belongs to week-based year numbering.
    pub fn is_week_numbering(self) -> bool {
        matches!(
            self,
            Self::Week | Self::WeekOfYear | Self::YearForWeekOfYear
        )
    }
}
