//! Preset date formats.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::calendar::Calendar;
use crate::error::CalendarError;
use crate::instant::Instant;

/// Common date and time layouts, named by their pattern.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
pub enum DateFormat {
    /// `1-1-2001`
    #[strum(serialize = "d-M-y")]
    #[serde(rename = "d-M-y")]
    DMy,
    /// `01-01-2001`
    #[strum(serialize = "dd-MM-y")]
    #[serde(rename = "dd-MM-y")]
    DdMMy,
    /// `01 Jan 2001`
    #[strum(serialize = "dd MMM y")]
    #[serde(rename = "dd MMM y")]
    DdMMMy,
    /// `01 January 2001`
    #[strum(serialize = "dd MMMM y")]
    #[serde(rename = "dd MMMM y")]
    DdMMMMy,
    /// `1 Jan 2001`
    #[strum(serialize = "d MMM y")]
    #[serde(rename = "d MMM y")]
    DMMMy,
    /// `1 January 2001`
    #[strum(serialize = "d MMMM y")]
    #[serde(rename = "d MMMM y")]
    DMMMMy,
    /// `2001-01-01`
    #[strum(serialize = "y-MM-dd")]
    #[serde(rename = "y-MM-dd")]
    YMMdd,
    /// `16:05`
    #[strum(serialize = "HH:mm")]
    #[serde(rename = "HH:mm")]
    HHmm,
    /// `16:05:05`
    #[strum(serialize = "HH:mm:ss")]
    #[serde(rename = "HH:mm:ss")]
    HHmmss,
}

impl DateFormat {
    /// The chrono `strftime` pattern for this format.
    pub fn pattern(self) -> &'static str {
        match self {
            Self::DMy => "%-d-%-m-%Y",
            Self::DdMMy => "%d-%m-%Y",
            Self::DdMMMy => "%d %b %Y",
            Self::DdMMMMy => "%d %B %Y",
            Self::DMMMy => "%-d %b %Y",
            Self::DMMMMy => "%-d %B %Y",
            Self::YMMdd => "%Y-%m-%d",
            Self::HHmm => "%H:%M",
            Self::HHmmss => "%H:%M:%S",
        }
    }

    /// Whether the format only carries a time of day.
    pub fn is_time_only(self) -> bool {
        matches!(self, Self::HHmm | Self::HHmmss)
    }
}

impl Calendar {
    /// Render `instant` in local time using a preset format.
    pub fn format(&self, instant: Instant, format: DateFormat) -> String {
        self.local(instant).format(format.pattern()).to_string()
    }

    /// Parse local text in a preset format.
    ///
    /// Date formats resolve to local midnight. Time-only formats resolve to
    /// that time on 1970-01-01.
    pub fn parse(&self, input: &str, format: DateFormat) -> Result<Instant, CalendarError> {
        let mismatch = |source: chrono::ParseError| CalendarError::FormatMismatch {
            input: input.to_string(),
            format,
            source,
        };

        let local = if format.is_time_only() {
            let time = NaiveTime::parse_from_str(input, format.pattern()).map_err(mismatch)?;
            NaiveDateTime::new(NaiveDate::default(), time)
        } else {
            let date = NaiveDate::parse_from_str(input, format.pattern()).map_err(mismatch)?;
            date.and_time(NaiveTime::MIN)
        };

        self.instant_from_local(local)
            .ok_or_else(|| CalendarError::OutOfRange {
                input: input.to_string(),
            })
    }
}
