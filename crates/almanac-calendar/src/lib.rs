//! Calendar-aware date arithmetic for almanac.
//!
//! All operations are methods on an explicit [`Calendar`], which carries the
//! UTC offset and week-numbering rules. Nothing reads a process-wide
//! "current" calendar, so results are deterministic for a given calendar.
//!
//! - **Boundaries**: [`Calendar::start_of`] and [`Calendar::end_of`] a unit
//! - **Stepping**: [`Calendar::next`], [`Calendar::previous`], [`Calendar::adding`]
//! - **Edits**: [`Calendar::changing`] overrides components in one pass
//! - **Measuring**: [`Calendar::precise_count`] and [`Calendar::count`]
//!
//! Every operation is total. Units that have no meaning for an operation,
//! and results that would leave chrono's representable range, fall back to
//! returning the input unchanged.
//!
//! ```rust
//! use almanac_calendar::{Calendar, CalendarUnit, Instant};
//!
//! let cal = Calendar::iso();
//! let from = Instant::EPOCH;
//! let to = cal.adding(from, CalendarUnit::Hour, 36);
//!
//! assert_eq!(cal.precise_count(from, to, CalendarUnit::Day), 1.5);
//! assert_eq!(cal.count(from, to, CalendarUnit::Day), 1);
//! assert_eq!(cal.start_of(to, CalendarUnit::Day).to_string(), "1970-01-02T00:00:00Z");
//! ```

mod arithmetic;
mod calendar;
mod compare;
mod count;
mod error;
mod format;
mod instant;
mod unit;

pub use calendar::{Calendar, Components};
pub use error::CalendarError;
pub use format::DateFormat;
pub use instant::Instant;
pub use unit::CalendarUnit;

// Re-export chrono types that appear in the public API.
pub use chrono::{FixedOffset, TimeDelta, Weekday};
