//! Errors for parsing dates.
//!
//! Calendar arithmetic itself never fails; only turning text into an
//! [`Instant`](crate::Instant) can.

use thiserror::Error;

use crate::format::DateFormat;

/// Errors that can occur when parsing dates.
#[derive(Debug, Error)]
pub enum CalendarError {
    /// Input is not a valid RFC 3339 timestamp.
    #[error("Invalid timestamp '{input}': {source}")]
    InvalidTimestamp {
        input: String,
        #[source]
        source: chrono::ParseError,
    },

    /// Input does not match the requested date format.
    #[error("'{input}' does not match date format {format}")]
    FormatMismatch {
        input: String,
        format: DateFormat,
        #[source]
        source: chrono::ParseError,
    },

    /// Parsed components do not describe a representable instant.
    #[error("Date out of range: {input}")]
    OutOfRange { input: String },
}
