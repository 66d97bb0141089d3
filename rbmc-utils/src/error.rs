/// Validation error types
use std::fmt;
use thiserror::Error;

/// Whether a year has 366 days, for error text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YearKind {
    Leap,
    Common,
}

impl fmt::Display for YearKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            YearKind::Leap => write!(f, "leap"),
            YearKind::Common => write!(f, "common"),
        }
    }
}

/// A single failed check on user input.
///
/// These are never raised out of a setter; they are collected into a
/// [`crate::DateValidation`] or returned as the `Err` of a non-panicking call,
/// and their `Display` text is what the form shows inline.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("invalid year")]
    MissingYear,

    #[error("year must be >= {floor}")]
    YearTooEarly { floor: i32 },

    #[error("year must be <= {current}")]
    YearInFuture { current: i32 },

    #[error("invalid day of year")]
    MissingDay,

    #[error("day of year must be >= 1")]
    DayTooSmall,

    #[error("day of year must be <= {max} ({kind} year)")]
    DayPastEndOfYear { max: u32, kind: YearKind },

    #[error("station code must be 4 letters, got {0:?}")]
    MalformedStationCode(String),
}
