//! Calendar helpers built around the 1-based day-of-year (January 1 = day 1).

use chrono::{DateTime, Datelike, Local, NaiveDate, TimeDelta};
use std::fmt;

/// First year served by the RBMC archive.
pub const FIRST_RBMC_YEAR: i32 = 1995;

/// Gregorian rule: divisible by 4 and not by 100, or divisible by 400.
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in `year` (365 or 366).
pub fn max_day_of_year(year: i32) -> u32 {
    if is_leap_year(year) {
        366
    } else {
        365
    }
}

/// Day-of-year of `date`, 1-based.
pub fn date_to_day_of_year(date: &NaiveDate) -> u32 {
    date.ordinal()
}

/// Calendar date for a 1-based day-of-year.
///
/// Returns `None` when `day_of_year` is 0 or past the end of `year`.
pub fn day_of_year_to_date(year: i32, day_of_year: u32) -> Option<NaiveDate> {
    NaiveDate::from_yo_opt(year, day_of_year)
}

/// The current local date, read from the host clock on every call.
pub fn today() -> NaiveDate {
    let dt: DateTime<Local> = Local::now();
    dt.naive_local().date()
}

/// The current local year, read from the host clock on every call.
pub fn current_year() -> i32 {
    today().year()
}

/// Format a NaiveDate as "YYYY-MM-DD"
pub fn format_date(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Parse a date string in "YYYY-MM-DD" format
pub fn parse_date(s: &str) -> anyhow::Result<NaiveDate> {
    Ok(NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")?)
}

/// A validated (year, day-of-year) pair.
///
/// Only produced by [`crate::validation`], so holding one means the pair
/// passed every range check at the time it was built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DateSelection {
    year: i32,
    day_of_year: u32,
}

impl DateSelection {
    pub(crate) fn new_unchecked(year: i32, day_of_year: u32) -> Self {
        Self { year, day_of_year }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn day_of_year(&self) -> u32 {
        self.day_of_year
    }

    /// Day-of-year zero-padded to three digits, as used in RBMC paths.
    pub fn padded_day(&self) -> String {
        format!("{:03}", self.day_of_year)
    }

    pub fn as_naive_date(&self) -> Option<NaiveDate> {
        day_of_year_to_date(self.year, self.day_of_year)
    }
}

impl fmt::Display for DateSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{:03}", self.year, self.day_of_year)
    }
}

/// Quick-select shortcuts offered next to the manual year/day inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuickSelect {
    Today,
    Yesterday,
}

impl QuickSelect {
    /// Raw (year, day-of-year) for this shortcut relative to `today`.
    ///
    /// The pair is not validated here; callers feed it through the same
    /// validated setter as manual input.
    pub fn year_and_day_from(&self, today: NaiveDate) -> (i32, u32) {
        let date = match self {
            QuickSelect::Today => today,
            QuickSelect::Yesterday => today - TimeDelta::days(1),
        };
        (date.year(), date_to_day_of_year(&date))
    }

    /// Raw (year, day-of-year) for this shortcut relative to the host clock.
    pub fn year_and_day(&self) -> (i32, u32) {
        self.year_and_day_from(today())
    }
}
