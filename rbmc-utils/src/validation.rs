//! Year/day-of-year input validation.
//!
//! Every check runs, in order, and each failing one contributes one
//! [`ValidationError`]. Nothing here panics or returns `Err`; a failed
//! validation is a value the caller renders and uses to gate actions.

use crate::dates::{current_year, is_leap_year, max_day_of_year, DateSelection, FIRST_RBMC_YEAR};
use crate::error::{ValidationError, YearKind};
use std::num::IntErrorKind;

/// Outcome of validating a (year, day-of-year) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateValidation {
    errors: Vec<ValidationError>,
    selection: Option<DateSelection>,
}

impl DateValidation {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Failed checks in evaluation order.
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(|e| e.to_string()).collect()
    }

    /// All messages joined for a single inline label; empty when valid.
    pub fn message(&self) -> String {
        self.messages().join("; ")
    }

    /// The validated pair, present iff `is_valid()`.
    pub fn selection(&self) -> Option<DateSelection> {
        self.selection
    }
}

/// Validate numeric input against the host clock's current year.
pub fn validate_date_input(year: i32, day_of_year: u32) -> DateValidation {
    validate_date_input_at(year, day_of_year, current_year())
}

/// Validate numeric input against an explicit `current_year`.
pub fn validate_date_input_at(year: i32, day_of_year: u32, current_year: i32) -> DateValidation {
    run_checks(Some(year), Some(i64::from(day_of_year)), current_year)
}

/// Validate raw form text against the host clock's current year.
pub fn validate_raw_date_input(year: &str, day_of_year: &str) -> DateValidation {
    validate_raw_date_input_at(year, day_of_year, current_year())
}

/// Validate raw form text against an explicit `current_year`.
///
/// Blank or non-numeric text fails the "present and numeric" check for that
/// field; surrounding whitespace is ignored.
pub fn validate_raw_date_input_at(
    year: &str,
    day_of_year: &str,
    current_year: i32,
) -> DateValidation {
    let year = parse_number(year).map(|y| y.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32);
    let day = parse_number(day_of_year);
    run_checks(year, day, current_year)
}

/// Digits that overflow still count as numeric; they saturate so the range
/// checks report them.
fn parse_number(raw: &str) -> Option<i64> {
    match raw.trim().parse::<i64>() {
        Ok(n) => Some(n),
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => Some(i64::MAX),
            IntErrorKind::NegOverflow => Some(i64::MIN),
            _ => None,
        },
    }
}

fn run_checks(year: Option<i32>, day: Option<i64>, current_year: i32) -> DateValidation {
    let mut errors = Vec::new();

    match year {
        None => errors.push(ValidationError::MissingYear),
        Some(y) => {
            if y < FIRST_RBMC_YEAR {
                errors.push(ValidationError::YearTooEarly {
                    floor: FIRST_RBMC_YEAR,
                });
            }
            if y > current_year {
                errors.push(ValidationError::YearInFuture {
                    current: current_year,
                });
            }
        }
    }

    // Without a usable year the upper bound falls back to the longest year.
    let (max_day, kind) = match year {
        Some(y) if is_leap_year(y) => (max_day_of_year(y), YearKind::Leap),
        Some(y) => (max_day_of_year(y), YearKind::Common),
        None => (366, YearKind::Leap),
    };

    match day {
        None => errors.push(ValidationError::MissingDay),
        Some(d) => {
            if d < 1 {
                errors.push(ValidationError::DayTooSmall);
            }
            if d > i64::from(max_day) {
                errors.push(ValidationError::DayPastEndOfYear { max: max_day, kind });
            }
        }
    }

    let selection = match (errors.is_empty(), year, day) {
        (true, Some(y), Some(d)) => u32::try_from(d)
            .ok()
            .map(|d| DateSelection::new_unchecked(y, d)),
        _ => None,
    };

    DateValidation { errors, selection }
}
