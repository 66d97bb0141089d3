//! Shared utility functions for RBMC crates.
//!
//! - `dates`: Gregorian leap years and 1-based day-of-year conversions
//! - `validation`: year/day-of-year form validation that collects every failure
//! - `error`: the `ValidationError` type shared by the other crates

pub mod dates;
pub mod error;
pub mod validation;

pub use dates::DateSelection;
pub use error::ValidationError;
pub use validation::DateValidation;
