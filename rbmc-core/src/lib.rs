//! Core types, URL builders and API client for RBMC station telemetry.
//!
//! The HTTP client lives behind the `api` feature so the types and path
//! builders stay usable in builds that do their own transport.

#[cfg(feature = "api")]
pub mod client;
pub mod error;
pub mod metadata;
pub mod series;
pub mod source;
pub mod station;
pub mod urls;

pub use error::TransportError;
pub use metadata::StationMetadata;
pub use series::{Sample, SeriesKey, SeriesKind, SeriesResponse};
pub use source::TelemetrySource;
pub use station::{Station, StationCode, StationStatus};
