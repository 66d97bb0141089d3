//! Dashboard state for RBMC station telemetry.
//!
//! This crate provides:
//! - `store`: the selection/caches store with typed publish/subscribe
//! - `controller`: validated form input and download-button enablement
//! - `map`, `chart`, `metadata_panel`: pure models the widgets render
//! - `dashboard`: a session wiring the above to a `TelemetrySource`

pub mod chart;
pub mod controller;
pub mod dashboard;
pub mod map;
pub mod metadata_panel;
pub mod store;

pub use dashboard::Dashboard;
pub use store::{AppStore, EventKind, StoreEvent};
