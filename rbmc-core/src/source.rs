use crate::{
    error::Result, metadata::StationMetadata, series::SeriesKey, series::SeriesKind,
    series::SeriesResponse, station::Station, station::StationCode,
};
use async_trait::async_trait;

/// Where station lists, metadata and series come from.
///
/// The HTTP client implements this; tests and offline tools can plug in
/// their own. Futures are not required to be `Send` because the dashboard
/// drives everything from a single thread.
#[async_trait(?Send)]
pub trait TelemetrySource {
    /// Station list. Never fails: implementations substitute a fallback list.
    async fn stations(&self) -> Vec<Station>;

    async fn metadata(&self, station: &StationCode) -> Result<StationMetadata>;

    async fn series(&self, kind: SeriesKind, key: &SeriesKey, max: u32) -> Result<SeriesResponse>;
}
