//! reqwest-backed client for the RBMC backend JSON endpoints.

use crate::{
    error::{Result, TransportError},
    metadata::StationMetadata,
    series::{SeriesKey, SeriesKind, SeriesResponse},
    source::TelemetrySource,
    station::{Station, StationCode},
    urls,
};
use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Backend origin used when none is configured.
pub const DEFAULT_ORIGIN: &str = "http://localhost:8080";

/// Connection settings for [`RbmcClient`].
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Scheme, host and port of the backend; paths are appended to it.
    pub origin: String,
    /// Whole-request timeout. `None` keeps the transport default.
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            origin: DEFAULT_ORIGIN.to_string(),
            timeout: None,
        }
    }
}

/// Thin JSON client over the station, metadata and series endpoints.
#[derive(Debug, Clone)]
pub struct RbmcClient {
    client: Client,
    origin: String,
}

impl RbmcClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self::with_client(builder.build()?, &config.origin))
    }

    /// Wrap an existing reqwest client.
    pub fn with_client(client: Client, origin: &str) -> Self {
        RbmcClient {
            client,
            origin: origin.trim_end_matches('/').to_string(),
        }
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Absolute URL for a path produced by [`crate::urls`].
    pub fn absolute(&self, path: &str) -> String {
        format!("{}{}", self.origin, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.absolute(path);
        debug!("GET {}", url);
        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status {
                url,
                status: status.as_u16(),
            });
        }
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|source| TransportError::Decode { url, source })
    }

    /// Station list, propagating any transport failure.
    pub async fn try_stations(&self) -> Result<Vec<Station>> {
        self.get_json(&urls::stations_path()).await
    }

    /// Station list, or the fixed fallback list when the backend fails.
    pub async fn stations(&self) -> Vec<Station> {
        match self.try_stations().await {
            Ok(stations) => {
                info!("Loaded {} stations", stations.len());
                stations
            }
            Err(e) => {
                warn!("Failed to load stations, using fallback list: {}", e);
                Station::fallback_stations()
            }
        }
    }

    pub async fn metadata(&self, station: &StationCode) -> Result<StationMetadata> {
        self.get_json(&urls::metadata_path(station.as_str())).await
    }

    pub async fn snr(&self, key: &SeriesKey, max: u32) -> Result<SeriesResponse> {
        self.series(SeriesKind::Snr, key, max).await
    }

    pub async fn positions(&self, key: &SeriesKey, max: u32) -> Result<SeriesResponse> {
        self.series(SeriesKind::Positions, key, max).await
    }

    pub async fn series(
        &self,
        kind: SeriesKind,
        key: &SeriesKey,
        max: u32,
    ) -> Result<SeriesResponse> {
        let path = urls::series_path(
            kind.path_segment(),
            key.station.as_str(),
            key.year,
            key.day_of_year,
            max,
        );
        let series: SeriesResponse = self.get_json(&path).await?;
        debug!("{} {}: {} samples", kind, key, series.samples.len());
        Ok(series)
    }
}

#[async_trait(?Send)]
impl TelemetrySource for RbmcClient {
    async fn stations(&self) -> Vec<Station> {
        RbmcClient::stations(self).await
    }

    async fn metadata(&self, station: &StationCode) -> Result<StationMetadata> {
        RbmcClient::metadata(self, station).await
    }

    async fn series(&self, kind: SeriesKind, key: &SeriesKey, max: u32) -> Result<SeriesResponse> {
        RbmcClient::series(self, kind, key, max).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn key(code: &str, year: i32, day: u32) -> SeriesKey {
        SeriesKey {
            station: StationCode::parse(code).unwrap(),
            year,
            day_of_year: day,
        }
    }

    #[tokio::test]
    async fn test_stations_from_backend() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/estacoes"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"codigo":"MANA","nome":"Manaus","latitude":-3.118,"longitude":-60.021,"status":"OFFLINE"}
            ])))
            .mount(&server)
            .await;

        let client = RbmcClient::with_client(Client::new(), &server.uri());
        let stations = client.stations().await;
        assert_eq!(stations.len(), 1);
        assert_eq!(stations[0].code, "MANA");
    }

    #[tokio::test]
    async fn test_stations_fall_back_on_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/estacoes"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = RbmcClient::with_client(Client::new(), &server.uri());
        let err = client.try_stations().await.unwrap_err();
        assert_eq!(err.status(), Some(500));
        assert_eq!(client.stations().await, Station::fallback_stations());
    }

    #[tokio::test]
    async fn test_stations_fall_back_on_unreachable_backend() {
        let config = ClientConfig {
            origin: "http://127.0.0.1:9".to_string(),
            timeout: Some(Duration::from_secs(2)),
        };
        let client = RbmcClient::new(&config).unwrap();
        assert!(client.try_stations().await.is_err());
        assert_eq!(client.stations().await, Station::fallback_stations());
    }

    #[tokio::test]
    async fn test_metadata_uses_upper_case_code() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/estacoes/ALAR/metadados"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "codigo":"ALAR","receptor":"TRIMBLE NETR9","antena":"TRM59800.00",
                "altura_m":1.234,"ultimaObservacao":"2024-01-05T10:15:00Z"
            })))
            .mount(&server)
            .await;

        let client = RbmcClient::with_client(Client::new(), &server.uri());
        let code = StationCode::parse("alar").unwrap();
        let md = client.metadata(&code).await.unwrap();
        assert_eq!(md.antenna.as_deref(), Some("TRM59800.00"));
    }

    #[tokio::test]
    async fn test_metadata_not_found_is_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/estacoes/ZZZZ/metadados"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = RbmcClient::with_client(Client::new(), &server.uri());
        let code = StationCode::parse("zzzz").unwrap();
        match client.metadata(&code).await {
            Err(TransportError::Status { status, url }) => {
                assert_eq!(status, 404);
                assert!(url.ends_with("/api/v1/estacoes/ZZZZ/metadados"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_snr_and_positions_query_parameters() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/estacoes/BRAZ/snr"))
            .and(query_param("ano", "2024"))
            .and(query_param("dia", "5"))
            .and(query_param("max", "300"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "codigo":"BRAZ","ano":2024,"dia":5,
                "samples":[{"epoch":"2024-01-05T00:00:00Z","sv":"G01","snr":44.0}]
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/v1/estacoes/BRAZ/posicoes"))
            .and(query_param("max", "10"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "samples":[{"epoch":"2024-01-05T00:00:30Z","lat":-15.79,"lon":-47.88,"h":1100.2}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = RbmcClient::with_client(Client::new(), &server.uri());
        let snr = client.snr(&key("braz", 2024, 5), 300).await.unwrap();
        assert_eq!(snr.samples[0].snr, Some(44.0));
        let pos = client.positions(&key("braz", 2024, 5), 10).await.unwrap();
        assert_eq!(pos.samples[0].height, Some(1100.2));
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/estacoes/ALAR/snr"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let client = RbmcClient::with_client(Client::new(), &server.uri());
        let result = client.snr(&key("ALAR", 2024, 1), 300).await;
        assert!(matches!(result, Err(TransportError::Decode { .. })));
    }

    #[test]
    fn test_absolute_strips_trailing_slash() {
        let client = RbmcClient::with_client(Client::new(), "http://example.org/");
        assert_eq!(client.origin(), "http://example.org");
        assert_eq!(
            client.absolute("/api/v1/estacoes"),
            "http://example.org/api/v1/estacoes"
        );
        assert_eq!(ClientConfig::default().origin, DEFAULT_ORIGIN);
    }
}
