use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Receiver/antenna metadata for one station, from `GET /estacoes/{code}/metadados`.
///
/// Every field is optional on the wire; the panel shows `-` for anything missing.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StationMetadata {
    #[serde(rename = "codigo", default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Receiver model (e.g., "TRIMBLE NETR9")
    #[serde(rename = "receptor", default)]
    pub receiver: Option<String>,
    /// Antenna model (e.g., "TRM59800.00")
    #[serde(rename = "antena", default)]
    pub antenna: Option<String>,
    /// Antenna height in metres
    #[serde(rename = "altura_m", default)]
    pub antenna_height_m: Option<f64>,
    #[serde(rename = "ultimaObservacao", default)]
    pub last_observation: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::StationMetadata;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_parse_metadata_json() {
        let body = r#"{"codigo":"ALAR","receptor":"TRIMBLE NETR9","antena":"TRM59800.00",
                       "altura_m":1.234,"ultimaObservacao":"2024-01-05T10:15:00Z"}"#;
        let md: StationMetadata = serde_json::from_str(body).unwrap();
        assert_eq!(md.code.as_deref(), Some("ALAR"));
        assert_eq!(md.receiver.as_deref(), Some("TRIMBLE NETR9"));
        assert_eq!(md.antenna.as_deref(), Some("TRM59800.00"));
        assert_eq!(md.antenna_height_m, Some(1.234));
        assert_eq!(
            md.last_observation,
            Some(Utc.with_ymd_and_hms(2024, 1, 5, 10, 15, 0).unwrap())
        );
    }

    #[test]
    fn test_parse_sparse_metadata() {
        let md: StationMetadata = serde_json::from_str(r#"{"receptor":null}"#).unwrap();
        assert_eq!(md, StationMetadata::default());
    }
}
