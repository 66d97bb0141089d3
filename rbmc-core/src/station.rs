use rbmc_utils::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Four-letter RBMC station identifier, always stored upper-cased.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StationCode(String);

impl StationCode {
    /// Parse user input such as `"alar"` or `" BRAZ "`.
    pub fn parse(raw: &str) -> Result<StationCode, ValidationError> {
        let trimmed = raw.trim();
        if trimmed.len() == 4 && trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
            Ok(StationCode(trimmed.to_ascii_uppercase()))
        } else {
            Err(ValidationError::MalformedStationCode(raw.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for StationCode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StationCode::parse(s)
    }
}

impl TryFrom<String> for StationCode {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        StationCode::parse(&value)
    }
}

impl From<StationCode> for String {
    fn from(value: StationCode) -> Self {
        value.0
    }
}

impl AsRef<str> for StationCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Receiver status as reported by the station list endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StationStatus {
    Online,
    Offline,
}

/// An RBMC ground station as returned by `GET /estacoes`.
///
/// The list is always replaced as a whole; individual stations are never
/// patched after loading.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Station {
    /// Station identifier (e.g., "ALAR" for Alagoinhas)
    #[serde(rename = "codigo")]
    pub code: String,
    /// Human-readable name of the station
    #[serde(rename = "nome", default)]
    pub name: String,
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<StationStatus>,
}

/// Stations shown when the station list cannot be fetched.
const FALLBACK_STATIONS: [(&str, &str, f64, f64); 2] = [
    ("ALAR", "Alagoinhas", -12.135, -38.423),
    ("BRAZ", "Brasília", -15.793, -47.882),
];

impl Station {
    /// The fixed placeholder list used when `GET /estacoes` fails, so the
    /// map always has something to show.
    pub fn fallback_stations() -> Vec<Station> {
        FALLBACK_STATIONS
            .iter()
            .map(|(code, name, latitude, longitude)| Station {
                code: code.to_string(),
                name: name.to_string(),
                latitude: *latitude,
                longitude: *longitude,
                status: None,
            })
            .collect()
    }

    /// Whether both coordinates are set (non-zero).
    pub fn has_coordinates(&self) -> bool {
        self.latitude != 0.0 && self.longitude != 0.0
    }

    /// Find a station by code, case-insensitively.
    pub fn find<'a>(stations: &'a [Station], code: &str) -> Option<&'a Station> {
        stations.iter().find(|s| s.code.eq_ignore_ascii_case(code))
    }
}
