use crate::station::StationCode;
use chrono::{DateTime, Utc};
use rbmc_utils::DateSelection;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of samples requested from the backend and drawn per chart.
pub const RENDER_SAMPLE_CAP: usize = 300;

/// Which of the two per-day time series a request or cache entry refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SeriesKind {
    Snr,
    Positions,
}

impl SeriesKind {
    /// Path segment under `/estacoes/{code}/`.
    pub fn path_segment(&self) -> &'static str {
        match self {
            SeriesKind::Snr => "snr",
            SeriesKind::Positions => "posicoes",
        }
    }
}

impl fmt::Display for SeriesKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeriesKind::Snr => write!(f, "SNR"),
            SeriesKind::Positions => write!(f, "positions"),
        }
    }
}

/// Cache key for a day of samples at one station.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SeriesKey {
    pub station: StationCode,
    pub year: i32,
    pub day_of_year: u32,
}

impl SeriesKey {
    pub fn new(station: StationCode, date: DateSelection) -> Self {
        SeriesKey {
            station,
            year: date.year(),
            day_of_year: date.day_of_year(),
        }
    }
}

impl fmt::Display for SeriesKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.station, self.year, self.day_of_year)
    }
}

/// One epoch of either series.
///
/// SNR samples fill `snr` (and usually `sv`); position samples fill
/// `lat`/`lon` (and usually `h`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub epoch: DateTime<Utc>,
    /// Satellite vehicle id, e.g. "G07"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sv: Option<String>,
    /// Signal-to-noise ratio in dB-Hz
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snr: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lon: Option<f64>,
    /// Ellipsoidal height in metres
    #[serde(rename = "h", default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

impl Sample {
    /// Latitude and longitude present and inside their geographic ranges.
    pub fn is_usable_position(&self) -> bool {
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => {
                (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lon)
            }
            _ => false,
        }
    }

    /// SNR present and within the 0-100 dB-Hz band.
    pub fn is_usable_snr(&self) -> bool {
        self.snr.is_some_and(|snr| (0.0..=100.0).contains(&snr))
    }
}

/// Body of the SNR and position endpoints.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SeriesResponse {
    #[serde(rename = "codigo", default, skip_serializing_if = "Option::is_none")]
    pub station: Option<String>,
    #[serde(rename = "ano", default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(rename = "dia", default, skip_serializing_if = "Option::is_none")]
    pub day_of_year: Option<u32>,
    /// Reference frame for positions (e.g., "WGS84")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datum: Option<String>,
    #[serde(default)]
    pub samples: Vec<Sample>,
}

impl SeriesResponse {
    /// Placeholder stored when a fetch fails, so the chart shows "no data".
    pub fn empty() -> Self {
        SeriesResponse::default()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// The first [`RENDER_SAMPLE_CAP`] samples, in order.
    pub fn rendering_window(&self) -> &[Sample] {
        let end = self.samples.len().min(RENDER_SAMPLE_CAP);
        &self.samples[..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const SNR_BODY: &str = r#"{"codigo":"ALAR","ano":2024,"dia":5,"samples":[
        {"epoch":"2024-01-05T00:00:00Z","sv":"G01","snr":41.5},
        {"epoch":"2024-01-05T00:01:00Z","sv":"G02","snr":38.25}
    ]}"#;

    const POS_BODY: &str = r#"{"codigo":"ALAR","ano":2024,"dia":5,"datum":"WGS84","samples":[
        {"epoch":"2024-01-05T00:00:00Z","lat":-12.1351,"lon":-38.4229,"h":400.7}
    ]}"#;

    fn sample_at(minute: u32) -> Sample {
        Sample {
            epoch: Utc.with_ymd_and_hms(2024, 1, 5, 0, minute % 60, 0).unwrap(),
            sv: None,
            snr: Some(40.0),
            lat: None,
            lon: None,
            height: None,
        }
    }

    #[test]
    fn test_parse_snr_series() {
        let series: SeriesResponse = serde_json::from_str(SNR_BODY).unwrap();
        assert_eq!(series.station.as_deref(), Some("ALAR"));
        assert_eq!(series.day_of_year, Some(5));
        assert_eq!(series.samples.len(), 2);
        assert_eq!(series.samples[0].sv.as_deref(), Some("G01"));
        assert_eq!(series.samples[1].snr, Some(38.25));
        assert!(series.samples.iter().all(Sample::is_usable_snr));
        assert!(!series.samples[0].is_usable_position());
    }

    #[test]
    fn test_parse_position_series() {
        let series: SeriesResponse = serde_json::from_str(POS_BODY).unwrap();
        assert_eq!(series.datum.as_deref(), Some("WGS84"));
        let sample = &series.samples[0];
        assert_eq!(sample.height, Some(400.7));
        assert!(sample.is_usable_position());
        assert!(!sample.is_usable_snr());
    }

    #[test]
    fn test_missing_samples_field_is_empty() {
        let series: SeriesResponse = serde_json::from_str("{}").unwrap();
        assert!(series.is_empty());
        assert!(series.rendering_window().is_empty());
    }

    #[test]
    fn test_rendering_window_caps_samples() {
        let series = SeriesResponse {
            samples: (0..450).map(sample_at).collect(),
            ..SeriesResponse::default()
        };
        let window = series.rendering_window();
        assert_eq!(window.len(), RENDER_SAMPLE_CAP);
        assert_eq!(window[0], series.samples[0]);

        let short = SeriesResponse {
            samples: (0..3).map(sample_at).collect(),
            ..SeriesResponse::default()
        };
        assert_eq!(short.rendering_window().len(), 3);
    }

    #[test]
    fn test_out_of_range_samples_are_not_usable() {
        let mut sample = sample_at(0);
        sample.snr = Some(120.0);
        assert!(!sample.is_usable_snr());
        sample.lat = Some(91.0);
        sample.lon = Some(0.0);
        assert!(!sample.is_usable_position());
    }

    #[test]
    fn test_series_key_display() {
        let key = SeriesKey {
            station: StationCode::parse("alar").unwrap(),
            year: 2024,
            day_of_year: 5,
        };
        assert_eq!(key.to_string(), "ALAR-2024-5");
    }
}
