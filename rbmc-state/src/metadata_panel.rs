//! Station metadata panel.

use rbmc_core::StationMetadata;
use std::fmt;

const MISSING: &str = "-";

#[derive(Debug, Clone, PartialEq, Default)]
pub enum MetadataPanel {
    /// No station selected yet
    #[default]
    Empty,
    Loading,
    Loaded(StationMetadata),
    /// The fetch failed; the rest of the page keeps working
    Unavailable,
}

impl MetadataPanel {
    pub fn lines(&self) -> Vec<String> {
        match self {
            MetadataPanel::Empty => vec!["Select a station".to_string()],
            MetadataPanel::Loading => vec!["Loading...".to_string()],
            MetadataPanel::Unavailable => vec!["Metadata unavailable".to_string()],
            MetadataPanel::Loaded(md) => vec![
                format!("Receiver: {}", md.receiver.as_deref().unwrap_or(MISSING)),
                format!("Antenna: {}", md.antenna.as_deref().unwrap_or(MISSING)),
                format!(
                    "Antenna height (m): {}",
                    md.antenna_height_m
                        .map_or_else(|| MISSING.to_string(), |h| h.to_string())
                ),
                format!(
                    "Last observation: {}",
                    md.last_observation
                        .map_or_else(|| MISSING.to_string(), |t| t.to_rfc3339())
                ),
            ],
        }
    }
}

impl fmt::Display for MetadataPanel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.lines().join("\n"))
    }
}
