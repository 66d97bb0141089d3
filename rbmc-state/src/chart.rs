//! Chart model for the SNR and position series.

use rbmc_core::{Sample, SeriesResponse};
use std::fmt;

/// Shown instead of the charts when neither series has samples.
pub const NO_DATA_MESSAGE: &str = "No data available for the selected date";

/// A labelled point; the label is the sample's UTC time of day.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
}

/// One line of a chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub name: &'static str,
    pub points: Vec<ChartPoint>,
}

impl ChartSeries {
    fn from_samples(name: &'static str, samples: &[Sample], value: fn(&Sample) -> Option<f64>) -> Self {
        let points = samples
            .iter()
            .map(|s| ChartPoint {
                label: s.epoch.format("%H:%M:%S").to_string(),
                value: value(s).unwrap_or(0.0),
            })
            .collect();
        ChartSeries { name, points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// (min, max, mean) of the values, if there are any.
    pub fn summary(&self) -> Option<(f64, f64, f64)> {
        if self.points.is_empty() {
            return None;
        }
        let mut min = f64::MAX;
        let mut max = f64::MIN;
        let mut sum = 0.0;
        for point in &self.points {
            min = min.min(point.value);
            max = max.max(point.value);
            sum += point.value;
        }
        Some((min, max, sum / self.points.len() as f64))
    }
}

/// What the two chart panels should draw.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartModel {
    NoData,
    Series {
        snr: ChartSeries,
        latitude: ChartSeries,
        longitude: ChartSeries,
    },
}

impl ChartModel {
    /// Build from both responses, each capped to its rendering window.
    pub fn build(snr: &SeriesResponse, positions: &SeriesResponse) -> ChartModel {
        let snr_samples = snr.rendering_window();
        let pos_samples = positions.rendering_window();
        if snr_samples.is_empty() && pos_samples.is_empty() {
            return ChartModel::NoData;
        }
        ChartModel::Series {
            snr: ChartSeries::from_samples("SNR", snr_samples, |s| s.snr),
            latitude: ChartSeries::from_samples("Lat", pos_samples, |s| s.lat),
            longitude: ChartSeries::from_samples("Lon", pos_samples, |s| s.lon),
        }
    }

    pub fn is_no_data(&self) -> bool {
        matches!(self, ChartModel::NoData)
    }
}

impl fmt::Display for ChartModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChartModel::NoData => write!(f, "{NO_DATA_MESSAGE}"),
            ChartModel::Series {
                snr,
                latitude,
                longitude,
            } => {
                for series in [snr, latitude, longitude] {
                    match series.summary() {
                        Some((min, max, mean)) => writeln!(
                            f,
                            "{:<4} {:>4} samples  min {:.4}  max {:.4}  mean {:.4}",
                            series.name,
                            series.len(),
                            min,
                            max,
                            mean
                        )?,
                        None => writeln!(f, "{:<4}    0 samples", series.name)?,
                    }
                }
                Ok(())
            }
        }
    }
}
