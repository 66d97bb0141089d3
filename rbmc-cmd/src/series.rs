//! `series`: fetch a day of SNR and position samples for a station.

use crate::args::DateArgs;
use log::{info, warn};
use rbmc_core::client::RbmcClient;
use rbmc_core::{Sample, SeriesKey, SeriesKind, SeriesResponse, StationCode};
use rbmc_state::chart::ChartModel;
use rbmc_utils::dates::format_date;
use std::fs::File;
use std::io;

/// Fetch both series, print the chart summary and optionally write the
/// samples to `output` as CSV.
pub async fn run_series(
    client: &RbmcClient,
    code: &str,
    date: &DateArgs,
    max: u32,
    output: Option<&str>,
) -> anyhow::Result<()> {
    let selection = date.selection()?;
    let key = SeriesKey::new(StationCode::parse(code)?, selection);
    info!("Fetching series for {} (max {})", key, max);

    let (snr, positions) = tokio::join!(
        client.series(SeriesKind::Snr, &key, max),
        client.series(SeriesKind::Positions, &key, max)
    );
    let snr = or_empty(SeriesKind::Snr, &key, snr);
    let positions = or_empty(SeriesKind::Positions, &key, positions);

    info!(
        "{}/{} SNR and {}/{} position samples in range",
        snr.samples.iter().filter(|s| s.is_usable_snr()).count(),
        snr.samples.len(),
        positions.samples.iter().filter(|s| s.is_usable_position()).count(),
        positions.samples.len()
    );

    match selection.as_naive_date() {
        Some(day) => println!("{} ({})", key, format_date(&day)),
        None => println!("{}", key),
    }
    print!("{}", ChartModel::build(&snr, &positions));
    println!();

    if let Some(path) = output {
        let rows = write_csv(File::create(path)?, &snr, &positions)?;
        info!("Wrote {} samples to {}", rows, path);
    }
    Ok(())
}

fn or_empty(
    kind: SeriesKind,
    key: &SeriesKey,
    result: rbmc_core::error::Result<SeriesResponse>,
) -> SeriesResponse {
    result.unwrap_or_else(|e| {
        warn!("{} series for {} unavailable: {}", kind, key, e);
        SeriesResponse::empty()
    })
}

/// Write every sample of both responses, one row each, with a header.
/// Returns the number of sample rows.
pub fn write_csv<W: io::Write>(
    writer: W,
    snr: &SeriesResponse,
    positions: &SeriesResponse,
) -> anyhow::Result<usize> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["series", "epoch", "sv", "snr", "lat", "lon", "h"])?;
    let mut rows = 0;
    for (kind, response) in [(SeriesKind::Snr, snr), (SeriesKind::Positions, positions)] {
        for sample in &response.samples {
            wtr.write_record(csv_row(kind, sample))?;
            rows += 1;
        }
    }
    wtr.flush()?;
    Ok(rows)
}

fn csv_row(kind: SeriesKind, sample: &Sample) -> [String; 7] {
    let num = |v: Option<f64>| v.map_or(String::new(), |v| v.to_string());
    [
        kind.path_segment().to_string(),
        sample.epoch.to_rfc3339(),
        sample.sv.clone().unwrap_or_default(),
        num(sample.snr),
        num(sample.lat),
        num(sample.lon),
        num(sample.height),
    ]
}
