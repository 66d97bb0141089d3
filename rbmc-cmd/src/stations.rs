//! `stations`: list the stations the backend knows about.

use log::info;
use rbmc_core::client::RbmcClient;
use rbmc_core::{Station, StationStatus};

/// Print the station table. Falls back to the built-in list when the
/// backend cannot be reached.
pub async fn run_stations(client: &RbmcClient) -> anyhow::Result<()> {
    let stations = client.stations().await;
    info!("{} stations from {}", stations.len(), client.origin());
    print!("{}", render_stations(&stations));
    Ok(())
}

pub fn render_stations(stations: &[Station]) -> String {
    let mut out = format!(
        "{:<6}{:<28}{:>10}{:>11}  {}\n",
        "CODE", "NAME", "LAT", "LON", "STATUS"
    );
    for station in stations {
        let status = match station.status {
            Some(StationStatus::Online) => "online",
            Some(StationStatus::Offline) => "offline",
            None => "-",
        };
        out.push_str(&format!(
            "{:<6}{:<28}{:>10.3}{:>11.3}  {}\n",
            station.code, station.name, station.latitude, station.longitude, status
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_fallback_stations() {
        let text = render_stations(&Station::fallback_stations());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("CODE  NAME"));
        assert!(lines[1].starts_with("ALAR  Alagoinhas"));
        assert!(lines[1].contains("-12.135"));
        assert!(lines[2].ends_with("  -"));
    }

    #[test]
    fn test_render_status() {
        let station = Station {
            status: Some(StationStatus::Online),
            ..Station::fallback_stations().remove(1)
        };
        assert!(render_stations(&[station]).contains("BRAZ"));
    }
}
