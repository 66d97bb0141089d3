//! `dashboard`: run one full dashboard session and print every panel.

use crate::args::{DateArgs, DateInput};
use anyhow::bail;
use log::{info, warn};
use rbmc_core::TelemetrySource;
use rbmc_state::controller::FieldState;
use rbmc_state::Dashboard;
use std::fmt::{self, Write};

/// Load stations, select `code`, set the date and fetch through the
/// session caches, the same sequence a user clicks through. `max` caps
/// the samples requested per series.
pub async fn open_session<S: TelemetrySource>(
    source: S,
    code: &str,
    date: &DateArgs,
    max: u32,
) -> anyhow::Result<Dashboard<S>> {
    let dash = Dashboard::new(source).with_max_samples(max);
    dash.load_stations().await;

    let transition = dash.select_station(code).await;
    if transition.station == FieldState::Invalid {
        bail!("{}", transition.message);
    }

    let transition = match date.input()? {
        DateInput::Manual { year, day_of_year } => {
            dash.enter_date(&year.to_string(), &day_of_year.to_string())
                .await
        }
        DateInput::Quick(choice) => dash.quick_select(choice).await,
    };
    if transition.date == FieldState::Invalid {
        bail!("{}", transition.message);
    }
    info!("Session ready for {:?}", dash.active_key().map(|k| k.to_string()));
    Ok(dash)
}

pub async fn run_dashboard<S: TelemetrySource>(
    source: S,
    origin: &str,
    code: &str,
    date: &DateArgs,
    max: u32,
) -> anyhow::Result<()> {
    let dash = open_session(source, code, date, max).await?;
    print!("{}", render(&dash, origin));
    Ok(())
}

/// Text rendering of the map, metadata panel, buttons and charts.
pub fn render<S: TelemetrySource>(dash: &Dashboard<S>, origin: &str) -> String {
    let mut out = String::new();
    // writing into a String cannot fail
    if render_into(&mut out, dash, origin).is_err() {
        warn!("Dashboard rendering was cut short");
    }
    out
}

fn render_into<S: TelemetrySource>(
    out: &mut impl Write,
    dash: &Dashboard<S>,
    origin: &str,
) -> fmt::Result {
    let origin = origin.trim_end_matches('/');
    let map = dash.map();
    let (lat, lon) = map.center();
    writeln!(
        out,
        "[map] {} markers, centre {:.3},{:.3} zoom {}",
        map.markers().len(),
        lat,
        lon,
        map.zoom()
    )?;

    writeln!(out, "[metadata]")?;
    for line in dash.metadata_panel().lines() {
        writeln!(out, "  {}", line)?;
    }

    let buttons = dash.buttons();
    writeln!(out, "[downloads]")?;
    for (label, url) in [
        ("report", &buttons.report),
        ("rinex2", &buttons.rinex2),
        ("rinex3", &buttons.rinex3),
    ] {
        match url {
            Some(path) => writeln!(out, "  {:<7} {}{}", label, origin, path)?,
            None => writeln!(out, "  {:<7} (disabled)", label)?,
        }
    }

    writeln!(out, "[charts]")?;
    match dash.charts() {
        Some(charts) => {
            for line in charts.to_string().lines() {
                writeln!(out, "  {}", line)?;
            }
        }
        None => writeln!(out, "  (nothing selected)")?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rbmc_core::client::{ClientConfig, RbmcClient};
    use rbmc_core::urls::DEFAULT_SERIES_MAX;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn mock_backend() -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/estacoes"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"codigo":"ALAR","nome":"Alagoinhas","latitude":-12.135,"longitude":-38.423,"status":"ONLINE"},
                {"codigo":"POAL","nome":"Porto Alegre","latitude":0.0,"longitude":0.0}
            ])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/v1/estacoes/ALAR/metadados"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "codigo":"ALAR","receptor":"TRIMBLE NETR9","antena":"TRM59800.00","altura_m":0.008
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/v1/estacoes/ALAR/snr"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "codigo":"ALAR","ano":2024,"dia":5,
                "samples":[{"epoch":"2024-01-05T00:00:00Z","sv":"G01","snr":45.0}]
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/v1/estacoes/ALAR/posicoes"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;
        server
    }

    fn date(year: i32, day: u32) -> DateArgs {
        DateArgs {
            year: Some(year),
            day: Some(day),
            ..DateArgs::default()
        }
    }

    #[tokio::test]
    async fn test_session_renders_every_panel() {
        let server = mock_backend().await;
        let dash = open_session(client(&server), "alar", &date(2024, 5), DEFAULT_SERIES_MAX)
            .await
            .unwrap();
        let text = render(&dash, "http://localhost:8080");

        assert!(text.contains("[map] 1 markers, centre -12.135,-38.423 zoom 8"));
        assert!(text.contains("  Receiver: TRIMBLE NETR9"));
        assert!(text.contains("  rinex2  http://localhost:8080/api/v1/rbmc/rinex2/ALAR/2024/005"));
        assert!(text.contains("SNR     1 samples"));
        assert!(text.contains("Lat     0 samples"));
    }

    #[tokio::test]
    async fn test_session_rejects_bad_input() {
        // nothing mounted: stations fall back, metadata fails
        let server = MockServer::start().await;

        let err = open_session(client(&server), "AL", &date(2024, 5), DEFAULT_SERIES_MAX)
            .await
            .err()
            .expect("short station code accepted");
        assert!(err.to_string().contains("station code must be 4 letters"));

        let err = open_session(client(&server), "ALAR", &date(2023, 366), DEFAULT_SERIES_MAX)
            .await
            .err()
            .expect("day 366 of a common year accepted");
        assert_eq!(err.to_string(), "day of year must be <= 365 (common year)");
    }

    #[tokio::test]
    async fn test_backend_down_degrades_per_panel() {
        let server = MockServer::start().await;
        let dash = open_session(client(&server), "BRAZ", &date(2024, 5), DEFAULT_SERIES_MAX)
            .await
            .unwrap();
        let text = render(&dash, "");
        assert!(text.contains("[map] 2 markers"));
        assert!(text.contains("  Metadata unavailable"));
        assert!(text.contains("  report  /api/v1/rbmc/BRAZ/relatorio"));
        assert!(text.contains("No data available for the selected date"));
    }

    #[tokio::test]
    async fn test_session_requests_the_given_sample_cap() {
        let server = MockServer::start().await;
        for segment in ["snr", "posicoes"] {
            Mock::given(method("GET"))
                .and(path(format!("/api/v1/estacoes/BRAZ/{segment}")))
                .and(query_param("max", "25"))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!({"samples": []})))
                .expect(1)
                .mount(&server)
                .await;
        }
        let dash = open_session(client(&server), "BRAZ", &date(2024, 5), 25)
            .await
            .unwrap();
        assert!(render(&dash, "").contains("No data available for the selected date"));
    }

    fn client(server: &MockServer) -> RbmcClient {
        let config = ClientConfig {
            origin: server.uri(),
            timeout: None,
        };
        RbmcClient::new(&config).unwrap()
    }
}
