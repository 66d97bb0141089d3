//! `urls`: print the download links for a station and day.

use crate::args::DateArgs;
use anyhow::bail;
use rbmc_core::urls::{self, Rinex3Product};
use rbmc_core::StationCode;
use rbmc_utils::DateSelection;

/// Minutes at which 1-second RINEX-3 files start.
pub const HIGH_RATE_MINUTES: [u32; 4] = [0, 15, 30, 45];

/// Hour/minute/product of a 1-second RINEX-3 file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighRate {
    pub hour: u32,
    pub minute: u32,
    pub product: Rinex3Product,
}

impl HighRate {
    pub fn new(hour: u32, minute: u32, product: Rinex3Product) -> anyhow::Result<Self> {
        if hour > 23 {
            bail!("hour must be between 0 and 23, got {}", hour);
        }
        if !HIGH_RATE_MINUTES.contains(&minute) {
            bail!("minute must be one of 0, 15, 30 or 45, got {}", minute);
        }
        Ok(HighRate {
            hour,
            minute,
            product,
        })
    }
}

pub fn run_urls(
    origin: &str,
    code: &str,
    date: &DateArgs,
    high_rate: Option<HighRate>,
) -> anyhow::Result<()> {
    let code = StationCode::parse(code)?;
    let selection = date.selection()?;
    for (label, url) in download_links(origin, &code, selection, high_rate) {
        println!("{:<10} {}", label, url);
    }
    Ok(())
}

/// Labelled absolute links for `code` on `selection`.
pub fn download_links(
    origin: &str,
    code: &StationCode,
    selection: DateSelection,
    high_rate: Option<HighRate>,
) -> Vec<(&'static str, String)> {
    let origin = origin.trim_end_matches('/');
    let (station, year, day) = (code.as_str(), selection.year(), selection.day_of_year());
    let mut links = vec![
        ("report", urls::station_report_url(station)),
        ("rinex2", urls::rinex2_url(station, year, day)),
        ("rinex3", urls::rinex3_url(station, year, day)),
        ("orbits", urls::orbit_url(year, day)),
    ];
    if let Some(hr) = high_rate {
        links.push((
            "rinex3-1s",
            urls::rinex3_high_rate_url(station, year, day, hr.hour, hr.minute, hr.product),
        ));
    }
    links
        .into_iter()
        .map(|(label, path)| (label, format!("{}{}", origin, path)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rbmc_utils::validation::validate_date_input_at;

    fn selection(year: i32, day: u32) -> DateSelection {
        validate_date_input_at(year, day, 2026).selection().unwrap()
    }

    #[test]
    fn test_links_are_absolute_and_padded() {
        let code = StationCode::parse("alar").unwrap();
        let links = download_links("http://localhost:8080/", &code, selection(2024, 5), None);
        assert_eq!(
            links,
            vec![
                ("report", "http://localhost:8080/api/v1/rbmc/ALAR/relatorio".to_string()),
                ("rinex2", "http://localhost:8080/api/v1/rbmc/rinex2/ALAR/2024/005".to_string()),
                ("rinex3", "http://localhost:8080/api/v1/rbmc/rinex3/ALAR/2024/005".to_string()),
                ("orbits", "http://localhost:8080/api/v1/rbmc/rinex3/orbitas/2024/005".to_string()),
            ]
        );
    }

    #[test]
    fn test_high_rate_link() {
        let code = StationCode::parse("BRAZ").unwrap();
        let hr = HighRate::new(7, 45, Rinex3Product::Mn).unwrap();
        let links = download_links("", &code, selection(2023, 200), Some(hr));
        assert_eq!(
            links.last().unwrap(),
            &(
                "rinex3-1s",
                "/api/v1/rbmc/rinex3/1s/BRAZ/2023/200/07/45/MN".to_string()
            )
        );
    }

    #[test]
    fn test_high_rate_bounds() {
        assert!(HighRate::new(24, 0, Rinex3Product::Mo).is_err());
        assert!(HighRate::new(0, 10, Rinex3Product::Mo).is_err());
        assert!(HighRate::new(23, 30, Rinex3Product::Mo).is_ok());
    }
}
