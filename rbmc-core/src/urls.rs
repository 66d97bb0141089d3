//! Backend resource paths.
//!
//! Station codes are upper-cased, day-of-year is zero-padded to three digits
//! and hour/minute to two. Nothing here validates its input; callers check
//! the station and date before building a download link.

use std::fmt;
use std::str::FromStr;

/// Path prefix of every backend route.
pub const API_BASE: &str = "/api/v1";

/// Default `max` query parameter for the series endpoints.
pub const DEFAULT_SERIES_MAX: u32 = 300;

/// Product type of the 1-second RINEX-3 files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Rinex3Product {
    /// Mixed observations
    #[default]
    Mo,
    /// Mixed navigation
    Mn,
}

impl Rinex3Product {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rinex3Product::Mo => "MO",
            Rinex3Product::Mn => "MN",
        }
    }
}

impl fmt::Display for Rinex3Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Rinex3Product {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "MO" => Ok(Rinex3Product::Mo),
            "MN" => Ok(Rinex3Product::Mn),
            other => Err(format!("unknown RINEX-3 product type {other:?} (expected MO or MN)")),
        }
    }
}

fn code(station: &str) -> String {
    station.trim().to_ascii_uppercase()
}

/// `/api/v1/rbmc/{CODE}/relatorio`
pub fn station_report_url(station: &str) -> String {
    format!("{API_BASE}/rbmc/{}/relatorio", code(station))
}

/// `/api/v1/rbmc/rinex2/{CODE}/{yyyy}/{ddd}`
pub fn rinex2_url(station: &str, year: i32, day_of_year: u32) -> String {
    format!(
        "{API_BASE}/rbmc/rinex2/{}/{year}/{day_of_year:03}",
        code(station)
    )
}

/// `/api/v1/rbmc/rinex3/{CODE}/{yyyy}/{ddd}`
pub fn rinex3_url(station: &str, year: i32, day_of_year: u32) -> String {
    format!(
        "{API_BASE}/rbmc/rinex3/{}/{year}/{day_of_year:03}",
        code(station)
    )
}

/// `/api/v1/rbmc/rinex3/1s/{CODE}/{yyyy}/{ddd}/{hh}/{mm}/{TYPE}`
pub fn rinex3_high_rate_url(
    station: &str,
    year: i32,
    day_of_year: u32,
    hour: u32,
    minute: u32,
    product: Rinex3Product,
) -> String {
    format!(
        "{API_BASE}/rbmc/rinex3/1s/{}/{year}/{day_of_year:03}/{hour:02}/{minute:02}/{product}",
        code(station)
    )
}

/// `/api/v1/rbmc/rinex3/orbitas/{yyyy}/{ddd}`
pub fn orbit_url(year: i32, day_of_year: u32) -> String {
    format!("{API_BASE}/rbmc/rinex3/orbitas/{year}/{day_of_year:03}")
}

/// `/api/v1/estacoes`
pub fn stations_path() -> String {
    format!("{API_BASE}/estacoes")
}

/// `/api/v1/estacoes/{CODE}/metadados`
pub fn metadata_path(station: &str) -> String {
    format!("{API_BASE}/estacoes/{}/metadados", code(station))
}

/// `/api/v1/estacoes/{CODE}/snr?ano=..&dia=..&max=..`
pub fn snr_path(station: &str, year: i32, day_of_year: u32, max: u32) -> String {
    series_path("snr", station, year, day_of_year, max)
}

/// `/api/v1/estacoes/{CODE}/posicoes?ano=..&dia=..&max=..`
pub fn positions_path(station: &str, year: i32, day_of_year: u32, max: u32) -> String {
    series_path("posicoes", station, year, day_of_year, max)
}

pub(crate) fn series_path(
    segment: &str,
    station: &str,
    year: i32,
    day_of_year: u32,
    max: u32,
) -> String {
    format!(
        "{API_BASE}/estacoes/{}/{segment}?ano={year}&dia={day_of_year}&max={max}",
        code(station)
    )
}
