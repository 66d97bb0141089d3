//! Command implementations for the RBMC CLI.
//!
//! Provides subcommands for listing stations, reading station metadata,
//! fetching SNR/position series, building download links and running a
//! whole dashboard session from the terminal.

use clap::Subcommand;
use rbmc_core::client::RbmcClient;
use rbmc_core::urls::{Rinex3Product, DEFAULT_SERIES_MAX};

pub mod args;
pub mod dashboard;
pub mod metadata;
pub mod series;
pub mod stations;
pub mod urls;
pub mod validate;

pub use args::{ApiArgs, DateArgs};

#[derive(Subcommand)]
pub enum Command {
    /// List RBMC stations (built-in list when the backend is unreachable)
    Stations,

    /// Show receiver and antenna metadata for a station
    Metadata {
        /// Four-letter station code
        code: String,
    },

    /// Fetch a day of SNR and position samples for a station
    Series {
        /// Four-letter station code
        code: String,

        #[command(flatten)]
        date: DateArgs,

        /// Maximum samples requested per series
        #[arg(long, default_value_t = DEFAULT_SERIES_MAX)]
        max: u32,

        /// Write the samples to this CSV file
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Print download links for a station and day
    Urls {
        /// Four-letter station code
        code: String,

        #[command(flatten)]
        date: DateArgs,

        /// Hour of the 1-second RINEX-3 file (with --minute)
        #[arg(long, requires = "minute")]
        hour: Option<u32>,

        /// Minute of the 1-second RINEX-3 file: 0, 15, 30 or 45
        #[arg(long, requires = "hour")]
        minute: Option<u32>,

        /// 1-second RINEX-3 product type, MO or MN
        #[arg(long, default_value = "MO")]
        product: Rinex3Product,
    },

    /// Validate a year/day-of-year pair and print every failed check
    Validate {
        #[arg(long, default_value = "")]
        year: String,

        #[arg(long, default_value = "")]
        day: String,
    },

    /// Run a full dashboard session and print each panel
    Dashboard {
        /// Four-letter station code
        code: String,

        #[command(flatten)]
        date: DateArgs,

        /// Maximum samples requested per series
        #[arg(long, default_value_t = DEFAULT_SERIES_MAX)]
        max: u32,
    },
}

pub async fn run(command: Command, api: &ApiArgs) -> anyhow::Result<()> {
    match command {
        Command::Stations => {
            let client = RbmcClient::new(&api.client_config())?;
            stations::run_stations(&client).await
        }
        Command::Metadata { code } => {
            let client = RbmcClient::new(&api.client_config())?;
            metadata::run_metadata(&client, &code).await
        }
        Command::Series {
            code,
            date,
            max,
            output,
        } => {
            let client = RbmcClient::new(&api.client_config())?;
            series::run_series(&client, &code, &date, max, output.as_deref()).await
        }
        Command::Urls {
            code,
            date,
            hour,
            minute,
            product,
        } => {
            let high_rate = match (hour, minute) {
                (Some(hour), Some(minute)) => Some(urls::HighRate::new(hour, minute, product)?),
                _ => None,
            };
            urls::run_urls(&api.origin, &code, &date, high_rate)
        }
        Command::Validate { year, day } => validate::run_validate(&year, &day),
        Command::Dashboard { code, date, max } => {
            let client = RbmcClient::new(&api.client_config())?;
            dashboard::run_dashboard(client, &api.origin, &code, &date, max).await
        }
    }
}
