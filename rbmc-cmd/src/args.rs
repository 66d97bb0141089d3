//! Arguments shared by several subcommands.

use anyhow::bail;
use chrono::Datelike;
use clap::Args;
use log::debug;
use rbmc_core::client::{ClientConfig, DEFAULT_ORIGIN};
use rbmc_utils::dates::{date_to_day_of_year, parse_date, QuickSelect};
use rbmc_utils::validation::validate_date_input;
use rbmc_utils::DateSelection;
use std::time::Duration;

/// Backend connection settings.
#[derive(Args, Debug, Clone)]
pub struct ApiArgs {
    /// Backend origin (scheme, host and port)
    #[arg(long, global = true, env = "RBMC_API_ORIGIN", default_value = DEFAULT_ORIGIN)]
    pub origin: String,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,
}

impl ApiArgs {
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            origin: self.origin.clone(),
            timeout: self.timeout.map(Duration::from_secs),
        }
    }
}

impl Default for ApiArgs {
    fn default() -> Self {
        ApiArgs {
            origin: DEFAULT_ORIGIN.to_string(),
            timeout: None,
        }
    }
}

/// One of `--year/--day`, `--date`, `--today` or `--yesterday`; none
/// means today.
#[derive(Args, Debug, Clone, Default)]
pub struct DateArgs {
    /// Year (with --day)
    #[arg(long, requires = "day", conflicts_with_all = ["date", "today", "yesterday"])]
    pub year: Option<i32>,

    /// Day of year, 1-based (with --year)
    #[arg(long, requires = "year")]
    pub day: Option<u32>,

    /// Calendar date, YYYY-MM-DD
    #[arg(long, conflicts_with_all = ["today", "yesterday"])]
    pub date: Option<String>,

    /// Use today's date
    #[arg(long, conflicts_with = "yesterday")]
    pub today: bool,

    /// Use yesterday's date
    #[arg(long)]
    pub yesterday: bool,
}

/// A date as the user asked for it, before validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateInput {
    Manual { year: i32, day_of_year: u32 },
    Quick(QuickSelect),
}

impl DateInput {
    pub fn year_and_day(&self) -> (i32, u32) {
        match self {
            DateInput::Manual { year, day_of_year } => (*year, *day_of_year),
            DateInput::Quick(choice) => choice.year_and_day(),
        }
    }
}

impl DateArgs {
    pub fn input(&self) -> anyhow::Result<DateInput> {
        if let (Some(year), Some(day_of_year)) = (self.year, self.day) {
            return Ok(DateInput::Manual { year, day_of_year });
        }
        if let Some(date) = &self.date {
            let date = parse_date(date)?;
            return Ok(DateInput::Manual {
                year: date.year(),
                day_of_year: date_to_day_of_year(&date),
            });
        }
        if self.today {
            return Ok(DateInput::Quick(QuickSelect::Today));
        }
        if self.yesterday {
            return Ok(DateInput::Quick(QuickSelect::Yesterday));
        }
        debug!("No date given, using today");
        Ok(DateInput::Quick(QuickSelect::Today))
    }

    /// Resolve and validate, failing with every validation message.
    pub fn selection(&self) -> anyhow::Result<DateSelection> {
        let (year, day_of_year) = self.input()?.year_and_day();
        let validation = validate_date_input(year, day_of_year);
        match validation.selection() {
            Some(selection) => Ok(selection),
            None => bail!("invalid date {}/{}: {}", year, day_of_year, validation.message()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_date() {
        let args = DateArgs {
            year: Some(2024),
            day: Some(5),
            ..DateArgs::default()
        };
        let selection = args.selection().unwrap();
        assert_eq!(selection.to_string(), "2024/005");
    }

    #[test]
    fn test_calendar_date_converts_to_day_of_year() {
        let args = DateArgs {
            date: Some("2024-12-31".into()),
            ..DateArgs::default()
        };
        assert_eq!(
            args.input().unwrap(),
            DateInput::Manual {
                year: 2024,
                day_of_year: 366
            }
        );
    }

    #[test]
    fn test_quick_select_flags() {
        let args = DateArgs {
            yesterday: true,
            ..DateArgs::default()
        };
        assert_eq!(args.input().unwrap(), DateInput::Quick(QuickSelect::Yesterday));
        assert!(args.selection().is_ok());
    }

    #[test]
    fn test_invalid_date_reports_all_messages() {
        let args = DateArgs {
            year: Some(1990),
            day: Some(400),
            ..DateArgs::default()
        };
        let err = args.selection().unwrap_err().to_string();
        assert!(err.contains("year must be >= 1995"));
        assert!(err.contains("day of year must be <= 365 (common year)"));
    }

    #[test]
    fn test_missing_date_defaults_to_today() {
        assert_eq!(
            DateArgs::default().input().unwrap(),
            DateInput::Quick(QuickSelect::Today)
        );
        let selection = DateArgs::default().selection().unwrap();
        assert_eq!(
            (selection.year(), selection.day_of_year()),
            QuickSelect::Today.year_and_day()
        );
        let bad = DateArgs {
            date: Some("05/01/2024".into()),
            ..DateArgs::default()
        };
        assert!(bad.input().is_err());
    }

    #[test]
    fn test_client_config_from_args() {
        let api = ApiArgs {
            origin: "http://rbmc.example:9000".into(),
            timeout: Some(5),
        };
        let config = api.client_config();
        assert_eq!(config.origin, "http://rbmc.example:9000");
        assert_eq!(config.timeout, Some(Duration::from_secs(5)));
        assert_eq!(ApiArgs::default().client_config(), ClientConfig::default());
    }
}
