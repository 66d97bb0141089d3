//! Form controller: station and date inputs, validation message and
//! download-button enablement.
//!
//! The two inputs are independent state machines. Each starts `Unset` and
//! moves to `Valid` or `Invalid` on input; nothing reverts without going
//! through validation again. Valid input is written to the store; invalid
//! input leaves the store's last valid value alone.

use crate::store::AppStore;
use chrono::NaiveDate;
use log::debug;
use rbmc_core::urls;
use rbmc_core::SeriesKey;
use rbmc_utils::dates::{current_year, QuickSelect};
use rbmc_utils::validation::validate_raw_date_input_at;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldState {
    #[default]
    Unset,
    Valid,
    Invalid,
}

/// Download links; `None` means the button is disabled.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DownloadButtons {
    pub report: Option<String>,
    pub rinex2: Option<String>,
    pub rinex3: Option<String>,
}

impl DownloadButtons {
    pub fn report_enabled(&self) -> bool {
        self.report.is_some()
    }

    pub fn rinex2_enabled(&self) -> bool {
        self.rinex2.is_some()
    }
}

/// Everything the form re-renders after an input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub station: FieldState,
    pub date: FieldState,
    pub message: String,
    pub buttons: DownloadButtons,
    /// Series to (cache-checked) fetch for the new selection.
    pub fetch: Option<SeriesKey>,
}

#[derive(Debug, Default)]
struct FormErrors {
    station: Option<String>,
    date: Vec<String>,
}

/// Input controller bound to an [`AppStore`].
pub struct FormController {
    store: AppStore,
    station: FieldState,
    date: FieldState,
    year_text: String,
    day_text: String,
    errors: FormErrors,
}

impl FormController {
    pub fn new(store: AppStore) -> Self {
        FormController {
            store,
            station: FieldState::Unset,
            date: FieldState::Unset,
            year_text: String::new(),
            day_text: String::new(),
            errors: FormErrors::default(),
        }
    }

    pub fn station_state(&self) -> FieldState {
        self.station
    }

    pub fn date_state(&self) -> FieldState {
        self.date
    }

    /// Current contents of the year and day inputs.
    pub fn date_inputs(&self) -> (&str, &str) {
        (&self.year_text, &self.day_text)
    }

    /// Station selected from the list or typed in.
    pub fn select_station(&mut self, raw: &str) -> Transition {
        match self.store.set_station(raw) {
            Ok(code) => {
                debug!("station {} selected", code);
                self.station = FieldState::Valid;
                self.errors.station = None;
            }
            Err(e) => {
                self.station = FieldState::Invalid;
                self.errors.station = Some(e.to_string());
            }
        }
        self.transition()
    }

    /// Year/day inputs changed; validated against the host clock.
    pub fn enter_date(&mut self, year: &str, day_of_year: &str) -> Transition {
        self.enter_date_at(year, day_of_year, current_year())
    }

    /// Year/day inputs changed; validated against `current_year`.
    pub fn enter_date_at(&mut self, year: &str, day_of_year: &str, current_year: i32) -> Transition {
        self.year_text = year.trim().to_string();
        self.day_text = day_of_year.trim().to_string();
        let validation = self
            .store
            .apply_date(validate_raw_date_input_at(year, day_of_year, current_year));
        if validation.is_valid() {
            self.date = FieldState::Valid;
            self.errors.date.clear();
        } else {
            self.date = FieldState::Invalid;
            self.errors.date = validation.messages();
        }
        self.transition()
    }

    /// "Today"/"yesterday" shortcuts, relative to the host clock.
    pub fn quick_select(&mut self, choice: QuickSelect) -> Transition {
        let (year, day) = choice.year_and_day();
        self.enter_date(&year.to_string(), &day.to_string())
    }

    /// Shortcuts relative to an explicit `today`, through the same validation.
    pub fn quick_select_from(&mut self, choice: QuickSelect, today: NaiveDate) -> Transition {
        let (year, day) = choice.year_and_day_from(today);
        self.enter_date(&year.to_string(), &day.to_string())
    }

    /// Inline validation text; empty when both inputs are fine.
    pub fn validation_message(&self) -> String {
        self.errors
            .station
            .iter()
            .chain(self.errors.date.iter())
            .cloned()
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// Key for the series the charts should show, if the form is complete.
    pub fn active_key(&self) -> Option<SeriesKey> {
        if self.station == FieldState::Valid && self.date == FieldState::Valid {
            self.store.current_key()
        } else {
            None
        }
    }

    pub fn buttons(&self) -> DownloadButtons {
        let station = match (self.station, self.store.selected_station()) {
            (FieldState::Valid, Some(code)) => code,
            _ => return DownloadButtons::default(),
        };
        let report = Some(urls::station_report_url(station.as_str()));
        match (self.date, self.store.date()) {
            (FieldState::Valid, Some(date)) => DownloadButtons {
                report,
                rinex2: Some(urls::rinex2_url(
                    station.as_str(),
                    date.year(),
                    date.day_of_year(),
                )),
                rinex3: Some(urls::rinex3_url(
                    station.as_str(),
                    date.year(),
                    date.day_of_year(),
                )),
            },
            _ => DownloadButtons {
                report,
                ..DownloadButtons::default()
            },
        }
    }

    fn transition(&self) -> Transition {
        Transition {
            station: self.station,
            date: self.date,
            message: self.validation_message(),
            buttons: self.buttons(),
            fetch: self.active_key(),
        }
    }
}
