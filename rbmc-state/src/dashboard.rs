//! A dashboard session: store, form controller and view models driven by a
//! [`TelemetrySource`].
//!
//! Everything runs on one thread. No `RefCell` borrow is held across an
//! `.await`, so several session futures may be polled concurrently (for
//! example with `tokio::join!`) and still share one store. A fetch for a
//! given target is issued at most once per session; late responses are
//! cached under their own key and drawn only if that key is still active.

use crate::chart::ChartModel;
use crate::controller::{DownloadButtons, FieldState, FormController, Transition};
use crate::map::MapView;
use crate::metadata_panel::MetadataPanel;
use crate::store::{AppStore, FetchTarget};
use chrono::NaiveDate;
use log::{debug, info, warn};
use rbmc_core::urls::DEFAULT_SERIES_MAX;
use rbmc_core::{SeriesKey, SeriesKind, SeriesResponse, StationCode, TelemetrySource};
use rbmc_utils::dates::QuickSelect;
use std::cell::RefCell;
use std::rc::Rc;

/// How a single series request was satisfied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    Cached,
    Fetched,
    /// Another caller is already fetching it.
    InFlight,
}

pub struct Dashboard<S> {
    source: S,
    store: AppStore,
    controller: RefCell<FormController>,
    map: Rc<RefCell<MapView>>,
    metadata: RefCell<MetadataPanel>,
    charts: RefCell<Option<ChartModel>>,
    max_samples: u32,
}

impl<S: TelemetrySource> Dashboard<S> {
    pub fn new(source: S) -> Self {
        Self::with_store(source, AppStore::new())
    }

    /// Build a session around an existing store.
    pub fn with_store(source: S, store: AppStore) -> Self {
        let map = MapView::attach(&store);
        Dashboard {
            controller: RefCell::new(FormController::new(store.clone())),
            source,
            store,
            map,
            metadata: RefCell::new(MetadataPanel::Empty),
            charts: RefCell::new(None),
            max_samples: DEFAULT_SERIES_MAX,
        }
    }

    /// Cap sent as `max` on series requests.
    pub fn with_max_samples(mut self, max: u32) -> Self {
        self.max_samples = max;
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn store(&self) -> &AppStore {
        &self.store
    }

    pub fn map(&self) -> MapView {
        self.map.borrow().clone()
    }

    pub fn metadata_panel(&self) -> MetadataPanel {
        self.metadata.borrow().clone()
    }

    /// Chart model for the active selection; `None` until one is drawn.
    pub fn charts(&self) -> Option<ChartModel> {
        self.charts.borrow().clone()
    }

    pub fn buttons(&self) -> DownloadButtons {
        self.controller.borrow().buttons()
    }

    pub fn validation_message(&self) -> String {
        self.controller.borrow().validation_message()
    }

    pub fn active_key(&self) -> Option<SeriesKey> {
        self.controller.borrow().active_key()
    }

    /// Fetch the station list and publish it. Returns how many arrived.
    pub async fn load_stations(&self) -> usize {
        let stations = self.source.stations().await;
        let count = stations.len();
        info!("loaded {} stations", count);
        self.store.set_stations(stations);
        count
    }

    /// Select a station, then load its metadata and, if the date is set,
    /// its series.
    pub async fn select_station(&self, raw: &str) -> Transition {
        let transition = self.controller.borrow_mut().select_station(raw);
        match (transition.station, self.store.selected_station()) {
            (FieldState::Valid, Some(code)) => self.load_metadata(&code).await,
            _ => *self.metadata.borrow_mut() = MetadataPanel::Empty,
        }
        self.follow(&transition).await;
        transition
    }

    pub async fn enter_date(&self, year: &str, day_of_year: &str) -> Transition {
        let transition = self.controller.borrow_mut().enter_date(year, day_of_year);
        self.follow(&transition).await;
        transition
    }

    /// Date entry validated against an explicit current year.
    pub async fn enter_date_at(&self, year: &str, day_of_year: &str, current_year: i32) -> Transition {
        let transition = self
            .controller
            .borrow_mut()
            .enter_date_at(year, day_of_year, current_year);
        self.follow(&transition).await;
        transition
    }

    pub async fn quick_select(&self, choice: QuickSelect) -> Transition {
        let transition = self.controller.borrow_mut().quick_select(choice);
        self.follow(&transition).await;
        transition
    }

    pub async fn quick_select_from(&self, choice: QuickSelect, today: NaiveDate) -> Transition {
        let transition = self.controller.borrow_mut().quick_select_from(choice, today);
        self.follow(&transition).await;
        transition
    }

    /// Load metadata for `code` into the panel, from the cache when possible.
    ///
    /// A failed fetch is not cached, so the next selection retries.
    pub async fn load_metadata(&self, code: &StationCode) {
        if let Some(cached) = self.store.metadata(code) {
            debug!("metadata for {} from cache", code);
            *self.metadata.borrow_mut() = MetadataPanel::Loaded(cached);
            return;
        }
        // the panel never keeps another station's metadata
        *self.metadata.borrow_mut() = MetadataPanel::Loading;
        let target = FetchTarget::Metadata(code.clone());
        if !self.store.begin_fetch(target.clone()) {
            debug!("metadata for {} already in flight", code);
            return;
        }

        let panel = match self.source.metadata(code).await {
            Ok(metadata) => {
                self.store.insert_metadata(code.clone(), metadata.clone());
                MetadataPanel::Loaded(metadata)
            }
            Err(e) => {
                warn!("metadata for {} unavailable: {}", code, e);
                self.store.abandon_fetch(&target);
                MetadataPanel::Unavailable
            }
        };
        if self.store.selected_station().as_ref() == Some(code) {
            *self.metadata.borrow_mut() = panel;
        }
    }

    /// Make sure both series for `key` are cached, then redraw the charts
    /// if `key` is still the active selection.
    pub async fn load_series(&self, key: &SeriesKey) -> [FetchOutcome; 2] {
        let snr = self.fetch_series(SeriesKind::Snr, key).await;
        let positions = self.fetch_series(SeriesKind::Positions, key).await;
        self.render_charts(key);
        [snr, positions]
    }

    async fn fetch_series(&self, kind: SeriesKind, key: &SeriesKey) -> FetchOutcome {
        if self.store.has_series(kind, key) {
            return FetchOutcome::Cached;
        }
        if !self.store.begin_fetch(FetchTarget::Series(kind, key.clone())) {
            return FetchOutcome::InFlight;
        }
        let series = match self.source.series(kind, key, self.max_samples).await {
            Ok(series) => series,
            Err(e) => {
                // cached empty so the chart falls back to "no data"
                warn!("{} series for {} unavailable: {}", kind, key, e);
                SeriesResponse::empty()
            }
        };
        self.store.insert_series(kind, key.clone(), series);
        FetchOutcome::Fetched
    }

    fn render_charts(&self, key: &SeriesKey) {
        if self.active_key().as_ref() != Some(key) {
            debug!("{} is no longer selected, not drawing", key);
            return;
        }
        let snr = self.store.series(SeriesKind::Snr, key);
        let positions = self.store.series(SeriesKind::Positions, key);
        // blank while the other half is in flight; its fetch draws later
        *self.charts.borrow_mut() = match (snr, positions) {
            (Some(snr), Some(positions)) => Some(ChartModel::build(&snr, &positions)),
            _ => None,
        };
    }

    async fn follow(&self, transition: &Transition) {
        match &transition.fetch {
            Some(key) => {
                self.load_series(key).await;
            }
            None => *self.charts.borrow_mut() = None,
        }
    }
}
