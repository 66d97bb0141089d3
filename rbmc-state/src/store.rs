//! Application store: selection, caches and synchronous publish/subscribe.
//!
//! `AppStore` is a cheaply cloneable handle (`Rc<RefCell<_>>`) for a
//! single-threaded UI loop. Every mutator finishes its write and releases the
//! borrow before notifying subscribers, so a subscriber may read the store
//! through its own clone of the handle.

use log::debug;
use rbmc_core::{SeriesKey, SeriesKind, SeriesResponse, Station, StationCode, StationMetadata};
use rbmc_utils::validation::{validate_date_input, validate_raw_date_input};
use rbmc_utils::{DateSelection, DateValidation, ValidationError};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

/// Name of an event subscribers register for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    StationsLoaded,
    StationChanged,
    DateChanged,
}

/// A published state change with its payload.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreEvent {
    StationsLoaded(Vec<Station>),
    StationChanged(StationCode),
    DateChanged(DateSelection),
}

impl StoreEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            StoreEvent::StationsLoaded(_) => EventKind::StationsLoaded,
            StoreEvent::StationChanged(_) => EventKind::StationChanged,
            StoreEvent::DateChanged(_) => EventKind::DateChanged,
        }
    }
}

/// Handle returned by [`EventBus::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Rc<dyn Fn(&StoreEvent)>;

#[derive(Default)]
struct BusInner {
    next_id: u64,
    subscribers: HashMap<EventKind, Vec<(SubscriptionId, Subscriber)>>,
}

/// Per-event subscriber lists, invoked in registration order.
#[derive(Clone, Default)]
pub struct EventBus {
    inner: Rc<RefCell<BusInner>>,
}

impl EventBus {
    pub fn subscribe<F>(&self, kind: EventKind, callback: F) -> SubscriptionId
    where
        F: Fn(&StoreEvent) + 'static,
    {
        let mut inner = self.inner.borrow_mut();
        let id = SubscriptionId(inner.next_id);
        inner.next_id += 1;
        inner
            .subscribers
            .entry(kind)
            .or_default()
            .push((id, Rc::new(callback)));
        id
    }

    /// Remove a subscriber. Returns false if it was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut inner = self.inner.borrow_mut();
        for list in inner.subscribers.values_mut() {
            if let Some(pos) = list.iter().position(|(sid, _)| *sid == id) {
                list.remove(pos);
                return true;
            }
        }
        false
    }

    pub fn subscriber_count(&self, kind: EventKind) -> usize {
        self.inner
            .borrow()
            .subscribers
            .get(&kind)
            .map_or(0, Vec::len)
    }

    /// Deliver `event` to the subscribers registered when emission starts.
    pub fn emit(&self, event: &StoreEvent) {
        // Snapshot so callbacks can subscribe without re-entrant delivery.
        let snapshot: Vec<Subscriber> = self
            .inner
            .borrow()
            .subscribers
            .get(&event.kind())
            .map(|list| list.iter().map(|(_, cb)| Rc::clone(cb)).collect())
            .unwrap_or_default();
        debug!("emit {:?} to {} subscribers", event.kind(), snapshot.len());
        for callback in snapshot {
            callback(event);
        }
    }
}

/// Something that can be fetched once per session.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FetchTarget {
    Metadata(StationCode),
    Series(SeriesKind, SeriesKey),
}

#[derive(Default)]
struct StoreState {
    stations: Vec<Station>,
    selected_station: Option<StationCode>,
    date: Option<DateSelection>,
    metadata: HashMap<StationCode, StationMetadata>,
    snr: HashMap<SeriesKey, SeriesResponse>,
    positions: HashMap<SeriesKey, SeriesResponse>,
    in_flight: HashSet<FetchTarget>,
}

impl StoreState {
    fn series_cache(&self, kind: SeriesKind) -> &HashMap<SeriesKey, SeriesResponse> {
        match kind {
            SeriesKind::Snr => &self.snr,
            SeriesKind::Positions => &self.positions,
        }
    }

    fn series_cache_mut(&mut self, kind: SeriesKind) -> &mut HashMap<SeriesKey, SeriesResponse> {
        match kind {
            SeriesKind::Snr => &mut self.snr,
            SeriesKind::Positions => &mut self.positions,
        }
    }

    fn is_cached(&self, target: &FetchTarget) -> bool {
        match target {
            FetchTarget::Metadata(code) => self.metadata.contains_key(code),
            FetchTarget::Series(kind, key) => self.series_cache(*kind).contains_key(key),
        }
    }
}

/// Shared dashboard state: station list, selection and session caches.
#[derive(Clone, Default)]
pub struct AppStore {
    state: Rc<RefCell<StoreState>>,
    bus: EventBus,
}

impl AppStore {
    /// An empty store: no stations, nothing selected, empty caches.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn subscribe<F>(&self, kind: EventKind, callback: F) -> SubscriptionId
    where
        F: Fn(&StoreEvent) + 'static,
    {
        self.bus.subscribe(kind, callback)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.bus.unsubscribe(id)
    }

    pub fn stations(&self) -> Vec<Station> {
        self.state.borrow().stations.clone()
    }

    pub fn selected_station(&self) -> Option<StationCode> {
        self.state.borrow().selected_station.clone()
    }

    pub fn date(&self) -> Option<DateSelection> {
        self.state.borrow().date
    }

    /// Cache key for the current selection, when both halves are set.
    pub fn current_key(&self) -> Option<SeriesKey> {
        let state = self.state.borrow();
        match (&state.selected_station, state.date) {
            (Some(station), Some(date)) => Some(SeriesKey::new(station.clone(), date)),
            _ => None,
        }
    }

    /// Replace the whole station list and publish `StationsLoaded`.
    pub fn set_stations(&self, stations: Vec<Station>) {
        let payload = stations.clone();
        self.state.borrow_mut().stations = stations;
        self.bus.emit(&StoreEvent::StationsLoaded(payload));
    }

    /// Select a station by code and publish `StationChanged`.
    ///
    /// A malformed code leaves the selection untouched. Re-selecting the
    /// current station publishes again.
    pub fn set_station(&self, raw: &str) -> Result<StationCode, ValidationError> {
        let code = StationCode::parse(raw)?;
        self.state.borrow_mut().selected_station = Some(code.clone());
        self.bus.emit(&StoreEvent::StationChanged(code.clone()));
        Ok(code)
    }

    /// Validate and select a date, publishing `DateChanged` on success.
    ///
    /// On failure nothing changes and the errors are returned.
    pub fn set_date(&self, year: i32, day_of_year: u32) -> DateValidation {
        self.apply_date(validate_date_input(year, day_of_year))
    }

    /// Same as [`AppStore::set_date`] for raw form text.
    pub fn set_date_raw(&self, year: &str, day_of_year: &str) -> DateValidation {
        self.apply_date(validate_raw_date_input(year, day_of_year))
    }

    /// Commit an already computed validation if it passed.
    pub fn apply_date(&self, validation: DateValidation) -> DateValidation {
        if let Some(selection) = validation.selection() {
            self.state.borrow_mut().date = Some(selection);
            self.bus.emit(&StoreEvent::DateChanged(selection));
        }
        validation
    }

    pub fn metadata(&self, station: &StationCode) -> Option<StationMetadata> {
        self.state.borrow().metadata.get(station).cloned()
    }

    pub fn insert_metadata(&self, station: StationCode, metadata: StationMetadata) {
        let mut state = self.state.borrow_mut();
        state
            .in_flight
            .remove(&FetchTarget::Metadata(station.clone()));
        state.metadata.insert(station, metadata);
    }

    pub fn series(&self, kind: SeriesKind, key: &SeriesKey) -> Option<SeriesResponse> {
        self.state.borrow().series_cache(kind).get(key).cloned()
    }

    pub fn has_series(&self, kind: SeriesKind, key: &SeriesKey) -> bool {
        self.state.borrow().series_cache(kind).contains_key(key)
    }

    /// Store a series under its own key (even if the selection moved on).
    pub fn insert_series(&self, kind: SeriesKind, key: SeriesKey, series: SeriesResponse) {
        let mut state = self.state.borrow_mut();
        state
            .in_flight
            .remove(&FetchTarget::Series(kind, key.clone()));
        state.series_cache_mut(kind).insert(key, series);
    }

    /// Claim a fetch. Returns false when the target is already cached or
    /// another caller is fetching it.
    pub fn begin_fetch(&self, target: FetchTarget) -> bool {
        let mut state = self.state.borrow_mut();
        if state.is_cached(&target) || state.in_flight.contains(&target) {
            return false;
        }
        state.in_flight.insert(target)
    }

    /// Release a claim without caching anything.
    pub fn abandon_fetch(&self, target: &FetchTarget) {
        self.state.borrow_mut().in_flight.remove(target);
    }

    pub fn is_in_flight(&self, target: &FetchTarget) -> bool {
        self.state.borrow().in_flight.contains(target)
    }

    #[cfg(test)]
    pub(crate) fn handle_count(&self) -> usize {
        Rc::strong_count(&self.state)
    }
}
