//! Marker layer model for the station map.

use crate::store::{AppStore, EventKind, StoreEvent};
use rbmc_core::{Station, StationCode};
use std::cell::RefCell;
use std::rc::Rc;

/// Initial view: roughly the centre of Brazil.
pub const DEFAULT_CENTER: (f64, f64) = (-14.2, -53.2);
pub const DEFAULT_ZOOM: u8 = 4;
/// Zoom used when the map follows a selected station.
pub const SELECTED_ZOOM: u8 = 8;

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub code: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Popup text: code on the first line, name on the second.
    pub popup: String,
}

/// What the map widget should currently show.
#[derive(Debug, Clone, PartialEq)]
pub struct MapView {
    stations: Vec<Station>,
    markers: Vec<Marker>,
    center: (f64, f64),
    zoom: u8,
}

impl Default for MapView {
    fn default() -> Self {
        MapView {
            stations: Vec::new(),
            markers: Vec::new(),
            center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
        }
    }
}

impl MapView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a view that follows `store` events.
    ///
    /// Subscriptions capture only the view, never a store handle.
    pub fn attach(store: &AppStore) -> Rc<RefCell<MapView>> {
        let view = Rc::new(RefCell::new(MapView::new()));

        let loaded = Rc::clone(&view);
        store.subscribe(EventKind::StationsLoaded, move |event| {
            if let StoreEvent::StationsLoaded(stations) = event {
                loaded.borrow_mut().set_markers(stations);
            }
        });

        let changed = Rc::clone(&view);
        store.subscribe(EventKind::StationChanged, move |event| {
            if let StoreEvent::StationChanged(code) = event {
                changed.borrow_mut().focus(code);
            }
        });

        view
    }

    /// Rebuild every marker; stations without coordinates get none.
    pub fn set_markers(&mut self, stations: &[Station]) {
        self.stations = stations.to_vec();
        self.markers = stations
            .iter()
            .filter(|s| s.has_coordinates())
            .map(|s| Marker {
                code: s.code.clone(),
                latitude: s.latitude,
                longitude: s.longitude,
                popup: format!("{}\n{}", s.code, s.name),
            })
            .collect();
    }

    /// Centre on `code` if it is a known station. Returns whether the view moved.
    pub fn focus(&mut self, code: &StationCode) -> bool {
        match Station::find(&self.stations, code.as_str()) {
            Some(station) => {
                self.center = (station.latitude, station.longitude);
                self.zoom = SELECTED_ZOOM;
                true
            }
            None => false,
        }
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn center(&self) -> (f64, f64) {
        self.center
    }

    pub fn zoom(&self) -> u8 {
        self.zoom
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stations() -> Vec<Station> {
        let mut list = Station::fallback_stations();
        list.push(Station {
            code: "XXXX".into(),
            name: "No position".into(),
            latitude: 0.0,
            longitude: 0.0,
            status: None,
        });
        list
    }

    #[test]
    fn test_markers_skip_stations_without_coordinates() {
        let mut view = MapView::new();
        view.set_markers(&stations());
        assert_eq!(view.markers().len(), 2);
        assert_eq!(view.markers()[0].popup, "ALAR\nAlagoinhas");
    }

    #[test]
    fn test_attach_follows_store_events() {
        let store = AppStore::new();
        let view = MapView::attach(&store);
        assert_eq!(view.borrow().center(), DEFAULT_CENTER);
        assert_eq!(view.borrow().zoom(), DEFAULT_ZOOM);

        store.set_stations(stations());
        assert_eq!(view.borrow().markers().len(), 2);

        store.set_station("braz").unwrap();
        assert_eq!(view.borrow().center(), (-15.793, -47.882));
        assert_eq!(view.borrow().zoom(), SELECTED_ZOOM);
    }

    #[test]
    fn test_attached_view_holds_no_store_handle() {
        let store = AppStore::new();
        let _view = MapView::attach(&store);
        assert_eq!(store.handle_count(), 1);
    }

    #[test]
    fn test_unknown_station_keeps_view() {
        let store = AppStore::new();
        let view = MapView::attach(&store);
        store.set_stations(stations());
        store.set_station("POAL").unwrap();
        assert_eq!(view.borrow().center(), DEFAULT_CENTER);
        assert_eq!(view.borrow().zoom(), DEFAULT_ZOOM);
    }
}
