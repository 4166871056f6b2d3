//! In-memory map used by the command line and tests.

use std::collections::BTreeMap;

use log::trace;

use super::MapView;
use crate::models::{Basemap, LatLng, MarkedLocation, MarkerId, ViewState, MAX_ZOOM};

/// Default viewport, matching a typical desktop map pane.
pub const DEFAULT_VIEWPORT: (u32, u32) = (1024, 768);

#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessMarker {
    pub position: LatLng,
    pub popup: String,
    pub popup_open: bool,
}

/// A map with no tiles: it only remembers what it was told.
#[derive(Debug, Clone)]
pub struct HeadlessMap {
    view: ViewState,
    layers: Vec<Basemap>,
    chrome_visible: bool,
    viewport: (u32, u32),
    markers: BTreeMap<u64, HeadlessMarker>,
    next_marker: u64,
}

impl HeadlessMap {
    pub fn new(view: ViewState, viewport: (u32, u32)) -> Self {
        Self {
            view,
            layers: Vec::new(),
            chrome_visible: true,
            viewport,
            markers: BTreeMap::new(),
            next_marker: 1,
        }
    }

    /// Tile layers currently on the map, bottom first.
    pub fn layers(&self) -> &[Basemap] {
        &self.layers
    }

    pub fn marker(&self, marker: MarkerId) -> Option<&HeadlessMarker> {
        self.markers.get(&marker.0)
    }

    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }
}

impl Default for HeadlessMap {
    fn default() -> Self {
        Self::new(ViewState::default(), DEFAULT_VIEWPORT)
    }
}

impl MapView for HeadlessMap {
    fn center(&self) -> LatLng {
        self.view.center
    }

    fn zoom(&self) -> u8 {
        self.view.zoom
    }

    fn set_view(&mut self, center: LatLng, zoom: u8) {
        trace!("set_view({}, {}, {zoom})", center.lat, center.lng);
        self.view = ViewState::new(center, zoom.min(MAX_ZOOM));
    }

    fn add_layer(&mut self, basemap: Basemap) {
        if !self.layers.contains(&basemap) {
            self.layers.push(basemap);
        }
    }

    fn remove_layer(&mut self, basemap: Basemap) {
        self.layers.retain(|b| *b != basemap);
    }

    fn active_layer(&self) -> Option<Basemap> {
        self.layers.last().copied()
    }

    fn set_chrome_visible(&mut self, visible: bool) {
        self.chrome_visible = visible;
    }

    fn chrome_visible(&self) -> bool {
        self.chrome_visible
    }

    fn viewport_size(&self) -> (u32, u32) {
        self.viewport
    }

    fn add_marker(&mut self, location: &MarkedLocation) -> MarkerId {
        let id = self.next_marker;
        self.next_marker += 1;
        self.markers.insert(
            id,
            HeadlessMarker {
                position: location.center(),
                popup: location.popup_text(),
                popup_open: false,
            },
        );
        MarkerId(id)
    }

    fn remove_marker(&mut self, marker: MarkerId) {
        self.markers.remove(&marker.0);
    }

    fn set_marker_popup(&mut self, marker: MarkerId, text: &str) {
        if let Some(m) = self.markers.get_mut(&marker.0) {
            m.popup = text.to_string();
        }
    }

    fn open_marker_popup(&mut self, marker: MarkerId) {
        for (id, m) in &mut self.markers {
            m.popup_open = *id == marker.0;
        }
    }
}
