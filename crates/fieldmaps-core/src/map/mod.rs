//! Mapping collaborator contract and the basemap state machine.
//!
//! The crate never renders tiles. It drives whatever map implements
//! [`MapView`]: reading and setting the view, swapping tile layers, toggling
//! the built-in controls ("chrome") and managing location markers.

mod basemap;
mod headless;

pub use basemap::BasemapSwitch;
pub use headless::{HeadlessMap, HeadlessMarker, DEFAULT_VIEWPORT};

use crate::models::{Basemap, LatLng, MarkedLocation, MarkerId, ViewState};

/// Operations the application needs from an interactive map.
pub trait MapView {
    fn center(&self) -> LatLng;

    fn zoom(&self) -> u8;

    /// Re-centres the map. Implementations clamp `zoom` to their bounds.
    fn set_view(&mut self, center: LatLng, zoom: u8);

    fn add_layer(&mut self, basemap: Basemap);

    fn remove_layer(&mut self, basemap: Basemap);

    /// Topmost visible tile layer, if any.
    fn active_layer(&self) -> Option<Basemap>;

    /// Shows or hides the zoom control, basemap control and attribution.
    fn set_chrome_visible(&mut self, visible: bool);

    fn chrome_visible(&self) -> bool;

    /// Viewport size in CSS pixels.
    fn viewport_size(&self) -> (u32, u32);

    fn add_marker(&mut self, location: &MarkedLocation) -> MarkerId;

    fn remove_marker(&mut self, marker: MarkerId);

    fn set_marker_popup(&mut self, marker: MarkerId, text: &str);

    fn open_marker_popup(&mut self, marker: MarkerId);

    /// Current center and zoom together.
    fn view(&self) -> ViewState {
        ViewState::new(self.center(), self.zoom())
    }
}
