//! Coordinates and view state.

use serde::{Deserialize, Serialize};

/// Lowest zoom level accepted by the map.
pub const MIN_ZOOM: u8 = 0;

/// Highest zoom level accepted by the map.
pub const MAX_ZOOM: u8 = 19;

/// A WGS84 coordinate in degrees.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Center and zoom of the map viewport.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ViewState {
    pub center: LatLng,
    pub zoom: u8,
}

impl ViewState {
    /// Creates a view, clamping zoom into `MIN_ZOOM..=MAX_ZOOM`.
    pub fn new(center: LatLng, zoom: u8) -> Self {
        Self {
            center,
            zoom: zoom.clamp(MIN_ZOOM, MAX_ZOOM),
        }
    }
}

impl Default for ViewState {
    /// Wellington, New Zealand at street scale.
    fn default() -> Self {
        Self::new(LatLng::new(-41.2865, 174.7762), 13)
    }
}
