//! Marked location model.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{Basemap, LatLng, ViewState};

/// Unique identifier of a marked location within a store.
pub type LocationId = u64;

/// Handle to a marker owned by the map collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MarkerId(pub u64);

/// A user-saved point of interest with the view state at time of marking.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MarkedLocation {
    /// Unique identifier, never reused for the lifetime of the store
    pub id: LocationId,

    /// User-editable display name
    pub name: String,

    /// Latitude in WGS84 degrees
    pub lat: f64,

    /// Longitude in WGS84 degrees
    pub lng: f64,

    /// Zoom level at time of marking
    pub zoom: u8,

    /// Basemap that was active when the location was marked
    pub basemap: Basemap,

    /// Whether a notes page follows this location's capture page on export
    #[serde(default)]
    pub include_notes: bool,

    /// Marker on the map, if the collaborator placed one
    #[serde(skip)]
    pub marker: Option<MarkerId>,

    /// Timestamp when the location was marked (UTC)
    pub created_at: Timestamp,
}

impl MarkedLocation {
    /// The recorded center of this location.
    pub fn center(&self) -> LatLng {
        LatLng::new(self.lat, self.lng)
    }

    /// The full recorded view (center and zoom).
    pub fn view(&self) -> ViewState {
        ViewState::new(self.center(), self.zoom)
    }

    /// `"<lat>, <lng>"` with six decimals, as printed under page titles.
    pub fn coordinates_text(&self) -> String {
        format!("{:.6}, {:.6}", self.lat, self.lng)
    }

    /// Popup text for this location's map marker.
    pub fn popup_text(&self) -> String {
        format!(
            "{}\nLat: {:.6}\nLng: {:.6}",
            self.name, self.lat, self.lng
        )
    }
}
