//! Parameter structures shared by every interface.
//!
//! These carry no framework derives. The CLI wraps them in clap argument
//! structs and converts with `From`, keeping argument parsing out of the
//! core.

use std::path::PathBuf;

use crate::{
    error::{FieldMapsError, Result},
    models::{LatLng, LocationId, ViewState, MAX_ZOOM},
};

/// Parameters naming a single location.
#[derive(Debug, Clone)]
pub struct Id {
    pub id: LocationId,
}

/// Parameters for renaming a location.
#[derive(Debug, Clone)]
pub struct RenameLocation {
    pub id: LocationId,
    pub name: String,
}

/// Parameters for including or excluding a location's notes page.
#[derive(Debug, Clone)]
pub struct ToggleNotes {
    pub id: LocationId,
    pub included: bool,
}

/// Parameters for a drag-and-drop move.
#[derive(Debug, Clone)]
pub struct MoveLocation {
    /// Location being dragged
    pub dragged: LocationId,
    /// Location it was dropped on
    pub target: LocationId,
}

/// Parameters for panning/zooming the map.
#[derive(Debug, Clone)]
pub struct SetView {
    pub lat: f64,
    pub lng: f64,
    pub zoom: u8,
}

impl SetView {
    /// Checks the coordinates and zoom, returning the view to apply.
    pub fn validate(&self) -> Result<ViewState> {
        if !(-90.0..=90.0).contains(&self.lat) {
            return Err(FieldMapsError::invalid_input("lat")
                .with_reason(format!("{} is outside -90..=90", self.lat)));
        }
        if !(-180.0..=180.0).contains(&self.lng) {
            return Err(FieldMapsError::invalid_input("lng")
                .with_reason(format!("{} is outside -180..=180", self.lng)));
        }
        if self.zoom > MAX_ZOOM {
            return Err(FieldMapsError::invalid_input("zoom")
                .with_reason(format!("{} is above the maximum of {MAX_ZOOM}", self.zoom)));
        }
        Ok(ViewState::new(LatLng::new(self.lat, self.lng), self.zoom))
    }
}

/// Parameters for clearing every location.
#[derive(Debug, Clone)]
pub struct ClearLocations {
    /// The user confirmed the destructive action
    pub confirmed: bool,
}

/// Parameters for exporting the list to a document.
#[derive(Debug, Clone)]
pub struct ExportDocument {
    /// Directory the generated file is written into
    pub output_dir: PathBuf,
}
