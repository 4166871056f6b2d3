//! Data models for marked locations and map views.
//!
//! Display implementations for these models live in
//! [`crate::display::models`], keeping data structures separate from
//! presentation.

mod basemap;
mod geo;
mod location;


pub use basemap::Basemap;
pub use geo::{LatLng, ViewState, MAX_ZOOM, MIN_ZOOM};
pub use location::{LocationId, MarkedLocation, MarkerId};
