//! Core library for the Field Maps application.
//!
//! A field user pans a basemap, marks a sequence of named locations and
//! exports them as one multi-page document: a framed map capture per
//! location, optionally followed by a grid/ruled notes page.
//!
//! # Architecture
//!
//! - **State** ([`FieldMaps`]): owns the map collaborator, the rasterizer,
//!   the [`BasemapSwitch`], the [`LocationStore`], [`Settings`] and the
//!   export gate. There is no ambient global state.
//! - **Collaborators**: the map ([`map::MapView`]), the rasterizer
//!   ([`capture::Rasterizer`]) and the document writer
//!   ([`document::DocumentWriter`]) are traits. [`map::HeadlessMap`],
//!   [`capture::SchematicRasterizer`] and [`document::PdfWriter`] implement
//!   them without a browser.
//! - **Export** ([`export`]): strictly sequential capture, one location at a
//!   time, with the original view restored on every exit path.
//! - **Presentation** ([`ListView`], [`display`]): rows re-rendered from the
//!   store on change notifications and markdown `Display` output.
//!
//! # Quick Start
//!
//! ```rust
//! use fieldmaps_core::{
//!     capture::SchematicRasterizer, map::HeadlessMap, params::SetView, FieldMapsBuilder,
//! };
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut app = FieldMapsBuilder::new(HeadlessMap::default(), SchematicRasterizer).build()?;
//!
//! app.set_view(&SetView { lat: -39.2817, lng: 175.5685, zoom: 14 })?;
//! let location = app.mark_current_view()?.expect("first mark is never throttled");
//! assert_eq!(location.name, "Location 1");
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod capture;
pub mod display;
pub mod document;
pub mod error;
pub mod export;
pub mod list_view;
pub mod map;
pub mod models;
pub mod params;
pub mod session;
pub mod settings;
pub mod store;

// Re-export commonly used types
pub use app::{FieldMaps, FieldMapsBuilder};
pub use display::{
    ClearResult, CreateResult, DeleteResult, ExportResult, OperationStatus, UpdateResult,
};
pub use error::{CaptureError, FieldMapsError, Result};
pub use export::{ExportOutcome, ExportRejection, ExportReport};
pub use list_view::{ListRow, ListView, RowAction};
pub use map::BasemapSwitch;
pub use models::{Basemap, LatLng, LocationId, MarkedLocation, ViewState};
pub use params::{
    ClearLocations, ExportDocument, Id, MoveLocation, RenameLocation, SetView, ToggleNotes,
};
pub use session::Session;
pub use settings::Settings;
pub use store::{LocationStore, StoreSnapshot};
