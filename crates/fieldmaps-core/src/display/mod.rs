//! Display formatting for models, the list view and operation results.
//!
//! Domain models implement [`std::fmt::Display`] directly (see [`models`]);
//! wrapper types in [`results`] add the context of the operation that
//! produced them. Everything is emitted as markdown so the CLI can hand it
//! to its terminal renderer unchanged.
//!
//! ```rust
//! use fieldmaps_core::{display::CreateResult, models::{Basemap, MarkedLocation}};
//! use jiff::Timestamp;
//!
//! let location = MarkedLocation {
//!     id: 7,
//!     name: "Summit Camp".to_string(),
//!     lat: -39.2817,
//!     lng: 175.5685,
//!     zoom: 14,
//!     basemap: Basemap::LinzTopo,
//!     include_notes: true,
//!     marker: None,
//!     created_at: Timestamp::now(),
//! };
//!
//! let output = CreateResult::new(location).to_string();
//! assert!(output.contains("Marked location with ID: 7"));
//! assert!(output.contains("-39.281700, 175.568500 (Zoom: 14)"));
//! ```

pub mod datetime;
pub mod list;
pub mod models;
pub mod results;
pub mod status;

pub use datetime::LocalDateTime;
pub use results::{ClearResult, CreateResult, DeleteResult, ExportResult, UpdateResult};
pub use status::OperationStatus;
