//! Multi-page export of the marked location list.
//!
//! An export walks the list strictly in order. For each location it moves the
//! map there, waits for the capture, appends the resulting page(s) and writes
//! them before the next location is visited; captures never overlap. The
//! map's original view and basemap are put back when the run ends, whether it
//! saved a file or not.
//!
//! Any failure aborts the whole run. Nothing is saved for an aborted run.

mod filename;
mod gate;

use std::fmt;
use std::path::PathBuf;

use log::{debug, info};
use serde::Serialize;

pub use filename::{export_file_name, sanitize_name};
pub use gate::{ExportGate, ExportPermit};

use crate::{
    capture::{Rasterizer, ViewCapture},
    document::{Document, DocumentBuilder, DocumentWriter, Progress},
    error::{FieldMapsError, Result},
    map::{BasemapSwitch, MapView},
    models::{Basemap, MarkedLocation, ViewState},
};

/// Why an export request was turned away without doing any work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportRejection {
    /// The list is empty
    NoLocations,
    /// Another export holds the [`ExportGate`]
    AlreadyRunning,
}

impl fmt::Display for ExportRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoLocations => write!(f, "Please mark at least one location before exporting."),
            Self::AlreadyRunning => write!(f, "An export is already in progress."),
        }
    }
}

/// Summary of a saved export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportReport {
    pub path: PathBuf,
    pub locations: usize,
    pub pages: usize,
}

/// Result of an export request that did not fail.
#[derive(Debug, Clone, PartialEq)]
pub enum ExportOutcome {
    Saved(ExportReport),
    Rejected(ExportRejection),
}

impl ExportOutcome {
    pub fn report(&self) -> Option<&ExportReport> {
        match self {
            Self::Saved(report) => Some(report),
            Self::Rejected(_) => None,
        }
    }

    pub fn rejection(&self) -> Option<ExportRejection> {
        match self {
            Self::Saved(_) => None,
            Self::Rejected(reason) => Some(*reason),
        }
    }
}

/// Puts the map back where it was when this guard was created.
///
/// Restores the basemap first, then centre and zoom, and makes sure the map
/// chrome is showing.
pub struct ViewRestore<'a, M: MapView> {
    map: &'a mut M,
    basemap: &'a mut BasemapSwitch,
    view: ViewState,
    layer: Basemap,
}

impl<'a, M: MapView> ViewRestore<'a, M> {
    pub fn record(map: &'a mut M, basemap: &'a mut BasemapSwitch) -> Self {
        let view = map.view();
        let layer = basemap.active();
        Self {
            map,
            basemap,
            view,
            layer,
        }
    }

    /// Borrows the map and basemap switch for the duration of the run.
    pub fn parts(&mut self) -> (&mut M, &mut BasemapSwitch) {
        (&mut *self.map, &mut *self.basemap)
    }
}

impl<M: MapView> Drop for ViewRestore<'_, M> {
    fn drop(&mut self) {
        self.basemap.switch_to(&mut *self.map, self.layer);
        self.map.set_view(self.view.center, self.view.zoom);
        self.map.set_chrome_visible(true);
        debug!(
            "Restored map view to {:.6}, {:.6} at zoom {} on {}",
            self.view.center.lat,
            self.view.center.lng,
            self.view.zoom,
            self.layer.label()
        );
    }
}

/// Captures every location in order and writes each page as it is built.
///
/// `on_progress` is told which page is about to be produced, before the
/// map moves for it. Returns the assembled document; the caller saves it.
pub async fn capture_pages<M, R, W, F>(
    capture: &mut ViewCapture<'_, M, R>,
    locations: &[MarkedLocation],
    builder: &DocumentBuilder,
    writer: &mut W,
    mut on_progress: F,
) -> Result<Document>
where
    M: MapView,
    R: Rasterizer,
    W: DocumentWriter,
    F: FnMut(Progress),
{
    let total = DocumentBuilder::total_pages(locations);
    let mut document = builder.start();
    writer.new_document(builder.format())?;

    for location in locations {
        let page = document.len() + 1;
        let abort = |source: FieldMapsError| {
            FieldMapsError::export_aborted(page, location.name.as_str(), source)
        };

        on_progress(Progress {
            current: page,
            total,
        });
        capture.go_to(location);
        let image = capture
            .capture_viewport()
            .await
            .map_err(|err| abort(err.into()))?;

        let first_new = document.len();
        let added = builder.append(&mut document, location, image);
        for index in first_new..first_new + added {
            if index > first_new {
                on_progress(Progress {
                    current: index + 1,
                    total,
                });
            }
            if index > 0 {
                writer.add_page().map_err(&abort)?;
            }
            document.pages()[index].write_to(writer).map_err(&abort)?;
        }
        info!(
            "Captured '{}' as page {page}/{total}{}",
            location.name,
            if added > 1 { " with notes page" } else { "" }
        );
    }

    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{map::HeadlessMap, models::LatLng};

    #[test]
    fn test_view_restore_puts_back_view_and_basemap() {
        let start = ViewState::new(LatLng::new(-41.0, 174.0), 10);
        let mut map = HeadlessMap::new(start, (640, 480));
        let mut switch = BasemapSwitch::attach(&mut map, Basemap::LinzTopo);

        {
            let mut restore = ViewRestore::record(&mut map, &mut switch);
            let (map, switch) = restore.parts();
            switch.switch_to(map, Basemap::LinzAerial);
            map.set_view(LatLng::new(-45.0, 168.0), 16);
            map.set_chrome_visible(false);
        }

        assert_eq!(map.view(), start);
        assert_eq!(switch.active(), Basemap::LinzTopo);
        assert_eq!(map.layers(), [Basemap::LinzTopo]);
        assert!(map.chrome_visible());
    }

    #[test]
    fn test_rejection_messages() {
        assert_eq!(
            ExportRejection::NoLocations.to_string(),
            "Please mark at least one location before exporting."
        );
        let outcome = ExportOutcome::Rejected(ExportRejection::AlreadyRunning);
        assert!(outcome.report().is_none());
        assert_eq!(outcome.rejection(), Some(ExportRejection::AlreadyRunning));
    }
}
