//! Application state and the operations the controls invoke.

mod builder;

use std::time::{Duration, Instant};

use jiff::{tz::TimeZone, Timestamp};
use log::{debug, info, warn};

pub use builder::FieldMapsBuilder;

use crate::{
    capture::{Rasterizer, ViewCapture},
    document::{DocumentBuilder, DocumentWriter, Progress},
    error::{FieldMapsError, Result},
    export::{
        capture_pages, export_file_name, ExportGate, ExportOutcome, ExportRejection,
        ExportReport, ViewRestore,
    },
    map::{BasemapSwitch, MapView},
    models::{Basemap, LocationId, MarkedLocation, ViewState},
    params::{ClearLocations, ExportDocument, MoveLocation, RenameLocation, SetView, ToggleNotes},
    session::Session,
    settings::Settings,
    store::LocationStore,
};

/// Drops "mark" requests that arrive within the cool-down of the last one.
#[derive(Debug)]
struct MarkThrottle {
    cooldown: Duration,
    last: Option<Instant>,
}

impl MarkThrottle {
    fn new(cooldown: Duration) -> Self {
        Self {
            cooldown,
            last: None,
        }
    }

    fn try_begin(&mut self, now: Instant) -> bool {
        if let Some(last) = self.last {
            if now.duration_since(last) < self.cooldown {
                return false;
            }
        }
        self.last = Some(now);
        true
    }
}

/// Owns the map, the marked locations and everything an export needs.
pub struct FieldMaps<M: MapView, R: Rasterizer> {
    map: M,
    rasterizer: R,
    basemap: BasemapSwitch,
    store: LocationStore,
    settings: Settings,
    export_gate: ExportGate,
    throttle: MarkThrottle,
}

impl<M: MapView, R: Rasterizer> FieldMaps<M, R> {
    fn new(
        map: M,
        rasterizer: R,
        basemap: BasemapSwitch,
        store: LocationStore,
        settings: Settings,
    ) -> Self {
        let throttle = MarkThrottle::new(settings.mark_cooldown);
        Self {
            map,
            rasterizer,
            basemap,
            store,
            settings,
            export_gate: ExportGate::new(),
            throttle,
        }
    }

    pub fn map(&self) -> &M {
        &self.map
    }

    pub fn rasterizer(&self) -> &R {
        &self.rasterizer
    }

    pub fn store(&self) -> &LocationStore {
        &self.store
    }

    pub fn basemap(&self) -> &BasemapSwitch {
        &self.basemap
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// The gate guarding exports; clone it to observe or hold it elsewhere.
    pub fn export_gate(&self) -> &ExportGate {
        &self.export_gate
    }

    /// Everything needed to rebuild this state later.
    pub fn session(&self) -> Session {
        Session {
            view: self.map.view(),
            basemap: self.basemap.active(),
            store: self.store.snapshot(),
        }
    }

    /// Pans and zooms the map.
    pub fn set_view(&mut self, params: &SetView) -> Result<ViewState> {
        let view = params.validate()?;
        self.map.set_view(view.center, view.zoom);
        Ok(view)
    }

    /// Shows `basemap`. Returns `false` if it was already showing.
    pub fn switch_basemap(&mut self, basemap: Basemap) -> bool {
        self.basemap.switch_to(&mut self.map, basemap)
    }

    /// Records the current view as a new location and places its marker.
    ///
    /// Returns `None` when the request falls inside the mark cool-down.
    pub fn mark_current_view(&mut self) -> Result<Option<MarkedLocation>> {
        if !self.throttle.try_begin(Instant::now()) {
            debug!("Ignoring mark request during cool-down");
            return Ok(None);
        }

        let mut location = self.store.mark(self.map.view(), self.basemap.active());
        let marker = self.map.add_marker(&location);
        self.store.set_marker(location.id, Some(marker))?;
        location.marker = Some(marker);
        info!(
            "Marked '{}' at {} (zoom {}, {})",
            location.name,
            location.coordinates_text(),
            location.zoom,
            location.basemap.label()
        );
        Ok(Some(location))
    }

    /// Renames a location and refreshes its marker popup.
    ///
    /// A blank name keeps the old one; returns whether the name changed.
    pub fn rename_location(&mut self, params: &RenameLocation) -> Result<bool> {
        let changed = self.store.rename(params.id, &params.name)?;
        if changed {
            if let Some(location) = self.store.get(params.id) {
                if let Some(marker) = location.marker {
                    self.map.set_marker_popup(marker, &location.popup_text());
                }
            }
        }
        Ok(changed)
    }

    pub fn set_include_notes(&mut self, params: &ToggleNotes) -> Result<()> {
        self.store.set_include_notes(params.id, params.included)
    }

    /// Centres the map on a location at its zoom and opens its popup.
    ///
    /// The basemap is left as it is.
    pub fn go_to_location(&mut self, id: LocationId) -> Result<MarkedLocation> {
        let location = self
            .store
            .get(id)
            .cloned()
            .ok_or(FieldMapsError::LocationNotFound { id })?;
        self.map.set_view(location.center(), location.zoom);
        if let Some(marker) = location.marker {
            self.map.open_marker_popup(marker);
        }
        Ok(location)
    }

    /// Deletes a location and removes its marker from the map.
    pub fn delete_location(&mut self, id: LocationId) -> Result<MarkedLocation> {
        let removed = self.store.delete(id)?;
        if let Some(marker) = removed.marker {
            self.map.remove_marker(marker);
        }
        info!("Deleted '{}' (ID: {})", removed.name, removed.id);
        Ok(removed)
    }

    /// Drag-and-drop move; see [`LocationStore::reorder`].
    pub fn move_location(&mut self, params: &MoveLocation) -> bool {
        self.store.reorder(params.dragged, params.target)
    }

    /// Removes every location and its marker.
    ///
    /// # Errors
    ///
    /// Returns `FieldMapsError::InvalidInput` if there is something to clear
    /// and the request was not confirmed
    pub fn clear_locations(&mut self, params: &ClearLocations) -> Result<Vec<MarkedLocation>> {
        if self.store.is_empty() {
            return Ok(Vec::new());
        }
        if !params.confirmed {
            return Err(FieldMapsError::invalid_input("confirm").with_reason(format!(
                "clearing {} location(s) must be confirmed",
                self.store.len()
            )));
        }
        let removed = self.store.clear();
        for marker in removed.iter().filter_map(|l| l.marker) {
            self.map.remove_marker(marker);
        }
        info!("Cleared {} location(s)", removed.len());
        Ok(removed)
    }

    /// Exports every location, in list order, into one document.
    ///
    /// An empty list or an export already in flight is rejected before any
    /// capture starts. On every other exit the map gets its original view
    /// and basemap back. The document is saved only if every page was
    /// produced.
    ///
    /// # Errors
    ///
    /// Returns `FieldMapsError::ExportAborted` if a capture or page write
    /// fails, or the writer's error if saving fails
    pub async fn export<W, F>(
        &mut self,
        writer: &mut W,
        params: &ExportDocument,
        on_progress: F,
    ) -> Result<ExportOutcome>
    where
        W: DocumentWriter,
        F: FnMut(Progress),
    {
        if self.store.is_empty() {
            info!("Export requested with no marked locations");
            return Ok(ExportOutcome::Rejected(ExportRejection::NoLocations));
        }
        let Some(_permit) = self.export_gate.try_acquire() else {
            warn!("Export requested while another export is running");
            return Ok(ExportOutcome::Rejected(ExportRejection::AlreadyRunning));
        };

        let locations = self.store.as_slice().to_vec();
        let today = Timestamp::now().to_zoned(TimeZone::UTC).date();
        let path = params.output_dir.join(export_file_name(
            locations.iter().map(|l| l.name.as_str()),
            today,
        ));
        let builder = DocumentBuilder::new(self.settings.page);
        info!(
            "Exporting {} location(s), {} page(s) to {}",
            locations.len(),
            DocumentBuilder::total_pages(&locations),
            path.display()
        );

        let produced = {
            let mut restore = ViewRestore::record(&mut self.map, &mut self.basemap);
            let (map, basemap) = restore.parts();
            let mut capture = ViewCapture::new(
                map,
                basemap,
                &self.rasterizer,
                self.settings.settle_delay,
                self.settings.render,
            );
            capture_pages(&mut capture, &locations, &builder, writer, on_progress).await
        };

        let document = match produced {
            Ok(document) => document,
            Err(err) => {
                warn!("{err}");
                return Err(err);
            }
        };
        writer.save(&path)?;

        let report = ExportReport {
            path,
            locations: locations.len(),
            pages: document.len(),
        };
        info!(
            "Export completed: {} page(s) written to {}",
            report.pages,
            report.path.display()
        );
        Ok(ExportOutcome::Saved(report))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_throttle_drops_requests_inside_cooldown() {
        let mut throttle = MarkThrottle::new(Duration::from_millis(1500));
        let start = Instant::now();
        assert!(throttle.try_begin(start));
        assert!(!throttle.try_begin(start + Duration::from_millis(200)));
        assert!(throttle.try_begin(start + Duration::from_millis(1500)));
    }

    #[test]
    fn test_zero_cooldown_never_throttles() {
        let mut throttle = MarkThrottle::new(Duration::ZERO);
        let now = Instant::now();
        assert!(throttle.try_begin(now));
        assert!(throttle.try_begin(now));
    }
}
