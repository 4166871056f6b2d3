//! Editable, drag-reorderable presentation of the location list.
//!
//! [`ListView`] never owns the order. It renders rows from the store each
//! time the store publishes a new revision, and forwards every edit (row
//! actions and drops) back to [`FieldMaps`].

use log::debug;
use tokio::sync::watch;

use crate::{
    app::FieldMaps,
    capture::Rasterizer,
    error::Result,
    map::MapView,
    models::{Basemap, LocationId, MarkedLocation},
    params::{MoveLocation, RenameLocation, ToggleNotes},
    store::LocationStore,
};

/// Shown in place of rows when nothing has been marked.
pub const EMPTY_STATE: &str = "No locations marked yet. Mark the current view to add one.";

/// One rendered row.
#[derive(Debug, Clone, PartialEq)]
pub struct ListRow {
    pub id: LocationId,
    /// 1-based position in the list
    pub position: usize,
    pub name: String,
    /// `"<lat>, <lng> (Zoom: <z>)"`
    pub coordinates: String,
    pub basemap: Basemap,
    pub include_notes: bool,
}

impl ListRow {
    fn render(position: usize, location: &MarkedLocation) -> Self {
        Self {
            id: location.id,
            position,
            name: location.name.clone(),
            coordinates: format!(
                "{} (Zoom: {})",
                location.coordinates_text(),
                location.zoom
            ),
            basemap: location.basemap,
            include_notes: location.include_notes,
        }
    }
}

/// Per-row controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowAction {
    Rename(String),
    GoTo,
    Delete,
    ToggleNotes(bool),
}

/// In-flight drag gesture.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DragState {
    dragged: Option<LocationId>,
    over: Option<LocationId>,
}

/// Rows plus basemap control state, kept in step with the store.
pub struct ListView {
    changes: watch::Receiver<u64>,
    rows: Vec<ListRow>,
    active_basemap: Basemap,
    drag: DragState,
}

impl ListView {
    pub fn attach<M: MapView, R: Rasterizer>(app: &FieldMaps<M, R>) -> Self {
        Self {
            changes: app.store().subscribe(),
            rows: render_rows(app.store()),
            active_basemap: app.basemap().active(),
            drag: DragState::default(),
        }
    }

    /// Re-renders if the store changed since the last render.
    ///
    /// Returns whether the rows were rebuilt.
    pub fn sync<M: MapView, R: Rasterizer>(&mut self, app: &FieldMaps<M, R>) -> bool {
        self.active_basemap = app.basemap().active();
        if !self.changes.has_changed().unwrap_or(false) {
            return false;
        }
        let revision = *self.changes.borrow_and_update();
        self.rows = render_rows(app.store());
        debug!("List re-rendered at revision {revision}");
        true
    }

    pub fn rows(&self) -> &[ListRow] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Basemap control buttons in control order, with the active one flagged.
    pub fn basemap_buttons(&self) -> [(Basemap, bool); 3] {
        Basemap::ALL.map(|basemap| (basemap, basemap == self.active_basemap))
    }

    /// Runs a row control against the application, then re-renders.
    pub fn dispatch<M: MapView, R: Rasterizer>(
        &mut self,
        app: &mut FieldMaps<M, R>,
        id: LocationId,
        action: RowAction,
    ) -> Result<()> {
        match action {
            RowAction::Rename(name) => {
                app.rename_location(&RenameLocation { id, name })?;
            }
            RowAction::GoTo => {
                app.go_to_location(id)?;
            }
            RowAction::Delete => {
                app.delete_location(id)?;
            }
            RowAction::ToggleNotes(included) => {
                app.set_include_notes(&ToggleNotes { id, included })?;
            }
        }
        self.sync(app);
        Ok(())
    }

    pub fn drag_start(&mut self, id: LocationId) {
        self.drag = DragState {
            dragged: Some(id),
            over: None,
        };
    }

    /// Highlights `id` as a drop target unless it is the row being dragged.
    pub fn drag_enter(&mut self, id: LocationId) {
        if self.drag.dragged.is_some_and(|dragged| dragged != id) {
            self.drag.over = Some(id);
        }
    }

    pub fn drag_leave(&mut self, id: LocationId) {
        if self.drag.over == Some(id) {
            self.drag.over = None;
        }
    }

    /// Drops the dragged row on `target`. Returns whether the list moved.
    pub fn drop_on<M: MapView, R: Rasterizer>(
        &mut self,
        app: &mut FieldMaps<M, R>,
        target: LocationId,
    ) -> bool {
        let Some(dragged) = self.drag.dragged else {
            return false;
        };
        let moved = app.move_location(&MoveLocation { dragged, target });
        self.sync(app);
        moved
    }

    pub fn drag_end(&mut self) {
        self.drag = DragState::default();
    }

    pub fn is_dragging(&self, id: LocationId) -> bool {
        self.drag.dragged == Some(id)
    }

    pub fn is_drag_over(&self, id: LocationId) -> bool {
        self.drag.over == Some(id)
    }
}

fn render_rows(store: &LocationStore) -> Vec<ListRow> {
    store
        .iter()
        .enumerate()
        .map(|(index, location)| ListRow::render(index + 1, location))
        .collect()
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::{
        app::FieldMapsBuilder,
        capture::SchematicRasterizer,
        map::HeadlessMap,
        params::SetView,
        settings::Settings,
    };

    fn app_with(count: usize) -> FieldMaps<HeadlessMap, SchematicRasterizer> {
        let settings = Settings::default().with_mark_cooldown(Duration::ZERO);
        let mut app = FieldMapsBuilder::new(HeadlessMap::default(), SchematicRasterizer)
            .with_settings(settings)
            .build()
            .unwrap();
        for i in 0..count {
            app.set_view(&SetView {
                lat: -41.0 - i as f64,
                lng: 174.0,
                zoom: 12,
            })
            .unwrap();
            app.mark_current_view().unwrap();
        }
        app
    }

    fn row_ids(view: &ListView) -> Vec<LocationId> {
        view.rows().iter().map(|r| r.id).collect()
    }

    #[test]
    fn test_empty_list_renders_no_rows() {
        let app = app_with(0);
        let view = ListView::attach(&app);
        assert!(view.is_empty());
    }

    #[test]
    fn test_rows_mirror_store() {
        let app = app_with(2);
        let view = ListView::attach(&app);
        let row = &view.rows()[1];
        assert_eq!(row.position, 2);
        assert_eq!(row.name, "Location 2");
        assert_eq!(row.coordinates, "-42.000000, 174.000000 (Zoom: 12)");
        assert_eq!(row.basemap, Basemap::LinzTopo);
        assert!(!row.include_notes);
    }

    #[test]
    fn test_sync_only_rebuilds_after_a_change() {
        let mut app = app_with(1);
        let mut view = ListView::attach(&app);
        assert!(!view.sync(&app));

        app.mark_current_view().unwrap();
        assert!(view.sync(&app));
        assert_eq!(view.rows().len(), 2);
        assert!(!view.sync(&app));
    }

    #[test]
    fn test_dispatch_row_actions() {
        let mut app = app_with(2);
        let mut view = ListView::attach(&app);

        view.dispatch(&mut app, 1, RowAction::Rename("Trailhead".to_string()))
            .unwrap();
        assert_eq!(view.rows()[0].name, "Trailhead");

        view.dispatch(&mut app, 2, RowAction::ToggleNotes(true)).unwrap();
        assert!(view.rows()[1].include_notes);

        view.dispatch(&mut app, 1, RowAction::Delete).unwrap();
        assert_eq!(row_ids(&view), [2]);

        assert!(view.dispatch(&mut app, 1, RowAction::GoTo).is_err());
    }

    #[test]
    fn test_drag_highlight_skips_dragged_row() {
        let app = app_with(3);
        let mut view = ListView::attach(&app);

        view.drag_start(1);
        view.drag_enter(1);
        assert!(!view.is_drag_over(1));
        view.drag_enter(2);
        assert!(view.is_drag_over(2));
        view.drag_leave(2);
        assert!(!view.is_drag_over(2));
        assert!(view.is_dragging(1));
    }

    #[test]
    fn test_drop_reorders_store_and_rows() {
        let mut app = app_with(3);
        let mut view = ListView::attach(&app);

        view.drag_start(1);
        view.drag_enter(3);
        assert!(view.drop_on(&mut app, 3));
        view.drag_end();

        assert_eq!(row_ids(&view), [2, 3, 1]);
        let store_ids: Vec<_> = app.store().iter().map(|l| l.id).collect();
        assert_eq!(store_ids, row_ids(&view));
        assert!(!view.is_dragging(1));
    }

    #[test]
    fn test_drop_without_drag_does_nothing() {
        let mut app = app_with(2);
        let mut view = ListView::attach(&app);
        assert!(!view.drop_on(&mut app, 2));
        assert_eq!(row_ids(&view), [1, 2]);
    }

    #[test]
    fn test_basemap_buttons_highlight_active() {
        let mut app = app_with(0);
        let mut view = ListView::attach(&app);
        app.switch_basemap(Basemap::LinzAerial);
        view.sync(&app);
        assert_eq!(
            view.basemap_buttons(),
            [
                (Basemap::LinzTopo, false),
                (Basemap::OpenStreetMap, false),
                (Basemap::LinzAerial, true),
            ]
        );
    }
}
