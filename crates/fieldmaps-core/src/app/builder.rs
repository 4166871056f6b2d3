//! Builder for creating and configuring FieldMaps instances.

use log::debug;

use super::FieldMaps;
use crate::{
    capture::Rasterizer,
    error::Result,
    map::{BasemapSwitch, MapView},
    session::Session,
    settings::Settings,
    store::LocationStore,
};

/// Builder for creating and configuring [`FieldMaps`] instances.
pub struct FieldMapsBuilder<M: MapView, R: Rasterizer> {
    map: M,
    rasterizer: R,
    settings: Settings,
    session: Option<Session>,
}

impl<M: MapView, R: Rasterizer> FieldMapsBuilder<M, R> {
    /// Creates a builder around the map and rasterizer collaborators.
    pub fn new(map: M, rasterizer: R) -> Self {
        Self {
            map,
            rasterizer,
            settings: Settings::default(),
            session: None,
        }
    }

    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    /// Restores a saved session when building.
    ///
    /// The map is moved to the saved view, the saved basemap becomes active
    /// and every saved location gets a fresh marker.
    pub fn with_session(mut self, session: Session) -> Self {
        self.session = Some(session);
        self
    }

    /// Builds the configured instance.
    ///
    /// # Errors
    ///
    /// Returns `FieldMapsError::LocationNotFound` if a restored location
    /// cannot be given its marker
    pub fn build(self) -> Result<FieldMaps<M, R>> {
        let Self {
            mut map,
            rasterizer,
            settings,
            session,
        } = self;

        let (initial, snapshot) = match session {
            Some(session) => {
                map.set_view(session.view.center, session.view.zoom);
                (session.basemap, session.store)
            }
            None => (settings.initial_basemap, Default::default()),
        };

        let basemap = BasemapSwitch::attach(&mut map, initial);
        let mut store = LocationStore::from_snapshot(snapshot);

        let placed: Vec<_> = store
            .iter()
            .map(|location| (location.id, map.add_marker(location)))
            .collect();
        for (id, marker) in placed {
            store.set_marker(id, Some(marker))?;
        }
        debug!(
            "Built field maps with {} location(s) on {}",
            store.len(),
            initial.label()
        );

        Ok(FieldMaps::new(map, rasterizer, basemap, store, settings))
    }
}
