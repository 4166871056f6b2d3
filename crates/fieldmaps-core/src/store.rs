//! Ordered collection of marked locations.
//!
//! [`LocationStore`] is pure data: it never touches the map. Operations that
//! remove entries hand them back so the caller can release their markers.
//! Every successful mutation bumps a revision published on a
//! [`tokio::sync::watch`] channel; presentation layers subscribe to it and
//! re-render from the store instead of keeping their own copy of the order.

use jiff::Timestamp;
use log::debug;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::{
    error::{FieldMapsError, Result},
    models::{Basemap, LocationId, MarkedLocation, MarkerId, ViewState},
};

/// Persistable state of a [`LocationStore`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoreSnapshot {
    pub locations: Vec<MarkedLocation>,
    pub next_id: LocationId,
    pub name_counter: u32,
}

impl Default for StoreSnapshot {
    fn default() -> Self {
        Self {
            locations: Vec::new(),
            next_id: 1,
            name_counter: 1,
        }
    }
}

/// Ordered, insertion-ordered sequence of marked locations.
pub struct LocationStore {
    locations: Vec<MarkedLocation>,
    next_id: LocationId,
    name_counter: u32,
    revision: watch::Sender<u64>,
}

impl LocationStore {
    pub fn new() -> Self {
        Self::from_snapshot(StoreSnapshot::default())
    }

    /// Rebuilds a store from persisted state.
    ///
    /// The id counter is bumped past every restored id so identifiers stay
    /// unique even if the snapshot was edited by hand.
    pub fn from_snapshot(snapshot: StoreSnapshot) -> Self {
        let max_id = snapshot.locations.iter().map(|l| l.id).max().unwrap_or(0);
        let (revision, _) = watch::channel(0);
        Self {
            locations: snapshot.locations,
            next_id: snapshot.next_id.max(max_id + 1),
            name_counter: snapshot.name_counter.max(1),
            revision,
        }
    }

    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            locations: self.locations.clone(),
            next_id: self.next_id,
            name_counter: self.name_counter,
        }
    }

    /// Subscribes to list-changed notifications.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    /// Current revision; bumped once per successful mutation.
    pub fn revision(&self) -> u64 {
        *self.revision.borrow()
    }

    fn notify(&self) {
        self.revision.send_modify(|rev| *rev += 1);
    }

    /// Captures `view` and `basemap` as a new location at the end of the list.
    pub fn mark(&mut self, view: ViewState, basemap: Basemap) -> MarkedLocation {
        let location = MarkedLocation {
            id: self.next_id,
            name: format!("Location {}", self.name_counter),
            lat: view.center.lat,
            lng: view.center.lng,
            zoom: view.zoom,
            basemap,
            include_notes: false,
            marker: None,
            created_at: Timestamp::now(),
        };
        self.next_id += 1;
        self.name_counter += 1;
        self.locations.push(location.clone());
        debug!("Marked location {} as '{}'", location.id, location.name);
        self.notify();
        location
    }

    pub fn get(&self, id: LocationId) -> Option<&MarkedLocation> {
        self.locations.iter().find(|l| l.id == id)
    }

    pub fn position(&self, id: LocationId) -> Option<usize> {
        self.locations.iter().position(|l| l.id == id)
    }

    fn get_mut(&mut self, id: LocationId) -> Result<&mut MarkedLocation> {
        self.locations
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or(FieldMapsError::LocationNotFound { id })
    }

    /// Renames a location. A blank name keeps the previous one.
    ///
    /// Returns whether the name changed.
    pub fn rename(&mut self, id: LocationId, new_name: &str) -> Result<bool> {
        let location = self.get_mut(id)?;
        let trimmed = new_name.trim();
        if trimmed.is_empty() || trimmed == location.name {
            return Ok(false);
        }
        location.name = trimmed.to_string();
        self.notify();
        Ok(true)
    }

    /// Sets whether a notes page follows this location on export.
    pub fn set_include_notes(&mut self, id: LocationId, included: bool) -> Result<()> {
        let location = self.get_mut(id)?;
        if location.include_notes != included {
            location.include_notes = included;
            self.notify();
        }
        Ok(())
    }

    /// Records the marker the map placed for a location.
    pub fn set_marker(&mut self, id: LocationId, marker: Option<MarkerId>) -> Result<()> {
        self.get_mut(id)?.marker = marker;
        Ok(())
    }

    /// Removes a location and returns it so its marker can be released.
    pub fn delete(&mut self, id: LocationId) -> Result<MarkedLocation> {
        let index = self
            .position(id)
            .ok_or(FieldMapsError::LocationNotFound { id })?;
        let removed = self.locations.remove(index);
        self.notify();
        Ok(removed)
    }

    /// Moves `dragged` into the slot `target` occupies.
    ///
    /// The target index is taken before removal, so dragging downwards lands
    /// just after the target and dragging upwards lands just before it.
    /// Returns `false` (and changes nothing) when either id is missing or both
    /// ids are equal.
    pub fn reorder(&mut self, dragged: LocationId, target: LocationId) -> bool {
        if dragged == target {
            return false;
        }
        let (Some(from), Some(to)) = (self.position(dragged), self.position(target)) else {
            return false;
        };
        let item = self.locations.remove(from);
        self.locations.insert(to, item);
        debug!("Moved location {dragged} from index {from} to {to}");
        self.notify();
        true
    }

    /// Empties the store and resets the display-name counter.
    ///
    /// Returns the removed entries so their markers can be released.
    pub fn clear(&mut self) -> Vec<MarkedLocation> {
        self.name_counter = 1;
        let removed = std::mem::take(&mut self.locations);
        if !removed.is_empty() {
            self.notify();
        }
        removed
    }

    pub fn iter(&self) -> impl Iterator<Item = &MarkedLocation> {
        self.locations.iter()
    }

    pub fn as_slice(&self) -> &[MarkedLocation] {
        &self.locations
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// Number of pages an export of the current list produces.
    pub fn page_count(&self) -> usize {
        self.locations
            .iter()
            .map(|l| 1 + usize::from(l.include_notes))
            .sum()
    }
}

impl Default for LocationStore {
    fn default() -> Self {
        Self::new()
    }
}
