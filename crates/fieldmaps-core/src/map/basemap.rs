//! Basemap state machine.

use log::debug;

use super::MapView;
use crate::models::Basemap;

/// Tracks which of the three basemaps is showing.
///
/// Exactly one basemap is active at a time. A transition removes the old
/// tile layer and adds the new one before the active state changes, so the
/// control highlight ([`BasemapSwitch::is_active`]) always matches the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BasemapSwitch {
    active: Basemap,
}

impl BasemapSwitch {
    /// Adds the initial layer to `map` and starts in that state.
    pub fn attach<M: MapView>(map: &mut M, initial: Basemap) -> Self {
        map.add_layer(initial);
        Self { active: initial }
    }

    pub fn active(&self) -> Basemap {
        self.active
    }

    /// Whether the control button for `basemap` should be highlighted.
    pub fn is_active(&self, basemap: Basemap) -> bool {
        self.active == basemap
    }

    /// Swaps to `target`. Returns `false` if it was already active.
    pub fn switch_to<M: MapView>(&mut self, map: &mut M, target: Basemap) -> bool {
        if self.active == target {
            return false;
        }
        map.remove_layer(self.active);
        map.add_layer(target);
        debug!("Switched basemap {} -> {}", self.active.as_str(), target.as_str());
        self.active = target;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::HeadlessMap;

    #[test]
    fn test_attach_adds_initial_layer() {
        let mut map = HeadlessMap::default();
        let switch = BasemapSwitch::attach(&mut map, Basemap::OpenStreetMap);
        assert_eq!(switch.active(), Basemap::OpenStreetMap);
        assert_eq!(map.layers(), [Basemap::OpenStreetMap]);
    }

    #[test]
    fn test_switch_swaps_exactly_one_layer() {
        let mut map = HeadlessMap::default();
        let mut switch = BasemapSwitch::attach(&mut map, Basemap::LinzTopo);

        assert!(switch.switch_to(&mut map, Basemap::LinzAerial));
        assert_eq!(map.layers(), [Basemap::LinzAerial]);
        assert!(switch.is_active(Basemap::LinzAerial));
        assert!(!switch.is_active(Basemap::LinzTopo));

        assert!(!switch.switch_to(&mut map, Basemap::LinzAerial));
        assert_eq!(map.layers(), [Basemap::LinzAerial]);
    }
}
