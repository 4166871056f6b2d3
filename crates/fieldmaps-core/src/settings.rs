//! Tunable behaviour of the application.

use std::time::Duration;

use crate::{capture::RenderOptions, document::PageFormat, models::Basemap};

/// Runtime settings. `Default` matches the behaviour of the web map.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Time given to freshly requested tiles before a capture
    pub settle_delay: Duration,
    /// Minimum interval between two accepted "mark" actions
    pub mark_cooldown: Duration,
    pub render: RenderOptions,
    pub page: PageFormat,
    /// Basemap shown when no session says otherwise
    pub initial_basemap: Basemap,
}

impl Settings {
    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    pub fn with_mark_cooldown(mut self, cooldown: Duration) -> Self {
        self.mark_cooldown = cooldown;
        self
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            settle_delay: Duration::from_millis(1000),
            mark_cooldown: Duration::from_millis(1500),
            render: RenderOptions::default(),
            page: PageFormat::default(),
            initial_basemap: Basemap::default(),
        }
    }
}
