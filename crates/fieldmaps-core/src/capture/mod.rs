//! Driving the map to a location and rasterizing its viewport.
//!
//! [`ViewCapture`] is the adapter the export pipeline talks to. It owns the
//! sequencing rules for a single page capture:
//!
//! 1. [`ViewCapture::go_to`] swaps the tile layer (if needed) and re-centres.
//! 2. [`ViewCapture::capture_viewport`] waits a fixed settle delay so the new
//!    tiles can draw, hides the map chrome, renders, then shows the chrome
//!    again whether or not rendering succeeded.

mod raster;
mod schematic;

use std::ops::{Deref, DerefMut};
use std::time::Duration;

use log::debug;
use serde::{Deserialize, Serialize};

pub use raster::RasterImage;
pub use schematic::SchematicRasterizer;

use crate::{
    error::CaptureError,
    map::{BasemapSwitch, MapView},
    models::MarkedLocation,
};

/// Options forwarded to the rasterizer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenderOptions {
    /// Device pixel multiplier; 2.0 renders at double resolution
    pub scale: f32,
    /// Load cross-origin tiles with CORS so they can be read back
    pub cross_origin: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            scale: 2.0,
            cross_origin: true,
        }
    }
}

/// Renders the visible map viewport to an image.
#[allow(async_fn_in_trait)]
pub trait Rasterizer {
    async fn render_viewport<M: MapView>(
        &self,
        map: &M,
        options: &RenderOptions,
    ) -> Result<RasterImage, CaptureError>;
}

/// Hides the map chrome for as long as it lives.
pub struct ChromeHidden<'a, M: MapView> {
    map: &'a mut M,
}

impl<'a, M: MapView> ChromeHidden<'a, M> {
    pub fn new(map: &'a mut M) -> Self {
        map.set_chrome_visible(false);
        Self { map }
    }
}

impl<M: MapView> Deref for ChromeHidden<'_, M> {
    type Target = M;

    fn deref(&self) -> &M {
        &*self.map
    }
}

impl<M: MapView> DerefMut for ChromeHidden<'_, M> {
    fn deref_mut(&mut self) -> &mut M {
        &mut *self.map
    }
}

impl<M: MapView> Drop for ChromeHidden<'_, M> {
    fn drop(&mut self) {
        self.map.set_chrome_visible(true);
    }
}

/// Points the map at marked locations and captures what it shows.
pub struct ViewCapture<'a, M: MapView, R: Rasterizer> {
    map: &'a mut M,
    basemap: &'a mut BasemapSwitch,
    rasterizer: &'a R,
    settle_delay: Duration,
    options: RenderOptions,
}

impl<'a, M: MapView, R: Rasterizer> ViewCapture<'a, M, R> {
    pub fn new(
        map: &'a mut M,
        basemap: &'a mut BasemapSwitch,
        rasterizer: &'a R,
        settle_delay: Duration,
        options: RenderOptions,
    ) -> Self {
        Self {
            map,
            basemap,
            rasterizer,
            settle_delay,
            options,
        }
    }

    /// Shows `location` with the basemap it was marked on.
    pub fn go_to(&mut self, location: &MarkedLocation) {
        self.basemap.switch_to(self.map, location.basemap);
        self.map.set_view(location.center(), location.zoom);
        debug!(
            "Map moved to '{}' ({}, zoom {}, {})",
            location.name,
            location.coordinates_text(),
            location.zoom,
            location.basemap.label()
        );
    }

    /// Waits for tiles to settle, then renders the viewport without chrome.
    pub async fn capture_viewport(&mut self) -> Result<RasterImage, CaptureError> {
        if !self.settle_delay.is_zero() {
            tokio::time::sleep(self.settle_delay).await;
        }
        let chrome = ChromeHidden::new(&mut *self.map);
        let result = self.rasterizer.render_viewport(&*chrome, &self.options).await;
        drop(chrome);
        result
    }

    pub fn map(&self) -> &M {
        &*self.map
    }
}
