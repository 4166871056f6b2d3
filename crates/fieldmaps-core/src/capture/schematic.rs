//! Tile-free rasterizer.
//!
//! Draws what a viewport capture would frame without fetching any tiles: a
//! basemap-tinted background, a graticule at the current zoom, a crosshair on
//! the centre, and grey blocks where the chrome sits when it is visible.

use image::{Rgba, RgbaImage};

use super::{RasterImage, Rasterizer, RenderOptions};
use crate::{error::CaptureError, map::MapView, models::Basemap};

/// Web Mercator tile size in pixels.
const TILE_SIZE: f64 = 256.0;

/// Target on-screen spacing of graticule lines in pixels.
const GRATICULE_TARGET_PX: f64 = 120.0;

/// Largest image a single capture may allocate, in pixels.
const MAX_CAPTURE_PIXELS: u64 = 8192 * 8192;

const CROSSHAIR: Rgba<u8> = Rgba([200, 30, 30, 255]);
const CHROME: Rgba<u8> = Rgba([120, 120, 120, 255]);

#[derive(Debug, Clone, Copy, Default)]
pub struct SchematicRasterizer;

fn background(basemap: Option<Basemap>) -> (Rgba<u8>, Rgba<u8>) {
    match basemap {
        Some(Basemap::LinzTopo) => (Rgba([241, 236, 214, 255]), Rgba([196, 168, 120, 255])),
        Some(Basemap::OpenStreetMap) => (Rgba([242, 239, 233, 255]), Rgba([170, 170, 170, 255])),
        Some(Basemap::LinzAerial) => (Rgba([74, 92, 68, 255]), Rgba([150, 170, 140, 255])),
        None => (Rgba([255, 255, 255, 255]), Rgba([200, 200, 200, 255])),
    }
}

/// Picks a 1/2/5 x 10^n degree step near the target pixel spacing.
fn graticule_step(degrees_per_px: f64) -> f64 {
    let raw = degrees_per_px * GRATICULE_TARGET_PX;
    let magnitude = 10f64.powf(raw.log10().floor());
    [1.0, 2.0, 5.0, 10.0]
        .into_iter()
        .map(|m| m * magnitude)
        .find(|step| *step >= raw)
        .unwrap_or(10.0 * magnitude)
}

fn fill_rect(image: &mut RgbaImage, x0: u32, y0: u32, w: u32, h: u32, color: Rgba<u8>) {
    for y in y0..(y0 + h).min(image.height()) {
        for x in x0..(x0 + w).min(image.width()) {
            image.put_pixel(x, y, color);
        }
    }
}

impl Rasterizer for SchematicRasterizer {
    async fn render_viewport<M: MapView>(
        &self,
        map: &M,
        options: &RenderOptions,
    ) -> Result<RasterImage, CaptureError> {
        let (css_w, css_h) = map.viewport_size();
        if css_w == 0 || css_h == 0 {
            return Err(CaptureError::new("map viewport has zero size"));
        }
        if !(options.scale.is_finite() && options.scale > 0.0) {
            return Err(CaptureError::new(format!(
                "invalid render scale {}",
                options.scale
            )));
        }

        let scale = f64::from(options.scale);
        let (width, height) = (
            (f64::from(css_w) * scale).round(),
            (f64::from(css_h) * scale).round(),
        );
        if width * height > MAX_CAPTURE_PIXELS as f64 {
            return Err(CaptureError::new(format!(
                "capture of {width}x{height} px exceeds the {MAX_CAPTURE_PIXELS} pixel limit"
            )));
        }
        let (width, height) = (width as u32, height as u32);
        let (paper, ink) = background(map.active_layer());
        let mut image = RgbaImage::from_pixel(width, height, paper);

        let center = map.center();
        let world_px = TILE_SIZE * 2f64.powi(i32::from(map.zoom())) * scale;
        let lng_per_px = 360.0 / world_px;
        let lat_per_px = lng_per_px * center.lat.to_radians().cos().abs().max(0.01);
        let half_w = f64::from(width) / 2.0;
        let half_h = f64::from(height) / 2.0;

        let lng_step = graticule_step(lng_per_px);
        let west = center.lng - half_w * lng_per_px;
        let mut lng = (west / lng_step).ceil() * lng_step;
        while lng <= center.lng + half_w * lng_per_px {
            let x = ((lng - west) / lng_per_px).round() as u32;
            fill_rect(&mut image, x, 0, 1, height, ink);
            lng += lng_step;
        }

        let lat_step = graticule_step(lat_per_px);
        let north = center.lat + half_h * lat_per_px;
        let mut lat = (north / lat_step).floor() * lat_step;
        while lat >= center.lat - half_h * lat_per_px {
            let y = ((north - lat) / lat_per_px).round() as u32;
            fill_rect(&mut image, 0, y, width, 1, ink);
            lat -= lat_step;
        }

        let arm = (12.0 * scale) as u32;
        let (cx, cy) = (width / 2, height / 2);
        fill_rect(&mut image, cx.saturating_sub(arm), cy, arm * 2 + 1, 1, CROSSHAIR);
        fill_rect(&mut image, cx, cy.saturating_sub(arm), 1, arm * 2 + 1, CROSSHAIR);

        if map.chrome_visible() {
            let unit = (10.0 * scale) as u32;
            // zoom control, basemap control, attribution
            fill_rect(&mut image, unit, unit, unit * 3, unit * 6, CHROME);
            fill_rect(&mut image, width.saturating_sub(unit * 4), unit, unit * 3, unit * 9, CHROME);
            fill_rect(
                &mut image,
                width.saturating_sub(unit * 20),
                height.saturating_sub(unit * 2),
                unit * 20,
                unit * 2,
                CHROME,
            );
        }

        Ok(RasterImage::new(image))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::{BasemapSwitch, HeadlessMap};
    use crate::models::ViewState;

    #[test]
    fn test_graticule_step_rounds_to_nice_values() {
        assert!((graticule_step(0.001) - 0.2).abs() < 1e-12);
        assert!((graticule_step(0.0004) - 0.05).abs() < 1e-12);
    }

    #[tokio::test]
    async fn test_hidden_chrome_is_not_drawn() {
        let mut map = HeadlessMap::new(ViewState::default(), (300, 200));
        BasemapSwitch::attach(&mut map, Basemap::LinzAerial);
        let options = RenderOptions {
            scale: 1.0,
            cross_origin: true,
        };

        let with_chrome = SchematicRasterizer
            .render_viewport(&map, &options)
            .await
            .unwrap();
        assert_eq!(with_chrome.pixels().get_pixel(15, 15), &CHROME);

        map.set_chrome_visible(false);
        let without_chrome = SchematicRasterizer
            .render_viewport(&map, &options)
            .await
            .unwrap();
        assert_ne!(without_chrome.pixels().get_pixel(15, 15), &CHROME);
    }

    #[tokio::test]
    async fn test_zero_sized_viewport_fails() {
        let map = HeadlessMap::new(ViewState::default(), (0, 0));
        let err = SchematicRasterizer
            .render_viewport(&map, &RenderOptions::default())
            .await
            .unwrap_err();
        assert!(err.message.contains("zero size"));
    }

    #[tokio::test]
    async fn test_oversized_capture_fails_before_allocating() {
        let map = HeadlessMap::new(ViewState::default(), (50_000, 50_000));
        let err = SchematicRasterizer
            .render_viewport(&map, &RenderOptions::default())
            .await
            .unwrap_err();
        assert!(err.message.contains("pixel limit"));
    }
}
