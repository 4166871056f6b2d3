#![allow(dead_code)]

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::time::Duration;

use fieldmaps_core::{
    capture::{RasterImage, Rasterizer, RenderOptions},
    document::{
        DashPattern, DocumentWriter, FontSpec, PageFormat, PointMm, RectMm, Stroke,
    },
    map::{HeadlessMap, MapView},
    Basemap, CaptureError, FieldMaps, FieldMapsBuilder, Result, SetView, Settings, ViewState,
};

/// What the rasterizer saw when it was asked to render.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureCall {
    pub view: ViewState,
    pub basemap: Option<Basemap>,
    pub chrome_visible: bool,
}

/// Rasterizer that records every call and can fail on the Nth one (1-based).
#[derive(Debug, Default)]
pub struct RecordingRasterizer {
    fail_on: Option<usize>,
    calls: RefCell<Vec<CaptureCall>>,
}

impl RecordingRasterizer {
    pub fn failing_on(call: usize) -> Self {
        Self {
            fail_on: Some(call),
            calls: RefCell::default(),
        }
    }

    pub fn calls(&self) -> Vec<CaptureCall> {
        self.calls.borrow().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

impl Rasterizer for RecordingRasterizer {
    async fn render_viewport<M: MapView>(
        &self,
        map: &M,
        _options: &RenderOptions,
    ) -> std::result::Result<RasterImage, CaptureError> {
        let mut calls = self.calls.borrow_mut();
        calls.push(CaptureCall {
            view: map.view(),
            basemap: map.active_layer(),
            chrome_visible: map.chrome_visible(),
        });
        if self.fail_on == Some(calls.len()) {
            return Err(CaptureError::new("tiles tainted the canvas"));
        }
        Ok(RasterImage::filled(64, 48, [200, 210, 190, 255]))
    }
}

/// Document writer that only counts what it is asked to draw.
#[derive(Debug, Default)]
pub struct RecordingWriter {
    pub documents: usize,
    pub pages: usize,
    pub images: usize,
    pub rects: usize,
    pub lines: usize,
    pub dashed_lines: usize,
    pub texts: Vec<String>,
    pub saved: Vec<PathBuf>,
    dashed: bool,
}

impl DocumentWriter for RecordingWriter {
    fn new_document(&mut self, _format: &PageFormat) -> Result<()> {
        self.documents += 1;
        self.pages = 1;
        Ok(())
    }

    fn add_page(&mut self) -> Result<()> {
        self.pages += 1;
        Ok(())
    }

    fn set_stroke(&mut self, _stroke: &Stroke) {}

    fn set_line_dash(&mut self, dash: Option<DashPattern>) {
        self.dashed = dash.is_some();
    }

    fn set_font(&mut self, _font: &FontSpec) {}

    fn draw_image(&mut self, _image: &RasterImage, _rect: &RectMm) -> Result<()> {
        self.images += 1;
        Ok(())
    }

    fn draw_rect(&mut self, _rect: &RectMm) {
        self.rects += 1;
    }

    fn draw_line(&mut self, _from: PointMm, _to: PointMm) {
        if self.dashed {
            self.dashed_lines += 1;
        } else {
            self.lines += 1;
        }
    }

    fn draw_text(&mut self, text: &str, _anchor: PointMm) {
        self.texts.push(text.to_string());
    }

    fn save(&mut self, path: &Path) -> Result<()> {
        self.saved.push(path.to_path_buf());
        Ok(())
    }
}

pub fn test_settings() -> Settings {
    Settings::default()
        .with_settle_delay(Duration::ZERO)
        .with_mark_cooldown(Duration::ZERO)
}

/// Where the map sits before any test moves it.
pub fn home_view() -> ViewState {
    ViewState::default()
}

/// Builds an app on a headless map and marks one location per entry,
/// each on its own basemap and at a distinct latitude.
pub fn app_with<R: Rasterizer>(
    rasterizer: R,
    basemaps: &[Basemap],
) -> FieldMaps<HeadlessMap, R> {
    let mut app = FieldMapsBuilder::new(HeadlessMap::default(), rasterizer)
        .with_settings(test_settings())
        .build()
        .expect("Failed to build app");
    let home = app.map().view();

    for (i, basemap) in basemaps.iter().enumerate() {
        app.switch_basemap(*basemap);
        app.set_view(&SetView {
            lat: -40.0 - i as f64,
            lng: 175.0,
            zoom: 10 + (i % 10) as u8,
        })
        .expect("Failed to set view");
        app.mark_current_view()
            .expect("Failed to mark")
            .expect("Mark was throttled");
    }

    app.switch_basemap(Basemap::LinzTopo);
    app.set_view(&SetView {
        lat: home.center.lat,
        lng: home.center.lng,
        zoom: home.zoom,
    })
    .expect("Failed to reset view");
    app
}
