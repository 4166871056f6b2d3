//! Page geometry for the two page templates.

use super::{Color, DashPattern, PageFormat, PointMm, RectMm, Stroke};

/// Raster pixels are placed at 72 per inch before fitting.
const PX_PER_INCH: f32 = 72.0;
const MM_PER_INCH: f32 = 25.4;

/// Thickness of the frame drawn around the map image.
pub const BORDER_MM: f32 = 0.3;

/// Notes rows start this far below the top margin.
const NOTES_TOP_OFFSET_MM: f32 = 25.0;
/// Notes rows stop this far above the bottom margin.
const NOTES_BOTTOM_OFFSET_MM: f32 = 10.0;
/// Grid columns end at or after `page_center - this`.
const GRID_CENTER_CLEARANCE_MM: f32 = 6.0;
/// Ruled lines start at `page_center + this`.
const RULED_CENTER_OFFSET_MM: f32 = 5.0;

pub const GRID_SPACING_MM: f32 = 5.0;
pub const RULED_SPACING_MM: f32 = 8.0;

/// Absorbs float drift when stepping across a region.
const EPSILON: f32 = 1e-3;

/// Where the image and its frame go on a capture page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaptureLayout {
    pub image_rect: RectMm,
    pub border_rect: RectMm,
    pub border_stroke: Stroke,
    /// Uniform factor applied to the image's physical size
    pub scale: f32,
}

impl CaptureLayout {
    /// Fits a `width_px` x `height_px` image inside the margins, centred.
    pub fn fit(format: &PageFormat, width_px: u32, height_px: u32) -> Self {
        let page_w = format.width();
        let page_h = format.height();
        let avail_w = page_w - format.margin_mm * 2.0 - BORDER_MM * 2.0;
        let avail_h = page_h - format.margin_mm * 2.0 - BORDER_MM * 2.0;

        let physical_w = px_to_mm(width_px);
        let physical_h = px_to_mm(height_px);
        let scale = if physical_w > 0.0 && physical_h > 0.0 {
            (avail_w / physical_w).min(avail_h / physical_h)
        } else {
            0.0
        };

        let scaled_w = physical_w * scale;
        let scaled_h = physical_h * scale;
        let image_rect = RectMm::new(
            (page_w - scaled_w) / 2.0,
            (page_h - scaled_h) / 2.0,
            scaled_w,
            scaled_h,
        );

        Self {
            image_rect,
            border_rect: image_rect.expand(BORDER_MM),
            border_stroke: Stroke {
                width_mm: BORDER_MM,
                color: Color::BLACK,
            },
            scale,
        }
    }
}

fn px_to_mm(px: u32) -> f32 {
    px as f32 / PX_PER_INCH * MM_PER_INCH
}

/// Number of whole `spacing` steps that fit in `span`.
fn steps(span: f32, spacing: f32) -> u32 {
    ((span + EPSILON) / spacing).floor().max(0.0) as u32
}

/// Faint dashed square grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridRegion {
    pub bounds: RectMm,
    pub spacing: f32,
    pub stroke: Stroke,
    pub dash: DashPattern,
}

impl GridRegion {
    /// Lines at every `spacing` across the bounds, edges included.
    pub fn horizontal_lines(&self) -> Vec<(PointMm, PointMm)> {
        (0..=steps(self.bounds.height, self.spacing))
            .map(|i| {
                let y = self.bounds.y + i as f32 * self.spacing;
                (
                    PointMm::new(self.bounds.x, y),
                    PointMm::new(self.bounds.right(), y),
                )
            })
            .collect()
    }

    pub fn vertical_lines(&self) -> Vec<(PointMm, PointMm)> {
        (0..=steps(self.bounds.width, self.spacing))
            .map(|i| {
                let x = self.bounds.x + i as f32 * self.spacing;
                (
                    PointMm::new(x, self.bounds.y),
                    PointMm::new(x, self.bounds.bottom()),
                )
            })
            .collect()
    }
}

/// Solid horizontal writing lines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RuledRegion {
    pub bounds: RectMm,
    pub spacing: f32,
    pub stroke: Stroke,
}

impl RuledRegion {
    pub fn lines(&self) -> Vec<(PointMm, PointMm)> {
        (0..=steps(self.bounds.height, self.spacing))
            .map(|i| {
                let y = self.bounds.y + i as f32 * self.spacing;
                (
                    PointMm::new(self.bounds.x, y),
                    PointMm::new(self.bounds.right(), y),
                )
            })
            .collect()
    }
}

/// Splits the content area at the page centre into grid and ruled halves.
///
/// The grid snaps to whole cells so its outer lines close the square, and
/// its right edge always stays left of the ruled half.
pub fn notes_regions(format: &PageFormat) -> (GridRegion, RuledRegion) {
    let margin = format.margin_mm;
    let top = margin + NOTES_TOP_OFFSET_MM;
    let bottom = format.height() - margin - NOTES_BOTTOM_OFFSET_MM;
    let center = format.width() / 2.0;
    let ruled_left = center + RULED_CENTER_OFFSET_MM;

    let columns = ((center - GRID_CENTER_CLEARANCE_MM - margin) / GRID_SPACING_MM - EPSILON)
        .ceil()
        .max(1.0);
    let grid_right = (margin + columns * GRID_SPACING_MM).min(ruled_left - GRID_SPACING_MM / 2.0);
    let rows = steps(bottom - top, GRID_SPACING_MM);

    let grid = GridRegion {
        bounds: RectMm::new(
            margin,
            top,
            grid_right - margin,
            rows as f32 * GRID_SPACING_MM,
        ),
        spacing: GRID_SPACING_MM,
        stroke: Stroke {
            width_mm: 0.05,
            color: Color::rgb(230, 230, 230),
        },
        dash: DashPattern {
            dash_mm: 0.5,
            gap_mm: 0.5,
        },
    };

    let ruled = RuledRegion {
        bounds: RectMm::new(
            ruled_left,
            top,
            format.width() - margin - ruled_left,
            bottom - top,
        ),
        spacing: RULED_SPACING_MM,
        stroke: Stroke {
            width_mm: 0.3,
            color: Color::BLACK,
        },
    };

    (grid, ruled)
}
