//! Paginated document model.
//!
//! A [`Document`] is an ordered list of [`Page`]s whose geometry is already
//! resolved in millimetres from the top-left corner of the page. Building a
//! document ([`DocumentBuilder`]) and serializing one ([`DocumentWriter`])
//! are separate steps, so the layout can be checked without producing a file.

mod builder;
mod layout;
mod pdf;
mod writer;

use serde::{Deserialize, Serialize};

pub use builder::{DocumentBuilder, Progress};
pub use layout::{CaptureLayout, GridRegion, RuledRegion};
pub use pdf::PdfWriter;
pub use writer::DocumentWriter;

use crate::{capture::RasterImage, models::LocationId};

/// Page size and outer margin shared by every page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageFormat {
    pub width_mm: f32,
    pub height_mm: f32,
    pub margin_mm: f32,
}

impl PageFormat {
    pub fn width(&self) -> f32 {
        self.width_mm
    }

    pub fn height(&self) -> f32 {
        self.height_mm
    }
}

impl Default for PageFormat {
    /// A4 landscape with a 20 mm margin.
    fn default() -> Self {
        Self {
            width_mm: 297.0,
            height_mm: 210.0,
            margin_mm: 20.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointMm {
    pub x: f32,
    pub y: f32,
}

impl PointMm {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle; `x`/`y` is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectMm {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl RectMm {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Grows the rectangle by `amount` on every side.
    pub fn expand(&self, amount: f32) -> Self {
        Self::new(
            self.x - amount,
            self.y - amount,
            self.width + amount * 2.0,
            self.height + amount * 2.0,
        )
    }

    /// Whether `other` lies entirely inside this rectangle.
    pub fn contains(&self, other: &RectMm) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Line width and colour for stroked paths.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub width_mm: f32,
    pub color: Color,
}

/// On/off lengths of a dashed line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DashPattern {
    pub dash_mm: f32,
    pub gap_mm: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontFamily {
    Times,
    Helvetica,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontSpec {
    pub family: FontFamily,
    pub size_pt: f32,
    pub color: Color,
}

/// A single line of text centred on its anchor, which sits on the baseline.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub text: String,
    pub anchor: PointMm,
    pub font: FontSpec,
}

/// Map screenshot with a bordered frame and a title block.
#[derive(Debug, Clone, PartialEq)]
pub struct CapturePage {
    pub location_id: LocationId,
    pub image: RasterImage,
    pub layout: CaptureLayout,
    pub title: TextLine,
    pub subtitle: TextLine,
}

/// Blank field-notes page: dashed grid on the left, ruled lines on the right.
#[derive(Debug, Clone, PartialEq)]
pub struct NotesPage {
    pub location_id: LocationId,
    pub grid: GridRegion,
    pub ruled: RuledRegion,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Page {
    Capture(CapturePage),
    Notes(NotesPage),
}

impl Page {
    pub fn location_id(&self) -> LocationId {
        match self {
            Page::Capture(page) => page.location_id,
            Page::Notes(page) => page.location_id,
        }
    }

    pub fn is_notes(&self) -> bool {
        matches!(self, Page::Notes(_))
    }
}

/// Ordered pages sharing one format. Built fresh for every export.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub format: PageFormat,
    pages: Vec<Page>,
}

impl Document {
    pub fn new(format: PageFormat) -> Self {
        Self {
            format,
            pages: Vec::new(),
        }
    }

    pub fn push(&mut self, page: Page) {
        self.pages.push(page);
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}
