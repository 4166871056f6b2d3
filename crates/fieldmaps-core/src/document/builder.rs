//! Turns marked locations and their captures into pages.

use serde::Serialize;

use super::{
    layout::notes_regions, CaptureLayout, CapturePage, Color, Document, FontFamily, FontSpec,
    NotesPage, Page, PageFormat, PointMm, TextLine,
};
use crate::{capture::RasterImage, models::MarkedLocation};

/// Title baseline sits this far below the top margin.
const TITLE_OFFSET_MM: f32 = 5.0;
/// Subtitle baseline sits this far below the title baseline.
const SUBTITLE_GAP_MM: f32 = 6.0;

const TITLE_FONT: FontSpec = FontSpec {
    family: FontFamily::Times,
    size_pt: 16.0,
    color: Color::rgb(41, 41, 41),
};

const SUBTITLE_FONT: FontSpec = FontSpec {
    family: FontFamily::Times,
    size_pt: 10.0,
    color: Color::rgb(90, 74, 58),
};

/// Export progress: page `current` of `total`, both 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub current: usize,
    pub total: usize,
}

/// Lays out capture and notes pages for one page format.
#[derive(Debug, Clone, Copy)]
pub struct DocumentBuilder {
    format: PageFormat,
}

impl DocumentBuilder {
    pub fn new(format: PageFormat) -> Self {
        Self { format }
    }

    pub fn format(&self) -> &PageFormat {
        &self.format
    }

    /// Pages an export of `locations` produces: one each, plus notes pages.
    pub fn total_pages<'a>(locations: impl IntoIterator<Item = &'a MarkedLocation>) -> usize {
        locations
            .into_iter()
            .map(|l| 1 + usize::from(l.include_notes))
            .sum()
    }

    /// An empty document in this builder's format.
    pub fn start(&self) -> Document {
        Document::new(self.format)
    }

    /// The screenshot page for `location`.
    pub fn capture_page(&self, location: &MarkedLocation, image: RasterImage) -> Page {
        let layout = CaptureLayout::fit(&self.format, image.width(), image.height());
        let center_x = self.format.width() / 2.0;
        let title_y = self.format.margin_mm + TITLE_OFFSET_MM;

        Page::Capture(CapturePage {
            location_id: location.id,
            image,
            layout,
            title: TextLine {
                text: location.name.to_uppercase(),
                anchor: PointMm::new(center_x, title_y),
                font: TITLE_FONT,
            },
            subtitle: TextLine {
                text: location.coordinates_text(),
                anchor: PointMm::new(center_x, title_y + SUBTITLE_GAP_MM),
                font: SUBTITLE_FONT,
            },
        })
    }

    /// The blank notes page that follows `location`'s capture page.
    pub fn notes_page(&self, location: &MarkedLocation) -> Page {
        let (grid, ruled) = notes_regions(&self.format);
        Page::Notes(NotesPage {
            location_id: location.id,
            grid,
            ruled,
        })
    }

    /// Appends every page `location` contributes and returns how many.
    pub fn append(
        &self,
        document: &mut Document,
        location: &MarkedLocation,
        image: RasterImage,
    ) -> usize {
        document.push(self.capture_page(location, image));
        if location.include_notes {
            document.push(self.notes_page(location));
            2
        } else {
            1
        }
    }

    /// Builds a whole document from already captured images, in order.
    pub fn build<'a>(
        &self,
        captures: impl IntoIterator<Item = (&'a MarkedLocation, RasterImage)>,
    ) -> Document {
        let mut document = self.start();
        for (location, image) in captures {
            self.append(&mut document, location, image);
        }
        document
    }
}

impl Default for DocumentBuilder {
    fn default() -> Self {
        Self::new(PageFormat::default())
    }
}
