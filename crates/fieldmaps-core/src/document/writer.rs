//! Document writer collaborator and page serialization.

use std::path::Path;

use super::{
    CapturePage, DashPattern, Document, FontSpec, NotesPage, Page, PageFormat, PointMm, RectMm,
    Stroke, TextLine,
};
use crate::{capture::RasterImage, error::Result};

/// Drawing surface for paginated output.
///
/// Mirrors an immediate-mode PDF API: the first page exists as soon as the
/// document does, later pages are added explicitly, and stroke/font/dash
/// settings persist until changed.
pub trait DocumentWriter {
    fn new_document(&mut self, format: &PageFormat) -> Result<()>;

    fn add_page(&mut self) -> Result<()>;

    fn set_stroke(&mut self, stroke: &Stroke);

    /// `None` switches back to solid lines.
    fn set_line_dash(&mut self, dash: Option<DashPattern>);

    fn set_font(&mut self, font: &FontSpec);

    fn draw_image(&mut self, image: &RasterImage, rect: &RectMm) -> Result<()>;

    /// Strokes (never fills) a rectangle with the current stroke.
    fn draw_rect(&mut self, rect: &RectMm);

    fn draw_line(&mut self, from: PointMm, to: PointMm);

    /// Draws `text` centred horizontally on `anchor`.
    fn draw_text(&mut self, text: &str, anchor: PointMm);

    fn save(&mut self, path: &Path) -> Result<()>;
}

impl Document {
    /// Replays every page onto `writer`. Does not save.
    pub fn write_to<W: DocumentWriter>(&self, writer: &mut W) -> Result<()> {
        writer.new_document(&self.format)?;
        for (index, page) in self.pages().iter().enumerate() {
            if index > 0 {
                writer.add_page()?;
            }
            page.write_to(writer)?;
        }
        Ok(())
    }
}

impl Page {
    /// Draws this page onto the writer's current page.
    pub fn write_to<W: DocumentWriter>(&self, writer: &mut W) -> Result<()> {
        match self {
            Page::Capture(capture) => write_capture(writer, capture),
            Page::Notes(notes) => {
                write_notes(writer, notes);
                Ok(())
            }
        }
    }
}

fn write_text<W: DocumentWriter>(writer: &mut W, line: &TextLine) {
    writer.set_font(&line.font);
    writer.draw_text(&line.text, line.anchor);
}

fn write_capture<W: DocumentWriter>(writer: &mut W, page: &CapturePage) -> Result<()> {
    writer.set_line_dash(None);
    writer.set_stroke(&page.layout.border_stroke);
    writer.draw_rect(&page.layout.border_rect);
    writer.draw_image(&page.image, &page.layout.image_rect)?;
    write_text(writer, &page.title);
    write_text(writer, &page.subtitle);
    Ok(())
}

fn write_notes<W: DocumentWriter>(writer: &mut W, page: &NotesPage) {
    writer.set_stroke(&page.grid.stroke);
    writer.set_line_dash(Some(page.grid.dash));
    for (from, to) in page
        .grid
        .horizontal_lines()
        .into_iter()
        .chain(page.grid.vertical_lines())
    {
        writer.draw_line(from, to);
    }

    writer.set_line_dash(None);
    writer.set_stroke(&page.ruled.stroke);
    for (from, to) in page.ruled.lines() {
        writer.draw_line(from, to);
    }
}
