//! PDF output through `printpdf`.
//!
//! Layout coordinates are top-left based; PDF user space is bottom-left, so
//! every y coordinate is flipped against the page height on the way out.

use std::collections::HashMap;
use std::io::{BufWriter, Write};
use std::path::Path;

use log::{debug, warn};
use printpdf::{
    BuiltinFont, ColorBits, ColorSpace, Image, ImageTransform, ImageXObject, IndirectFontRef,
    Line, LineDashPattern, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference, Point, Px,
    Rgb,
};
use tempfile::NamedTempFile;

use super::{
    writer::DocumentWriter, Color, DashPattern, FontFamily, FontSpec, PageFormat, PointMm, RectMm,
    Stroke,
};
use crate::{
    capture::RasterImage,
    error::{FieldMapsError, IoResultExt, Result},
};

const MM_PER_INCH: f32 = 25.4;
const PT_PER_MM: f32 = 72.0 / MM_PER_INCH;
const LAYER_NAME: &str = "Layer 1";

struct OpenDocument {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    format: PageFormat,
    fonts: HashMap<FontFamily, IndirectFontRef>,
    font: Option<(FontFamily, f32)>,
}

impl OpenDocument {
    fn flip(&self, y: f32) -> Mm {
        Mm(self.format.height() - y)
    }

    fn point(&self, p: PointMm) -> Point {
        Point::new(Mm(p.x), self.flip(p.y))
    }
}

/// [`DocumentWriter`] producing a PDF file.
pub struct PdfWriter {
    title: String,
    open: Option<OpenDocument>,
}

impl PdfWriter {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            open: None,
        }
    }

    fn open(&mut self) -> Result<&mut OpenDocument> {
        self.open
            .as_mut()
            .ok_or_else(|| FieldMapsError::document("no document open"))
    }
}

impl Default for PdfWriter {
    fn default() -> Self {
        Self::new("Field Maps")
    }
}

fn pdf_color(color: Color) -> printpdf::Color {
    printpdf::Color::Rgb(Rgb::new(
        f32::from(color.r) / 255.0,
        f32::from(color.g) / 255.0,
        f32::from(color.b) / 255.0,
        None,
    ))
}

fn builtin(family: FontFamily) -> BuiltinFont {
    match family {
        FontFamily::Times => BuiltinFont::TimesRoman,
        FontFamily::Helvetica => BuiltinFont::Helvetica,
    }
}

/// Rough advance width of `text`; builtin fonts carry no metrics here.
fn approx_text_width_mm(text: &str, family: FontFamily, size_pt: f32) -> f32 {
    let em: f32 = text
        .chars()
        .map(|c| match (family, c) {
            (_, ' ') => 0.25,
            (_, '.' | ',' | ':' | ';' | '\'') => 0.25,
            (_, '-') => 0.33,
            (_, '0'..='9') => 0.5,
            (FontFamily::Times, c) if c.is_uppercase() => 0.69,
            (FontFamily::Helvetica, c) if c.is_uppercase() => 0.68,
            (FontFamily::Times, _) => 0.46,
            (FontFamily::Helvetica, _) => 0.52,
        })
        .sum();
    em * size_pt / PT_PER_MM
}

impl DocumentWriter for PdfWriter {
    fn new_document(&mut self, format: &PageFormat) -> Result<()> {
        let (doc, page, layer) = PdfDocument::new(
            self.title.as_str(),
            Mm(format.width()),
            Mm(format.height()),
            LAYER_NAME,
        );
        let layer = doc.get_page(page).get_layer(layer);
        self.open = Some(OpenDocument {
            doc,
            layer,
            format: *format,
            fonts: HashMap::new(),
            font: None,
        });
        Ok(())
    }

    fn add_page(&mut self) -> Result<()> {
        let open = self.open()?;
        let (page, layer) = open.doc.add_page(
            Mm(open.format.width()),
            Mm(open.format.height()),
            LAYER_NAME,
        );
        open.layer = open.doc.get_page(page).get_layer(layer);
        Ok(())
    }

    fn set_stroke(&mut self, stroke: &Stroke) {
        if let Some(open) = self.open.as_mut() {
            open.layer.set_outline_color(pdf_color(stroke.color));
            open.layer.set_outline_thickness(stroke.width_mm * PT_PER_MM);
        }
    }

    fn set_line_dash(&mut self, dash: Option<DashPattern>) {
        let Some(open) = self.open.as_mut() else {
            return;
        };
        let pattern = match dash {
            Some(dash) => LineDashPattern {
                dash_1: Some(((dash.dash_mm * PT_PER_MM).round() as i64).max(1)),
                gap_1: Some(((dash.gap_mm * PT_PER_MM).round() as i64).max(1)),
                ..Default::default()
            },
            None => LineDashPattern::default(),
        };
        open.layer.set_line_dash_pattern(pattern);
    }

    fn set_font(&mut self, font: &FontSpec) {
        if let Some(open) = self.open.as_mut() {
            open.layer.set_fill_color(pdf_color(font.color));
            open.font = Some((font.family, font.size_pt));
        }
    }

    fn draw_image(&mut self, image: &RasterImage, rect: &RectMm) -> Result<()> {
        let open = self.open()?;
        if rect.width <= 0.0 || image.width() == 0 {
            return Err(FieldMapsError::document("cannot place an empty image"));
        }
        let rgb = image.to_rgb();
        let (width, height) = rgb.dimensions();
        let xobject = ImageXObject {
            width: Px(width as usize),
            height: Px(height as usize),
            color_space: ColorSpace::Rgb,
            bits_per_component: ColorBits::Bit8,
            interpolate: true,
            image_data: rgb.into_raw(),
            image_filter: None,
            clipping_bbox: None,
            smask: None,
        };
        let dpi = width as f32 / (rect.width / MM_PER_INCH);
        Image::from(xobject).add_to_layer(
            open.layer.clone(),
            ImageTransform {
                translate_x: Some(Mm(rect.x)),
                translate_y: Some(open.flip(rect.bottom())),
                dpi: Some(dpi),
                ..Default::default()
            },
        );
        Ok(())
    }

    fn draw_rect(&mut self, rect: &RectMm) {
        if let Some(open) = self.open.as_ref() {
            let corners = [
                PointMm::new(rect.x, rect.y),
                PointMm::new(rect.right(), rect.y),
                PointMm::new(rect.right(), rect.bottom()),
                PointMm::new(rect.x, rect.bottom()),
            ];
            open.layer.add_line(Line {
                points: corners.iter().map(|p| (open.point(*p), false)).collect(),
                is_closed: true,
            });
        }
    }

    fn draw_line(&mut self, from: PointMm, to: PointMm) {
        if let Some(open) = self.open.as_ref() {
            open.layer.add_line(Line {
                points: vec![(open.point(from), false), (open.point(to), false)],
                is_closed: false,
            });
        }
    }

    fn draw_text(&mut self, text: &str, anchor: PointMm) {
        let Some(open) = self.open.as_mut() else {
            return;
        };
        let (family, size) = open.font.unwrap_or((FontFamily::Helvetica, 12.0));
        let font = match open.fonts.get(&family) {
            Some(font) => font.clone(),
            None => match open.doc.add_builtin_font(builtin(family)) {
                Ok(font) => {
                    open.fonts.insert(family, font.clone());
                    font
                }
                Err(e) => {
                    warn!("Failed to load builtin font {family:?}: {e}");
                    return;
                }
            },
        };
        let x = anchor.x - approx_text_width_mm(text, family, size) / 2.0;
        open.layer
            .use_text(text, size, Mm(x), open.flip(anchor.y), &font);
    }

    fn save(&mut self, path: &Path) -> Result<()> {
        let open = self
            .open
            .take()
            .ok_or_else(|| FieldMapsError::document("no document open"))?;
        // Written beside the target and renamed into place, so a failed
        // write never leaves a truncated PDF behind.
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut partial = NamedTempFile::new_in(dir).fs_context(dir)?;
        {
            let mut writer = BufWriter::new(partial.as_file_mut());
            open.doc
                .save(&mut writer)
                .map_err(|e| FieldMapsError::document(format!("Failed to write PDF: {e}")))?;
            writer.flush().fs_context(path)?;
        }
        partial.persist(path).map_err(|e| e.error).fs_context(path)?;
        debug!("Wrote {}", path.display());
        Ok(())
    }
}
