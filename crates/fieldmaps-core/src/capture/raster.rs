//! Raster image produced by a viewport capture.

use image::{Rgb, RgbImage, Rgba, RgbaImage};

/// Pixels captured from the map viewport.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterImage {
    pixels: RgbaImage,
}

impl RasterImage {
    pub fn new(pixels: RgbaImage) -> Self {
        Self { pixels }
    }

    /// A single-colour image, handy for tests and placeholders.
    pub fn filled(width: u32, height: u32, color: [u8; 4]) -> Self {
        Self::new(RgbaImage::from_pixel(width, height, Rgba(color)))
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Flattens onto a white background, dropping alpha.
    pub fn to_rgb(&self) -> RgbImage {
        let mut rgb = RgbImage::new(self.width(), self.height());
        for (x, y, pixel) in self.pixels.enumerate_pixels() {
            let Rgba([r, g, b, a]) = *pixel;
            let alpha = f32::from(a) / 255.0;
            let blend = |c: u8| (f32::from(c) * alpha + 255.0 * (1.0 - alpha)).round() as u8;
            rgb.put_pixel(x, y, Rgb([blend(r), blend(g), blend(b)]));
        }
        rgb
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_rgb_blends_transparent_pixels_with_white() {
        let image = RasterImage::filled(2, 1, [0, 0, 0, 0]);
        assert_eq!(image.to_rgb().get_pixel(0, 0), &Rgb([255, 255, 255]));

        let opaque = RasterImage::filled(1, 1, [10, 20, 30, 255]);
        assert_eq!(opaque.to_rgb().get_pixel(0, 0), &Rgb([10, 20, 30]));
    }
}
