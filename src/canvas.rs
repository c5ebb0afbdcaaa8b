use egui::{Color32, Pos2};
use image::{Rgb, RgbImage};

use crate::config::{CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::shape::{self, PixelPos, ShapeKind};

/// The raster every drawing operation writes into.
///
/// Cloning produces an independent deep copy, which is what the undo history
/// stores as snapshots.
#[derive(Clone, PartialEq)]
pub struct Canvas {
    pixels: RgbImage,
}

impl std::fmt::Debug for Canvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Canvas")
            .field("width", &self.pixels.width())
            .field("height", &self.pixels.height())
            .finish()
    }
}

pub fn to_rgb(color: Color32) -> Rgb<u8> {
    Rgb([color.r(), color.g(), color.b()])
}

pub fn from_rgb(pixel: Rgb<u8>) -> Color32 {
    let [r, g, b] = pixel.0;
    Color32::from_rgb(r, g, b)
}

impl Canvas {
    pub fn new(width: u32, height: u32, background: Color32) -> Self {
        Self {
            pixels: RgbImage::from_pixel(width, height, to_rgb(background)),
        }
    }

    /// A canvas of the fixed application size filled with `background`.
    pub fn blank(background: Color32) -> Self {
        Self::new(CANVAS_WIDTH, CANVAS_HEIGHT, background)
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn size(&self) -> [u32; 2] {
        [self.width(), self.height()]
    }

    /// Composites one primitive onto the canvas. Anything outside the raster is clipped.
    pub fn draw_segment(&mut self, shape: ShapeKind, start: Pos2, end: Pos2, color: Color32, width: u32) {
        let size = self.size();
        let color = to_rgb(color);
        let pixels = &mut self.pixels;
        shape::rasterize(shape, PixelPos::from(start), PixelPos::from(end), width, size, |x, y| {
            pixels.put_pixel(x, y, color);
        });
    }

    /// Discards all content and reallocates the raster as a solid fill.
    pub fn replace_background(&mut self, color: Color32) {
        let [width, height] = self.size();
        self.pixels = RgbImage::from_pixel(width, height, to_rgb(color));
    }

    /// Overwrites the canvas with `source`, anchored at the origin.
    /// Parts of `source` beyond the canvas edges are dropped.
    pub fn paste_image(&mut self, source: &RgbImage) {
        image::imageops::replace(&mut self.pixels, source, 0, 0);
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Color32> {
        self.pixels.get_pixel_checked(x, y).map(|p| from_rgb(*p))
    }

    /// True when every pixel has exactly `color`.
    pub fn is_uniform(&self, color: Color32) -> bool {
        let color = to_rgb(color);
        self.pixels.pixels().all(|p| *p == color)
    }

    pub fn as_rgb_image(&self) -> &RgbImage {
        &self.pixels
    }

    /// Copy of the pixel data in the layout egui textures expect.
    pub fn to_color_image(&self) -> egui::ColorImage {
        egui::ColorImage::from_rgb(
            [self.width() as usize, self.height() as usize],
            self.pixels.as_raw(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_canvas_has_fixed_size() {
        let canvas = Canvas::blank(Color32::WHITE);
        assert_eq!(canvas.size(), [CANVAS_WIDTH, CANVAS_HEIGHT]);
        assert!(canvas.is_uniform(Color32::WHITE));
    }

    #[test]
    fn test_copy_is_independent() {
        let mut canvas = Canvas::new(40, 30, Color32::WHITE);
        let snapshot = canvas.clone();

        canvas.draw_segment(ShapeKind::Line, Pos2::new(0.0, 0.0), Pos2::new(39.0, 29.0), Color32::RED, 2);

        assert!(snapshot.is_uniform(Color32::WHITE));
        assert!(!canvas.is_uniform(Color32::WHITE));
        assert_eq!(canvas.pixel(0, 0), Some(Color32::RED));
    }

    #[test]
    fn test_out_of_bounds_segment_is_clipped() {
        let mut canvas = Canvas::new(40, 30, Color32::WHITE);
        canvas.draw_segment(ShapeKind::Oval, Pos2::new(-500.0, -500.0), Pos2::new(-10.0, -10.0), Color32::BLACK, 5);
        assert!(canvas.is_uniform(Color32::WHITE));

        canvas.draw_segment(ShapeKind::Line, Pos2::new(-50.0, 10.0), Pos2::new(500.0, 10.0), Color32::BLACK, 1);
        let painted = canvas.as_rgb_image().pixels().filter(|p| **p != to_rgb(Color32::WHITE)).count();
        assert_eq!(painted, 40);
    }

    #[test]
    fn test_replace_background_discards_content() {
        let mut canvas = Canvas::new(40, 30, Color32::WHITE);
        canvas.draw_segment(ShapeKind::Rectangle, Pos2::new(5.0, 5.0), Pos2::new(20.0, 20.0), Color32::BLACK, 3);

        canvas.replace_background(Color32::YELLOW);

        assert!(canvas.is_uniform(Color32::YELLOW));
        assert_eq!(canvas.size(), [40, 30]);
    }

    #[test]
    fn test_paste_image_overwrites_from_origin() {
        let mut canvas = Canvas::new(40, 30, Color32::WHITE);
        let source = RgbImage::from_pixel(10, 50, Rgb([0, 0, 255]));

        canvas.paste_image(&source);

        assert_eq!(canvas.pixel(0, 0), Some(Color32::BLUE));
        assert_eq!(canvas.pixel(9, 29), Some(Color32::BLUE));
        assert_eq!(canvas.pixel(10, 0), Some(Color32::WHITE));
        assert_eq!(canvas.size(), [40, 30]);
    }

    #[test]
    fn test_color_image_matches_pixels() {
        let mut canvas = Canvas::new(4, 3, Color32::WHITE);
        canvas.draw_segment(ShapeKind::Line, Pos2::new(1.0, 1.0), Pos2::new(1.0, 1.0), Color32::GREEN, 1);

        let image = canvas.to_color_image();
        assert_eq!(image.size, [4, 3]);
        assert_eq!(image.pixels[4 + 1], Color32::GREEN);
        assert_eq!(image.pixels[0], Color32::WHITE);
    }
}
