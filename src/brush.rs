use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::config::{DEFAULT_BRUSH_WIDTH, MAX_BRUSH_WIDTH, MIN_BRUSH_WIDTH};
use crate::shape::ShapeKind;

/// Color, width and shape applied to each stroke segment.
///
/// The tool reads this at the moment every segment is drawn, so changing the
/// color mid-stroke affects the remaining segments of that stroke.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrushState {
    pub color: Color32,
    pub width: u32,
    pub shape: ShapeKind,
}

impl Default for BrushState {
    fn default() -> Self {
        Self {
            color: Color32::BLACK,
            width: DEFAULT_BRUSH_WIDTH,
            shape: ShapeKind::default(),
        }
    }
}

impl BrushState {
    pub fn new(color: Color32, width: u32, shape: ShapeKind) -> Self {
        let mut brush = Self { color, width, shape };
        brush.set_width(width);
        brush
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn set_color(&mut self, color: Color32) {
        self.color = color;
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    /// Sets the stroke width, clamped to the range offered by the size slider.
    pub fn set_width(&mut self, width: u32) {
        self.width = width.clamp(MIN_BRUSH_WIDTH, MAX_BRUSH_WIDTH);
    }

    pub fn shape(&self) -> ShapeKind {
        self.shape
    }

    pub fn set_shape(&mut self, shape: ShapeKind) {
        self.shape = shape;
    }
}
