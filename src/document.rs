use std::path::{Path, PathBuf};

use egui::{Color32, Pos2};
use image::RgbImage;

use crate::canvas::Canvas;
use crate::command::SnapshotHistory;
use crate::error::SketchResult;
use crate::file_handler;
use crate::shape::ShapeKind;

/// The drawing session: current canvas, its history and background color.
///
/// `revision` increases on every pixel change so the display surface knows
/// when to re-upload its texture.
#[derive(Debug)]
pub struct Document {
    canvas: Canvas,
    history: SnapshotHistory,
    background: Color32,
    revision: u64,
}

impl Default for Document {
    fn default() -> Self {
        Self::new(Color32::WHITE, None)
    }
}

impl Document {
    pub fn new(background: Color32, history_limit: Option<usize>) -> Self {
        Self::with_canvas(Canvas::blank(background), background, history_limit)
    }

    /// Wraps an existing canvas, mostly useful for small canvases in tests.
    pub fn with_canvas(canvas: Canvas, background: Color32, history_limit: Option<usize>) -> Self {
        Self {
            canvas,
            history: SnapshotHistory::with_limit(history_limit),
            background,
            revision: 0,
        }
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn history(&self) -> &SnapshotHistory {
        &self.history
    }

    pub fn background(&self) -> Color32 {
        self.background
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Snapshot the canvas at the start of a stroke.
    pub fn begin_stroke(&mut self) {
        self.history.record_for_undo(&self.canvas);
        log::debug!("Stroke started, undo depth {}", self.history.undo_depth());
    }

    pub fn draw_segment(&mut self, shape: ShapeKind, start: Pos2, end: Pos2, color: Color32, width: u32) {
        self.canvas.draw_segment(shape, start, end, color, width);
        self.touch();
    }

    pub fn undo(&mut self) -> bool {
        let changed = self.history.undo_once(&mut self.canvas);
        if changed {
            self.touch();
            log::debug!(
                "Undo: {} undo / {} redo left",
                self.history.undo_depth(),
                self.history.redo_depth()
            );
        }
        changed
    }

    pub fn redo(&mut self) -> bool {
        let changed = self.history.redo_once(&mut self.canvas);
        if changed {
            self.touch();
            log::debug!(
                "Redo: {} undo / {} redo left",
                self.history.undo_depth(),
                self.history.redo_depth()
            );
        }
        changed
    }

    /// Fill the canvas with the background color and forget all history.
    pub fn clear(&mut self) {
        self.canvas.replace_background(self.background);
        self.history.reset();
        self.touch();
    }

    /// Switch to a new background; like `clear`, this drops content and history.
    pub fn set_background(&mut self, color: Color32) {
        self.background = color;
        self.clear();
    }

    /// Paste a canvas-sized image over the current content.
    ///
    /// History is left as is, so the paste itself cannot be undone.
    pub fn replace_with_image(&mut self, image: &RgbImage) {
        self.canvas.paste_image(image);
        self.touch();
    }

    /// Load an image file into the canvas. On error the canvas is unchanged.
    pub fn load_from(&mut self, path: &Path) -> SketchResult<()> {
        let image = file_handler::load_canvas_image(path, self.canvas.size())?;
        self.replace_with_image(&image);
        Ok(())
    }

    /// Write the canvas to `path`, returning the path actually written.
    pub fn save_to(&self, path: &Path) -> SketchResult<PathBuf> {
        file_handler::save_canvas(&self.canvas, path)
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}
