use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::brush::BrushState;

/// Fixed canvas width in pixels.
pub const CANVAS_WIDTH: u32 = 800;
/// Fixed canvas height in pixels.
pub const CANVAS_HEIGHT: u32 = 500;

pub const MIN_BRUSH_WIDTH: u32 = 1;
pub const MAX_BRUSH_WIDTH: u32 = 10;
pub const DEFAULT_BRUSH_WIDTH: u32 = 3;

pub const WINDOW_TITLE: &str = "Drawing App with Image Loading and Drawing";

/// User preferences restored between sessions.
///
/// The canvas content is deliberately absent: only the brush and a few
/// session conveniences are kept in eframe storage.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct Settings {
    pub brush: BrushState,
    /// Maximum number of undo snapshots, `None` keeps every snapshot.
    pub history_limit: Option<usize>,
    /// Directory the last file dialog ended in.
    pub last_directory: Option<PathBuf>,
}

impl Settings {
    /// Restore settings from eframe storage, falling back to defaults.
    pub fn load(storage: Option<&dyn eframe::Storage>) -> Self {
        let settings: Self = storage
            .and_then(|storage| eframe::get_value(storage, eframe::APP_KEY))
            .unwrap_or_default();
        log::debug!("Loaded settings: {:?}", settings);
        settings.sanitized()
    }

    pub fn store(&self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, self);
    }

    /// Clamp values that may have been edited by hand or written by an older build.
    pub fn sanitized(mut self) -> Self {
        self.brush.set_width(self.brush.width);
        if self.history_limit == Some(0) {
            self.history_limit = None;
        }
        self
    }

    /// Remember the parent directory of a path picked in a dialog.
    pub fn remember_directory(&mut self, path: &std::path::Path) {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                self.last_directory = Some(parent.to_path_buf());
            }
        }
    }
}
