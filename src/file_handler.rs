use std::path::{Path, PathBuf};

use image::imageops::FilterType;
use image::{ImageError, ImageFormat, RgbImage};

use crate::canvas::Canvas;
use crate::error::{SketchError, SketchResult};

/// Extension appended when the user types a file name without one.
pub const DEFAULT_EXTENSION: &str = "png";

const LOADABLE_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "gif"];

/// Write the canvas to `path` in the format implied by its extension.
///
/// A path without an extension gets `.png`. Returns the path that was written.
pub fn save_canvas(canvas: &Canvas, path: &Path) -> SketchResult<PathBuf> {
    let path = if path.extension().is_some() {
        path.to_path_buf()
    } else {
        path.with_extension(DEFAULT_EXTENSION)
    };

    let format = ImageFormat::from_path(&path)
        .ok()
        .filter(|format| format.writing_enabled())
        .ok_or_else(|| SketchError::UnsupportedFormat { path: path.clone() })?;

    canvas
        .as_rgb_image()
        .save_with_format(&path, format)
        .map_err(|err| match err {
            ImageError::IoError(source) => SketchError::Io { path: path.clone(), source },
            ImageError::Unsupported(_) => SketchError::UnsupportedFormat { path: path.clone() },
            source => SketchError::Encode { path: path.clone(), source },
        })?;

    log::info!("Saved canvas to {}", path.display());
    Ok(path)
}

/// Read an image file and stretch it to exactly `size`.
pub fn load_canvas_image(path: &Path, size: [u32; 2]) -> SketchResult<RgbImage> {
    let bytes = std::fs::read(path).map_err(|source| SketchError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!("Loading image from {} ({} bytes)", path.display(), bytes.len());
    decode_canvas_image(&bytes, size).map_err(|source| SketchError::Decode {
        path: path.to_path_buf(),
        source,
    })
}

/// Decode encoded image bytes and stretch the result to exactly `size`.
///
/// Alpha is dropped before resizing, matching what a paste onto an opaque canvas shows.
pub fn decode_canvas_image(bytes: &[u8], size: [u32; 2]) -> Result<RgbImage, ImageError> {
    let decoded = image::load_from_memory(bytes)?.to_rgb8();
    log::debug!(
        "Decoded image: {}x{}, resizing to {}x{}",
        decoded.width(),
        decoded.height(),
        size[0],
        size[1]
    );
    Ok(image::imageops::resize(&decoded, size[0], size[1], FilterType::Lanczos3))
}

/// Show the native save dialog. `None` when the user cancels.
pub fn pick_save_path(start_dir: Option<&Path>) -> Option<PathBuf> {
    let mut dialog = rfd::FileDialog::new()
        .set_title("Save drawing")
        .add_filter("PNG files", &["png"])
        .add_filter("All files", &["*"]);
    if let Some(dir) = start_dir {
        dialog = dialog.set_directory(dir);
    }
    dialog.save_file()
}

/// Show the native open dialog. `None` when the user cancels.
pub fn pick_open_path(start_dir: Option<&Path>) -> Option<PathBuf> {
    let mut dialog = rfd::FileDialog::new()
        .set_title("Load image")
        .add_filter("Image files", &LOADABLE_EXTENSIONS)
        .add_filter("All files", &["*"]);
    if let Some(dir) = start_dir {
        dialog = dialog.set_directory(dir);
    }
    dialog.pick_file()
}

/// An image dropped onto the window, already stretched to the canvas size.
pub struct DroppedImage {
    pub name: String,
    pub image: RgbImage,
}

/// Watches for files dropped onto the window.
#[derive(Default)]
pub struct FileHandler {
    dropped_files: Vec<egui::DroppedFile>,
}

impl FileHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect files dropped this frame. Returns true if there are any.
    pub fn check_for_dropped_files(&mut self, ctx: &egui::Context) -> bool {
        ctx.input(|i| {
            if !i.raw.dropped_files.is_empty() {
                self.dropped_files = i.raw.dropped_files.clone();
            }
        });
        !self.dropped_files.is_empty()
    }

    /// Decode the first dropped image file.
    ///
    /// Returns `None` when nothing usable was dropped; decode failures are
    /// returned as errors so the UI can report them.
    pub fn take_dropped_image(&mut self, size: [u32; 2]) -> Option<SketchResult<DroppedImage>> {
        let files = std::mem::take(&mut self.dropped_files);
        let file = files.iter().find(|file| {
            let supported = Self::is_image_file(file);
            if !supported {
                log::warn!("Dropped file is not a supported type: {}", Self::display_name(file));
            }
            supported
        })?;

        let name = Self::display_name(file);
        let result = if let Some(bytes) = &file.bytes {
            log::info!("Processing dropped image from memory: {} ({} bytes)", name, bytes.len());
            decode_canvas_image(bytes, size).map_err(|source| SketchError::Decode {
                path: PathBuf::from(&name),
                source,
            })
        } else if let Some(path) = &file.path {
            load_canvas_image(path, size)
        } else {
            log::warn!("Dropped file has no accessible data: {}", name);
            return None;
        };

        Some(result.map(|image| DroppedImage { name, image }))
    }

    /// Check if a file is an image based on MIME type or extension
    fn is_image_file(file: &egui::DroppedFile) -> bool {
        if !file.mime.is_empty() {
            file.mime.starts_with("image/")
        } else if let Some(ext) = file.path.as_deref().and_then(Path::extension) {
            let ext = ext.to_string_lossy().to_lowercase();
            matches!(ext.as_str(), "png" | "jpg" | "jpeg" | "gif" | "webp" | "bmp")
        } else {
            false
        }
    }

    fn display_name(file: &egui::DroppedFile) -> String {
        if let Some(path) = &file.path {
            path.display().to_string()
        } else if !file.name.is_empty() {
            file.name.clone()
        } else {
            "unknown".to_owned()
        }
    }

    /// Dim the window while files are dragged over it.
    pub fn preview_files_being_dropped(&self, ctx: &egui::Context) {
        use egui::{Align2, Color32, Id, LayerId, Order, TextStyle};

        if ctx.input(|i| i.raw.hovered_files.is_empty()) {
            return;
        }

        let text = ctx.input(|i| {
            let mut text = "Drop an image to load it into the canvas:\n".to_owned();
            for file in &i.raw.hovered_files {
                if let Some(path) = &file.path {
                    text += &format!("\n{}", path.display());
                }
            }
            text
        });

        let painter = ctx.layer_painter(LayerId::new(Order::Foreground, Id::new("file_drop_target")));
        let screen_rect = ctx.screen_rect();
        painter.rect_filled(screen_rect, 0.0, Color32::from_black_alpha(192));
        painter.text(
            screen_rect.center(),
            Align2::CENTER_CENTER,
            text,
            TextStyle::Heading.resolve(&ctx.style()),
            Color32::WHITE,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dropped(name: &str, mime: &str, path: Option<&str>) -> egui::DroppedFile {
        egui::DroppedFile {
            path: path.map(PathBuf::from),
            name: name.to_owned(),
            mime: mime.to_owned(),
            ..Default::default()
        }
    }

    #[test]
    fn test_image_detection() {
        assert!(FileHandler::is_image_file(&dropped("a", "image/png", None)));
        assert!(!FileHandler::is_image_file(&dropped("a", "text/plain", Some("a.png"))));
        assert!(FileHandler::is_image_file(&dropped("", "", Some("/tmp/photo.JPG"))));
        assert!(!FileHandler::is_image_file(&dropped("", "", Some("/tmp/notes.txt"))));
        assert!(!FileHandler::is_image_file(&dropped("blob", "", None)));
    }

    #[test]
    fn test_dropped_non_images_are_ignored() {
        let mut handler = FileHandler::new();
        handler.dropped_files = vec![dropped("", "", Some("/tmp/notes.txt"))];
        assert!(handler.take_dropped_image([8, 8]).is_none());
        assert!(handler.dropped_files.is_empty());
    }

    #[test]
    fn test_dropped_bytes_are_decoded_and_resized() {
        let mut encoded = Vec::new();
        RgbImage::from_pixel(2, 2, image::Rgb([255, 0, 0]))
            .write_to(&mut std::io::Cursor::new(&mut encoded), ImageFormat::Png)
            .unwrap();

        let mut file = dropped("red.png", "image/png", None);
        file.bytes = Some(encoded.into());

        let mut handler = FileHandler::new();
        handler.dropped_files = vec![file];
        let dropped = handler.take_dropped_image([8, 4]).unwrap().unwrap();

        assert_eq!(dropped.name, "red.png");
        assert_eq!(dropped.image.dimensions(), (8, 4));
        assert_eq!(dropped.image.get_pixel(7, 3), &image::Rgb([255, 0, 0]));
    }

    #[test]
    fn test_garbage_bytes_report_decode_error() {
        let result = decode_canvas_image(b"definitely not an image", [8, 8]);
        assert!(result.is_err());
    }
}
