use eframe::egui::{self, Color32, TextureHandle, TextureOptions};

use crate::document::Document;

const CANVAS_TEXTURE_NAME: &str = "sketch_canvas";

/// Shows the document's canvas as an egui texture.
///
/// The texture is only re-uploaded when the document revision moves.
#[derive(Default)]
pub struct Renderer {
    texture: Option<TextureHandle>,
    uploaded_revision: Option<u64>,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when the texture does not reflect `revision` yet
    pub fn needs_upload(&self, revision: u64) -> bool {
        self.texture.is_none() || self.uploaded_revision != Some(revision)
    }

    /// Renders the canvas into `rect`
    ///
    /// Args:
    ///     ctx (egui::Context): Used to allocate the texture on first use
    ///     painter (egui::Painter): The painter to draw with
    ///     rect (egui::Rect): Screen area the canvas occupies
    ///     document (Document): Source of the pixels
    pub fn render(&mut self, ctx: &egui::Context, painter: &egui::Painter, rect: egui::Rect, document: &Document) {
        let revision = document.revision();
        if self.needs_upload(revision) {
            let image = document.canvas().to_color_image();
            match &mut self.texture {
                Some(texture) => texture.set(image, TextureOptions::NEAREST),
                None => {
                    self.texture = Some(ctx.load_texture(CANVAS_TEXTURE_NAME, image, TextureOptions::NEAREST));
                }
            }
            self.uploaded_revision = Some(revision);
        }

        if let Some(texture) = &self.texture {
            let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
            painter.image(texture.id(), rect, uv, Color32::WHITE);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Canvas;
    use crate::shape::ShapeKind;

    #[test]
    fn test_upload_follows_revision() {
        let ctx = egui::Context::default();
        let rect = egui::Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(16.0, 16.0));
        let painter = egui::Painter::new(ctx.clone(), egui::LayerId::background(), rect);
        let mut document = Document::with_canvas(Canvas::new(16, 16, Color32::WHITE), Color32::WHITE, None);
        let mut renderer = Renderer::new();

        assert!(renderer.needs_upload(document.revision()));
        renderer.render(&ctx, &painter, rect, &document);
        assert!(!renderer.needs_upload(document.revision()));

        document.draw_segment(ShapeKind::Line, egui::pos2(0.0, 0.0), egui::pos2(15.0, 15.0), Color32::RED, 1);
        assert!(renderer.needs_upload(document.revision()));
        renderer.render(&ctx, &painter, rect, &document);
        assert!(!renderer.needs_upload(document.revision()));
    }
}
