use eframe::egui;

use crate::PaintApp;

pub fn central_panel(app: &mut PaintApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let canvas = app.document().canvas();
        let size = egui::vec2(canvas.width() as f32, canvas.height() as f32);

        // Drag sense keeps egui from treating strokes as panel drags
        let (canvas_rect, _response) = ui.allocate_exact_size(size, egui::Sense::drag());

        app.handle_input(ctx, canvas_rect, ui.layer_id());

        let painter = ui.painter_at(canvas_rect);
        app.render_canvas(ctx, &painter, canvas_rect);
        painter.rect_stroke(canvas_rect, 0.0, egui::Stroke::new(1.0, egui::Color32::from_gray(120)));
    });
}
