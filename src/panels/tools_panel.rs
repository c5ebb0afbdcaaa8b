use egui::color_picker::{Alpha, color_edit_button_srgba};

use crate::PaintApp;
use crate::components::ShapeButton;
use crate::config::{MAX_BRUSH_WIDTH, MIN_BRUSH_WIDTH};
use crate::shape::ShapeKind;
use crate::tools::Tool;

pub fn tools_panel(app: &mut PaintApp, ctx: &egui::Context) {
    egui::SidePanel::left("tools_panel")
        .resizable(false)
        .default_width(200.0)
        .show(ctx, |ui| {
            ui.heading("Brush");

            ui.horizontal(|ui| {
                ui.label("Color:");
                color_edit_button_srgba(ui, &mut app.brush_mut().color, Alpha::Opaque);
            });

            let mut width = app.brush().width();
            ui.add(egui::Slider::new(&mut width, MIN_BRUSH_WIDTH..=MAX_BRUSH_WIDTH).text("Brush Size"));
            app.brush_mut().set_width(width);

            ui.horizontal(|ui| {
                let current = app.brush().shape();
                for shape in ShapeKind::ALL {
                    if ShapeButton::new(shape, current == shape).show(ui).clicked() {
                        log::info!("Shape selected from UI: {}", shape);
                        app.brush_mut().set_shape(shape);
                    }
                }
            });

            ui.separator();
            ui.heading("Background");
            ui.horizontal(|ui| {
                color_edit_button_srgba(ui, app.background_choice_mut(), Alpha::Opaque);
                if ui
                    .button("Apply Background")
                    .on_hover_text("Replaces the canvas and clears undo history")
                    .clicked()
                {
                    app.apply_background();
                }
            });

            ui.separator();
            ui.heading("Canvas");
            ui.horizontal(|ui| {
                if ui.button("Save").clicked() {
                    app.save_with_dialog();
                }
                if ui.button("Load Image").clicked() {
                    app.load_with_dialog();
                }
                if ui.button("Clear").clicked() {
                    app.clear_canvas();
                }
            });

            // Undo/Redo section
            ui.horizontal(|ui| {
                let can_undo = app.history().can_undo();
                let can_redo = app.history().can_redo();

                if ui.add_enabled(can_undo, egui::Button::new("Undo")).clicked() {
                    app.undo();
                }
                if ui.add_enabled(can_redo, egui::Button::new("Redo")).clicked() {
                    app.redo();
                }
            });

            ui.separator();

            let history = app.history();
            ui.horizontal(|ui| {
                ui.label(format!("Undo stack size: {}", history.undo_depth()));
                ui.label(format!("Redo stack size: {}", history.redo_depth()));
            });
            ui.label(format!("Tool state: {}", app.tool().current_state_name()));

            if let Some(status) = app.status() {
                ui.separator();
                ui.small(status);
            }
        });
}
