use egui::Color32;

use crate::brush::BrushState;
use crate::command::{Command, CommandOutcome, SnapshotHistory};
use crate::config::Settings;
use crate::document::Document;
use crate::file_handler::{self, FileHandler};
use crate::input::{InputEvent, InputHandler};
use crate::panels::{central_panel, tools_panel};
use crate::renderer::Renderer;
use crate::tools::{ShapeTool, Tool};

/// The drawing application: document, tool, controls and display wired together.
pub struct PaintApp {
    settings: Settings,
    document: Document,
    tool: ShapeTool,
    input: InputHandler,
    renderer: Renderer,
    file_handler: FileHandler,
    /// Background color picked in the panel, applied on request
    background_choice: Color32,
    error_message: Option<String>,
    status: Option<String>,
}

impl Default for PaintApp {
    fn default() -> Self {
        Self::with_settings(Settings::default())
    }
}

impl PaintApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        Self::with_settings(Settings::load(cc.storage))
    }

    pub fn with_settings(settings: Settings) -> Self {
        let document = Document::new(Color32::WHITE, settings.history_limit);
        let canvas_rect = egui::Rect::from_min_size(
            egui::Pos2::ZERO,
            egui::vec2(document.canvas().width() as f32, document.canvas().height() as f32),
        );
        Self {
            input: InputHandler::new(canvas_rect, document.canvas().size()),
            background_choice: document.background(),
            settings,
            document,
            tool: ShapeTool::new(),
            renderer: Renderer::new(),
            file_handler: FileHandler::new(),
            error_message: None,
            status: None,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn history(&self) -> &SnapshotHistory {
        self.document.history()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn brush(&self) -> &BrushState {
        &self.settings.brush
    }

    pub fn brush_mut(&mut self) -> &mut BrushState {
        &mut self.settings.brush
    }

    pub fn tool(&self) -> &ShapeTool {
        &self.tool
    }

    pub fn background_choice_mut(&mut self) -> &mut Color32 {
        &mut self.background_choice
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn dismiss_error(&mut self) {
        self.error_message = None;
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Run a control action, reporting failures instead of propagating them.
    pub fn execute_command(&mut self, command: Command) {
        log::debug!("Executing command: {}", command.name());
        match command.execute(&mut self.document) {
            Ok(CommandOutcome::Saved(path)) => {
                self.settings.remember_directory(&path);
                self.status = Some(format!("Saved to {}", path.display()));
            }
            Ok(CommandOutcome::Changed) => {
                if let Command::Load(path) = &command {
                    self.settings.remember_directory(path);
                    self.status = Some(format!("Loaded {}", path.display()));
                }
            }
            Ok(CommandOutcome::Unchanged) => {
                log::debug!("{} had nothing to do", command.name());
            }
            Err(err) => {
                log::error!("{} failed: {}", command.name(), err);
                self.error_message = Some(err.to_string());
            }
        }
    }

    pub fn undo(&mut self) {
        self.execute_command(Command::Undo);
    }

    pub fn redo(&mut self) {
        self.execute_command(Command::Redo);
    }

    pub fn clear_canvas(&mut self) {
        self.execute_command(Command::Clear);
    }

    /// Apply the background color picked in the panel.
    pub fn apply_background(&mut self) {
        self.execute_command(Command::SetBackground(self.background_choice));
    }

    /// Ask for a destination and save. Cancelling the dialog does nothing.
    pub fn save_with_dialog(&mut self) {
        match file_handler::pick_save_path(self.settings.last_directory.as_deref()) {
            Some(path) => self.execute_command(Command::Save(path)),
            None => log::debug!("Save cancelled"),
        }
    }

    /// Ask for an image and load it. Cancelling the dialog does nothing.
    pub fn load_with_dialog(&mut self) {
        match file_handler::pick_open_path(self.settings.last_directory.as_deref()) {
            Some(path) => self.execute_command(Command::Load(path)),
            None => log::debug!("Load cancelled"),
        }
    }

    /// Feed pointer events to the tool in arrival order.
    pub fn handle_canvas_input(&mut self, events: &[InputEvent]) {
        for event in events {
            self.tool.handle_event(event, &self.settings.brush, &mut self.document);
        }
    }

    /// Update the canvas placement and process this frame's pointer input.
    ///
    /// Presses landing on a popup or window above the canvas never start a stroke.
    pub fn handle_input(&mut self, ctx: &egui::Context, canvas_rect: egui::Rect, canvas_layer: egui::LayerId) {
        self.input.set_canvas_area(canvas_rect, canvas_layer);
        let events = self.input.process_input(ctx);
        self.handle_canvas_input(&events);
    }

    pub fn render_canvas(&mut self, ctx: &egui::Context, painter: &egui::Painter, rect: egui::Rect) {
        self.renderer.render(ctx, painter, rect, &self.document);
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        use egui::{Key, Modifiers};

        // Shift variants first: plain COMMAND also matches COMMAND+SHIFT
        let redo = ctx.input_mut(|i| {
            i.consume_key(Modifiers::COMMAND | Modifiers::SHIFT, Key::Z) || i.consume_key(Modifiers::COMMAND, Key::Y)
        });
        let undo = ctx.input_mut(|i| i.consume_key(Modifiers::COMMAND, Key::Z));
        let save = ctx.input_mut(|i| i.consume_key(Modifiers::COMMAND, Key::S));

        if redo {
            self.redo();
        }
        if undo {
            self.undo();
        }
        if save {
            self.save_with_dialog();
        }
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        self.file_handler.preview_files_being_dropped(ctx);
        if !self.file_handler.check_for_dropped_files(ctx) {
            return;
        }
        match self.file_handler.take_dropped_image(self.document.canvas().size()) {
            Some(Ok(dropped)) => {
                log::info!("Loaded dropped image {}", dropped.name);
                self.document.replace_with_image(&dropped.image);
                self.status = Some(format!("Loaded {}", dropped.name));
            }
            Some(Err(err)) => {
                log::error!("Failed to load dropped file: {}", err);
                self.error_message = Some(err.to_string());
            }
            None => {}
        }
    }

    fn error_window(&mut self, ctx: &egui::Context) {
        let Some(message) = self.error_message.clone() else {
            return;
        };
        egui::Window::new("Error")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                ui.label(message);
                if ui.button("OK").clicked() {
                    self.dismiss_error();
                }
            });
    }
}

impl eframe::App for PaintApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        self.settings.store(storage);
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_shortcuts(ctx);
        self.handle_dropped_files(ctx);

        tools_panel(self, ctx);
        central_panel(self, ctx);

        self.error_window(ctx);
    }
}
