use egui::Pos2;

use crate::brush::BrushState;
use crate::document::Document;
use crate::input::InputEvent;

/// Tool trait defines how pointer gestures turn into canvas edits
pub trait Tool {
    /// Name of the tool's current state, shown in the tools panel
    fn current_state_name(&self) -> &'static str;

    /// Handle a primary press on the canvas.
    fn on_pointer_down(&mut self, pos: Pos2, doc: &mut Document);

    /// Handle pointer movement. `brush` is read fresh for every call.
    fn on_pointer_move(&mut self, pos: Pos2, brush: &BrushState, doc: &mut Document);

    /// Handle the primary button being released, wherever the pointer is.
    fn on_pointer_up(&mut self, pos: Pos2, doc: &mut Document);

    /// Route a translated input event to the matching handler.
    ///
    /// Presses only count inside the canvas; moves and releases are delivered
    /// wherever they happen so a drag can leave the canvas and come back.
    fn handle_event(&mut self, event: &InputEvent, brush: &BrushState, doc: &mut Document) {
        match event {
            InputEvent::PointerDown { location } if location.is_in_canvas => {
                self.on_pointer_down(location.position, doc);
            }
            InputEvent::PointerDown { .. } => {}
            InputEvent::PointerMove { location, .. } => {
                self.on_pointer_move(location.position, brush, doc);
            }
            InputEvent::PointerUp { location } => {
                self.on_pointer_up(location.position, doc);
            }
        }
    }
}

mod shape_tool;
pub use shape_tool::{ShapeTool, StrokeState};
