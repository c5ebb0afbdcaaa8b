use egui::Pos2;

use crate::brush::BrushState;
use crate::document::Document;
use crate::tools::Tool;

/// Where the tool is within a pointer gesture.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum StrokeState {
    #[default]
    Idle,
    /// Pointer is held; the next segment starts at `anchor`
    Stroking { anchor: Pos2 },
}

impl StrokeState {
    pub fn name(&self) -> &'static str {
        match self {
            StrokeState::Idle => "Idle",
            StrokeState::Stroking { .. } => "Stroking",
        }
    }
}

/// Draws the brush's current shape between successive pointer positions.
///
/// Every move draws one segment from the anchor to the pointer and then moves
/// the anchor there. For lines this builds a freehand path; for rectangles
/// and ovals a long drag leaves a chain of small shapes rather than one
/// shape spanning the whole drag.
#[derive(Debug, Default)]
pub struct ShapeTool {
    state: StrokeState,
}

impl ShapeTool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> StrokeState {
        self.state
    }
}

impl Tool for ShapeTool {
    fn current_state_name(&self) -> &'static str {
        self.state.name()
    }

    fn on_pointer_down(&mut self, pos: Pos2, doc: &mut Document) {
        // A press while stroking (release was missed) simply starts over
        doc.begin_stroke();
        self.state = StrokeState::Stroking { anchor: pos };
    }

    fn on_pointer_move(&mut self, pos: Pos2, brush: &BrushState, doc: &mut Document) {
        let StrokeState::Stroking { anchor } = self.state else {
            return;
        };
        doc.draw_segment(brush.shape(), anchor, pos, brush.color(), brush.width());
        self.state = StrokeState::Stroking { anchor: pos };
    }

    fn on_pointer_up(&mut self, _pos: Pos2, _doc: &mut Document) {
        self.state = StrokeState::Idle;
    }
}
