use egui::{Context, LayerId, PointerButton, Pos2, Rect, Vec2};

/// Represents the location where an input event occurred
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputLocation {
    /// The position in canvas pixel coordinates; may lie outside the canvas
    pub position: Pos2,
    /// Whether the pointer was over the canvas, with nothing drawn on top of it
    pub is_in_canvas: bool,
}

/// Pointer events relevant to drawing, in the order they arrived
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Primary button was pressed
    PointerDown { location: InputLocation },
    /// Pointer moved
    PointerMove {
        location: InputLocation,
        /// Whether the primary button is held
        primary_held: bool,
    },
    /// Primary button was released
    PointerUp { location: InputLocation },
}

/// Converts raw egui input into canvas-space [`InputEvent`]s
#[derive(Debug)]
pub struct InputHandler {
    canvas_rect: Rect,
    /// Layer the canvas is painted on
    canvas_layer: LayerId,
    canvas_size: Vec2,
    primary_held: bool,
}

impl InputHandler {
    /// `canvas_size` is the raster size in pixels shown inside `canvas_rect`.
    pub fn new(canvas_rect: Rect, canvas_size: [u32; 2]) -> Self {
        Self {
            canvas_rect,
            canvas_layer: LayerId::background(),
            canvas_size: Vec2::new(canvas_size[0] as f32, canvas_size[1] as f32),
            primary_held: false,
        }
    }

    /// Update where the canvas is shown (e.g. if window is resized) and the layer it lives on
    pub fn set_canvas_area(&mut self, rect: Rect, layer: LayerId) {
        self.canvas_rect = rect;
        self.canvas_layer = layer;
    }

    /// Creates an InputLocation from a screen position
    fn make_location(&self, pos: Pos2, uncovered: &impl Fn(Pos2) -> bool) -> InputLocation {
        let rect = self.canvas_rect;
        let scale = Vec2::new(
            self.canvas_size.x / rect.width().max(f32::EPSILON),
            self.canvas_size.y / rect.height().max(f32::EPSILON),
        );
        let offset = pos - rect.min;
        InputLocation {
            position: Pos2::new(offset.x * scale.x, offset.y * scale.y),
            is_in_canvas: rect.contains(pos) && uncovered(pos),
        }
    }

    /// Process this frame's raw egui events.
    ///
    /// A position only counts as on the canvas when no popup, window or other
    /// area sits above the canvas layer there.
    pub fn process_input(&mut self, ctx: &Context) -> Vec<InputEvent> {
        let raw = ctx.input(|input| input.raw.events.clone());
        let canvas_layer = self.canvas_layer;
        // Panels have no area of their own, so the bare canvas reports no layer
        self.translate(&raw, |pos| ctx.layer_id_at(pos).is_none_or(|layer| layer == canvas_layer))
    }

    /// Translate raw events, keeping their order.
    ///
    /// `uncovered` tells whether nothing is drawn over the canvas at a screen position.
    pub fn translate(&mut self, raw: &[egui::Event], uncovered: impl Fn(Pos2) -> bool) -> Vec<InputEvent> {
        let mut events = Vec::new();

        for event in raw {
            match event {
                egui::Event::PointerMoved(pos) => {
                    events.push(InputEvent::PointerMove {
                        location: self.make_location(*pos, &uncovered),
                        primary_held: self.primary_held,
                    });
                }
                egui::Event::PointerButton {
                    pos,
                    button: PointerButton::Primary,
                    pressed,
                    ..
                } => {
                    let location = self.make_location(*pos, &uncovered);
                    self.primary_held = *pressed;
                    events.push(if *pressed {
                        InputEvent::PointerDown { location }
                    } else {
                        InputEvent::PointerUp { location }
                    });
                }
                _ => {}
            }
        }

        events
    }
}
