//! Pixel coverage for the three drawable primitives.
//!
//! Shapes are stroked with tiny-skia into an aliased coverage mask the size of
//! the visible part of the shape, then reported pixel by pixel.

use std::fmt;

use egui::Pos2;
use serde::{Deserialize, Serialize};
use tiny_skia::{FillRule, LineCap, LineJoin, Paint, Path, PathBuilder, Pixmap, Rect, Stroke, Transform};

/// The kind of primitive a stroke segment produces.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    /// Open line from start to end.
    #[default]
    Line,
    /// Unfilled rectangle outline spanning start and end.
    Rectangle,
    /// Unfilled ellipse inscribed in the box spanning start and end.
    Oval,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 3] = [ShapeKind::Line, ShapeKind::Rectangle, ShapeKind::Oval];

    pub fn label(self) -> &'static str {
        match self {
            ShapeKind::Line => "line",
            ShapeKind::Rectangle => "rectangle",
            ShapeKind::Oval => "oval",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            ShapeKind::Line => "╱",
            ShapeKind::Rectangle => "▭",
            ShapeKind::Oval => "◯",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Integer pixel coordinate. Values may lie outside the canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelPos {
    pub x: i64,
    pub y: i64,
}

impl PixelPos {
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

impl From<Pos2> for PixelPos {
    fn from(pos: Pos2) -> Self {
        Self {
            x: pos.x.round() as i64,
            y: pos.y.round() as i64,
        }
    }
}

/// Calls `plot` once for every in-bounds pixel covered by the primitive.
///
/// `size` is the `[width, height]` of the target raster. Pixel `(x, y)` spans
/// `[x, x + 1) × [y, y + 1)`; rectangle and oval bounds include both corners.
pub fn rasterize<F>(kind: ShapeKind, start: PixelPos, end: PixelPos, width: u32, size: [u32; 2], mut plot: F)
where
    F: FnMut(u32, u32),
{
    let width = width.max(1);
    let (min, max) = normalized(start, end);
    let reach = i64::from(width);
    let Some(area) = Area::clipped(min.x - reach, min.y - reach, max.x + reach + 1, max.y + reach + 1, size) else {
        return;
    };
    let Some(coverage) = (match kind {
        ShapeKind::Line => line(start, end, width),
        ShapeKind::Rectangle => rectangle(min, max, width),
        ShapeKind::Oval => oval(min, max, width),
    }) else {
        return;
    };
    let Some(mut pixmap) = Pixmap::new(area.width, area.height) else {
        return;
    };

    let paint = make_paint();
    let transform = Transform::from_translate(-area.x as f32, -area.y as f32);
    match &coverage {
        Coverage::Stroke(path, stroke) => pixmap.stroke_path(path, &paint, stroke, transform, None),
        Coverage::Fill(path) => pixmap.fill_path(path, &paint, FillRule::Winding, transform, None),
    }

    let row = area.width as usize;
    for (index, pixel) in pixmap.pixels().iter().enumerate() {
        if pixel.alpha() > 0 {
            plot(area.x as u32 + (index % row) as u32, area.y as u32 + (index / row) as u32);
        }
    }
}

/// What to paint into the coverage mask.
enum Coverage {
    Stroke(Path, Stroke),
    Fill(Path),
}

/// The part of the canvas a primitive can touch, in canvas pixels.
struct Area {
    x: i64,
    y: i64,
    width: u32,
    height: u32,
}

impl Area {
    fn clipped(left: i64, top: i64, right: i64, bottom: i64, size: [u32; 2]) -> Option<Self> {
        let (left, top) = (left.max(0), top.max(0));
        let (right, bottom) = (right.min(i64::from(size[0])), bottom.min(i64::from(size[1])));
        (left < right && top < bottom).then(|| Self {
            x: left,
            y: top,
            width: (right - left) as u32,
            height: (bottom - top) as u32,
        })
    }
}

// Aliased, so every covered pixel gets the full brush color
fn make_paint() -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(0, 0, 0, 255);
    paint.anti_alias = false;
    paint
}

/// Coverage is sampled at pixel centers. The extra width keeps a one pixel
/// outline from slipping between two centers where it runs nearly straight.
const STROKE_PADDING: f32 = 0.1;

fn make_stroke(width: u32, line_cap: LineCap, line_join: LineJoin) -> Stroke {
    Stroke {
        width: width as f32 + STROKE_PADDING,
        line_cap,
        line_join,
        ..Stroke::default()
    }
}

fn normalized(a: PixelPos, b: PixelPos) -> (PixelPos, PixelPos) {
    (
        PixelPos::new(a.x.min(b.x), a.y.min(b.y)),
        PixelPos::new(a.x.max(b.x), a.y.max(b.y)),
    )
}

/// Runs between pixel centers with round caps, so consecutive segments of a drag join up.
fn line(a: PixelPos, b: PixelPos, width: u32) -> Option<Coverage> {
    let (ax, ay) = (a.x as f32 + 0.5, a.y as f32 + 0.5);
    let radius = (width as f32 + STROKE_PADDING) / 2.0;
    if a == b {
        return ellipse_path(ax, ay, radius, radius).map(Coverage::Fill);
    }

    let mut pb = PathBuilder::new();
    pb.move_to(ax, ay);
    pb.line_to(b.x as f32 + 0.5, b.y as f32 + 0.5);
    let path = pb.finish()?;
    Some(Coverage::Stroke(path, make_stroke(width, LineCap::Round, LineJoin::Round)))
}

/// Box covering both corner pixels.
fn outer_rect(min: PixelPos, max: PixelPos) -> Option<Rect> {
    Rect::from_ltrb(min.x as f32, min.y as f32, (max.x + 1) as f32, (max.y + 1) as f32)
}

/// The stroke runs inside the box; it is `width` pixels thick, measured inward.
fn inset_rect(outer: Rect, width: u32) -> Option<Rect> {
    let half = width as f32 / 2.0;
    let thickness = width as f32 * 2.0;
    if outer.width() <= thickness || outer.height() <= thickness {
        return None;
    }
    Rect::from_ltrb(
        outer.left() + half,
        outer.top() + half,
        outer.right() - half,
        outer.bottom() - half,
    )
}

fn rectangle(min: PixelPos, max: PixelPos, width: u32) -> Option<Coverage> {
    let outer = outer_rect(min, max)?;
    Some(match inset_rect(outer, width) {
        Some(rect) => {
            Coverage::Stroke(PathBuilder::from_rect(rect), make_stroke(width, LineCap::Butt, LineJoin::Miter))
        }
        // Outline thicker than the box: nothing left of the interior
        None => Coverage::Fill(PathBuilder::from_rect(outer)),
    })
}

fn oval(min: PixelPos, max: PixelPos, width: u32) -> Option<Coverage> {
    let outer = outer_rect(min, max)?;
    let inscribed = |rect: Rect| {
        let (cx, cy) = (rect.left() + rect.width() / 2.0, rect.top() + rect.height() / 2.0);
        ellipse_path(cx, cy, rect.width() / 2.0, rect.height() / 2.0)
    };
    match inset_rect(outer, width) {
        Some(rect) => {
            inscribed(rect).map(|path| Coverage::Stroke(path, make_stroke(width, LineCap::Butt, LineJoin::Round)))
        }
        None => inscribed(outer).map(Coverage::Fill),
    }
}

/// Closed polygon through the ellipse, fine enough that the error stays far
/// below a pixel even at the sharp ends of a very flat oval.
fn ellipse_path(cx: f32, cy: f32, rx: f32, ry: f32) -> Option<Path> {
    let segments = ((rx + ry) * 4.0).ceil().clamp(32.0, 4096.0) as usize;
    let step = std::f32::consts::TAU / segments as f32;

    let mut pb = PathBuilder::new();
    pb.move_to(cx + rx, cy);
    for i in 1..segments {
        let (sin, cos) = (i as f32 * step).sin_cos();
        pb.line_to(cx + rx * cos, cy + ry * sin);
    }
    pb.close();
    pb.finish()
}
