use eframe_sketch::command::{Command, CommandOutcome};
use eframe_sketch::config::{CANVAS_HEIGHT, CANVAS_WIDTH};
use eframe_sketch::document::Document;
use eframe_sketch::error::SketchError;
use eframe_sketch::file_handler::{load_canvas_image, save_canvas};
use eframe_sketch::shape::ShapeKind;
use egui::{Color32, Pos2};
use image::{Rgb, RgbImage, Rgba, RgbaImage};

fn drawn_document() -> Document {
    let mut doc = Document::default();
    doc.begin_stroke();
    doc.draw_segment(ShapeKind::Line, Pos2::new(10.0, 10.0), Pos2::new(50.0, 50.0), Color32::BLACK, 3);
    doc.draw_segment(ShapeKind::Rectangle, Pos2::new(100.0, 100.0), Pos2::new(300.0, 200.0), Color32::RED, 5);
    doc
}

#[test]
fn test_save_then_load_png_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let doc = drawn_document();

    let outcome = Command::Save(dir.path().join("drawing.png")).execute(&mut drawn_document()).unwrap();
    assert_eq!(outcome, CommandOutcome::Saved(dir.path().join("drawing.png")));

    let reloaded = load_canvas_image(&dir.path().join("drawing.png"), [CANVAS_WIDTH, CANVAS_HEIGHT]).unwrap();
    assert_eq!(&reloaded, doc.canvas().as_rgb_image());
}

#[test]
fn test_save_without_extension_defaults_to_png() {
    let dir = tempfile::tempdir().unwrap();
    let doc = drawn_document();

    let written = save_canvas(doc.canvas(), &dir.path().join("untitled")).unwrap();

    assert_eq!(written, dir.path().join("untitled.png"));
    let bytes = std::fs::read(&written).unwrap();
    assert_eq!(image::guess_format(&bytes).unwrap(), image::ImageFormat::Png);
}

#[test]
fn test_save_uses_extension_format() {
    let dir = tempfile::tempdir().unwrap();
    let doc = drawn_document();

    let written = save_canvas(doc.canvas(), &dir.path().join("drawing.bmp")).unwrap();
    let bytes = std::fs::read(&written).unwrap();
    assert_eq!(image::guess_format(&bytes).unwrap(), image::ImageFormat::Bmp);
}

#[test]
fn test_save_rejects_unknown_extension() {
    let dir = tempfile::tempdir().unwrap();
    let doc = drawn_document();

    let err = save_canvas(doc.canvas(), &dir.path().join("drawing.notanimage")).unwrap_err();
    assert!(matches!(err, SketchError::UnsupportedFormat { .. }));
}

#[test]
fn test_save_to_missing_directory_reports_error() {
    let dir = tempfile::tempdir().unwrap();
    let doc = drawn_document();

    let err = save_canvas(doc.canvas(), &dir.path().join("missing").join("drawing.png")).unwrap_err();
    assert!(matches!(err, SketchError::Io { .. } | SketchError::Encode { .. }));
}

#[test]
fn test_load_stretches_to_canvas_and_cannot_be_undone() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("small.png");
    // Left half red, right half blue
    let source = RgbImage::from_fn(400, 300, |x, _| if x < 200 { Rgb([255, 0, 0]) } else { Rgb([0, 0, 255]) });
    source.save(&path).unwrap();

    let mut doc = Document::default();
    assert_eq!(Command::Load(path).execute(&mut doc).unwrap(), CommandOutcome::Changed);

    let canvas = doc.canvas();
    assert_eq!(canvas.size(), [CANVAS_WIDTH, CANVAS_HEIGHT]);
    assert_eq!(canvas.pixel(10, 10), Some(Color32::RED));
    assert_eq!(canvas.pixel(350, 490), Some(Color32::RED));
    assert_eq!(canvas.pixel(450, 10), Some(Color32::BLUE));
    assert_eq!(canvas.pixel(790, 490), Some(Color32::BLUE));

    let loaded = canvas.clone();
    assert_eq!(Command::Undo.execute(&mut doc).unwrap(), CommandOutcome::Unchanged);
    assert_eq!(doc.canvas(), &loaded);
}

#[test]
fn test_load_drops_alpha() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("translucent.png");
    RgbaImage::from_pixel(8, 5, Rgba([0, 128, 0, 10])).save(&path).unwrap();

    let mut doc = Document::default();
    doc.load_from(&path).unwrap();

    assert!(doc.canvas().is_uniform(Color32::from_rgb(0, 128, 0)));
}

#[test]
fn test_corrupt_file_leaves_canvas_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.png");
    std::fs::write(&path, b"\x89PNG but not really").unwrap();

    let mut doc = drawn_document();
    let before = doc.canvas().clone();

    let err = Command::Load(path).execute(&mut doc).unwrap_err();

    assert!(matches!(err, SketchError::Decode { .. }));
    assert_eq!(doc.canvas(), &before);
    assert_eq!(doc.history().undo_depth(), 1);
}
