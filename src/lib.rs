#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod brush;
pub mod canvas;
pub mod command;
pub mod components;
pub mod config;
pub mod document;
pub mod error;
pub mod file_handler;
pub mod input;
pub mod panels;
pub mod renderer;
pub mod shape;
pub mod tools;

pub use app::PaintApp;
pub use brush::BrushState;
pub use canvas::Canvas;
pub use command::{Command, CommandOutcome, SnapshotHistory};
pub use config::Settings;
pub use document::Document;
pub use error::{SketchError, SketchResult};
pub use input::{InputEvent, InputHandler, InputLocation};
pub use renderer::Renderer;
pub use shape::ShapeKind;
pub use tools::{ShapeTool, StrokeState, Tool};
