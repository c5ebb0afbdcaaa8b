mod shape_button;

pub use shape_button::ShapeButton;
