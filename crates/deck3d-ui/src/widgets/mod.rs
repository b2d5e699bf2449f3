pub mod button;
pub mod color_picker;
pub mod container;
pub mod flex;
pub mod grid;
pub mod slider;
pub mod stack;
pub mod text;
