//! 2D coordinate types shared by the overlay rasterizer and the UI.
//!
//! Logical pixels, origin top-left, +X right, +Y down.

mod corner_radii;
mod rect;
mod vec2;
mod viewport;

pub use corner_radii::CornerRadii;
pub use rect::Rect;
pub use vec2::Vec2;
pub use viewport::Viewport;
