//! Font loading, measurement and CPU text rasterization (fontdue).

mod font_system;
mod raster;

pub use font_system::{FontId, FontLoadError, FontSystem, SYSTEM_FONT_CANDIDATES};
pub use raster::{draw_text, render_text};
