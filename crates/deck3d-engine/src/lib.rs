//! deck3d engine crate.
//!
//! Platform and GPU runtime for the card viewer: window loop, input, time,
//! logging, a 2D draw stream with its CPU rasterizer, CPU mesh geometry and
//! the wgpu renderers that draw the 3D scene.

pub mod core;
pub mod device;
pub mod input;
pub mod time;
pub mod window;

pub mod coords;
pub mod geometry;
pub mod logging;
pub mod paint;
pub mod render;
pub mod scene;
pub mod text;
