//! Window and event loop.
//!
//! Owns the winit `EventLoop` and windows and wires them to the GPU and input
//! layers.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig};
pub use winit::window::CursorIcon;
