//! Contract between the runtime loop and the application.
//!
//! The runtime owns windows, GPU and input; apps only see a [`FrameCtx`] per
//! frame and raw window events.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, WindowCtx};
