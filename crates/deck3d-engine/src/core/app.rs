use winit::event::WindowEvent;
use winit::window::WindowId;

use super::ctx::FrameCtx;

/// What the runtime should do after a callback.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Implemented by the viewer; driven by [`Runtime`](crate::window::Runtime).
pub trait App {
    /// Raw window events, after the runtime has updated input state.
    fn on_window_event(&mut self, window_id: WindowId, event: &WindowEvent) -> AppControl {
        let _ = (window_id, event);
        AppControl::Continue
    }

    /// Called once per redraw per window.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;
}
