//! The two scenes the viewer can show, behind one trait.

pub mod fan;
pub mod gesture;
pub mod panel;
pub mod table;

use anyhow::Result;
use deck3d_engine::coords::{Vec2, Viewport};
use deck3d_engine::input::{InputFrame, InputState, Key};
use deck3d_engine::text::{FontId, FontSystem};
use deck3d_engine::render::{LineRenderer, MeshRenderer};
use deck3d_ui::prelude::Element;

use crate::config::ViewerMode;
use crate::render::SceneFrame;
use crate::textures::Templates;

pub use fan::FanMode;
pub use gesture::Gesture;
pub use panel::{PanelAction, PanelActions};
pub use table::TableMode;

/// Input for one frame as the 3D scene sees it.
pub struct FrameInput<'a> {
    pub viewport: Viewport,
    pub state: &'a InputState,
    pub frame: &'a InputFrame,
    /// A widget owns the pointer this frame.
    pub ui_captured: bool,
}

impl FrameInput<'_> {
    /// Pointer position unless the UI owns it.
    pub fn scene_pointer(&self) -> Option<Vec2> {
        if self.ui_captured {
            return None;
        }
        self.state.pointer_pos.map(Vec2::from)
    }

    /// Wheel lines, unless the UI owns the pointer.
    pub fn scene_scroll(&self) -> f32 {
        if self.ui_captured { 0.0 } else { self.frame.scroll_lines }
    }

    pub fn key_pressed(&self, key: Key) -> bool {
        self.frame.key_pressed(key)
    }

    /// Lowest of the digit keys 1..=9 pressed this frame.
    pub fn pressed_digit(&self) -> Option<u8> {
        self.frame.keys_pressed.iter().filter_map(|k| k.digit()).filter(|&d| d > 0).min()
    }
}

/// What the app should do after a mode update.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct ModeOutcome {
    /// The pointer is over something that reacts to a click.
    pub hover_clickable: bool,
    pub exit: bool,
}

/// GPU handles a mode needs to create its meshes and materials.
pub struct Gfx<'a> {
    pub device: &'a wgpu::Device,
    pub queue: &'a wgpu::Queue,
    pub meshes: &'a MeshRenderer,
    pub lines: &'a LineRenderer,
    pub fonts: &'a FontSystem,
    pub font: Option<FontId>,
    pub templates: &'a Templates,
}

pub trait DeckMode {
    fn kind(&self) -> ViewerMode;

    /// Keys, picking, camera and animation for one frame.
    fn update(&mut self, input: &FrameInput<'_>, dt: f32) -> ModeOutcome;

    /// The 2D layer: panels and instructions.
    fn overlay(&self, font: Option<FontId>, actions: &PanelActions) -> Element;

    /// Applies a UI action queued during the last overlay pass.
    fn apply(&mut self, action: PanelAction) {
        let _ = action;
    }

    /// Creates or refreshes GPU resources. Called every frame before `scene`.
    fn prepare(&mut self, gfx: &Gfx<'_>) -> Result<()>;

    /// `None` until `prepare` has succeeded once.
    fn scene(&self, elapsed: f32) -> Option<SceneFrame<'_>>;
}
