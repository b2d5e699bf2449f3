use deck3d_engine::coords::{Rect, Vec2};
use deck3d_engine::input::{InputFrame, InputState, MouseButton};
use deck3d_engine::scene::DrawList;
use deck3d_engine::text::FontSystem;

use log::trace;

use crate::constraints::{Constraints, LayoutCtx};
use crate::event::UiEvent;
use crate::painter::Painter;
use crate::widget::Element;

/// Pointer travel below which a press and release count as a click.
pub const CLICK_SLOP: f32 = 4.0;

/// Pointer state for one UI frame, in logical pixels.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UiInput {
    /// `None` while the pointer is outside the window.
    pub mouse_pos: Option<Vec2>,
    /// Primary button held.
    pub mouse_down: bool,
    /// Primary button went down this frame.
    pub mouse_pressed: bool,
    /// Primary button went up this frame.
    pub mouse_released: bool,
    /// Wheel lines this frame; positive scrolls down.
    pub scroll: f32,
}

impl UiInput {
    pub fn from_engine(state: &InputState, frame: &InputFrame) -> Self {
        Self {
            mouse_pos: state.pointer_pos.map(Vec2::from),
            mouse_down: state.button_down(MouseButton::Left),
            mouse_pressed: frame.button_pressed(MouseButton::Left),
            mouse_released: frame.button_released(MouseButton::Left),
            scroll: frame.scroll_lines,
        }
    }
}

/// What the scene learned about the pointer this frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UiFrame {
    /// The pointer is over a widget or dragging something that started on
    /// one. The 3D scene ignores the pointer while this holds.
    pub pointer_captured: bool,
}

/// Lays out, paints and routes events for a widget tree each frame.
///
/// Owns the fonts and the draw list the overlay renderer consumes. The only
/// state kept across frames is the press position of a drag that began on
/// the UI.
pub struct UiScene {
    pub font_system: FontSystem,
    pub draw_list: DrawList,
    drag_start: Option<Vec2>,
}

impl UiScene {
    pub fn new() -> Self {
        Self::with_fonts(FontSystem::new())
    }

    pub fn with_fonts(font_system: FontSystem) -> Self {
        Self { font_system, draw_list: DrawList::new(), drag_start: None }
    }

    /// True while a press that began on a widget is still held.
    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.drag_start.is_some()
    }

    /// Measures and paints `root` into `rect`, then routes this frame's pointer events.
    ///
    /// Callbacks fire during routing, after painting; the caller applies them
    /// and the next frame's tree shows the result.
    pub fn frame(&mut self, root: impl Into<Element>, rect: Rect, input: &UiInput) -> UiFrame {
        let mut root = root.into();
        self.draw_list.clear();

        let ctx = LayoutCtx { fonts: &self.font_system };
        let _ = root.measure(Constraints::loose(rect.size), &ctx);

        {
            let mut painter = Painter::new(&mut self.draw_list, &self.font_system, input.mouse_pos, input.mouse_down);
            root.paint(&mut painter, rect);
        }

        let mut over_ui = false;
        if let Some(pos) = input.mouse_pos {
            over_ui = root.on_event(&UiEvent::Hover { pos }, rect, &ctx).is_consumed();

            if input.mouse_pressed && over_ui {
                trace!("ui press at ({}, {})", pos.x, pos.y);
                self.drag_start = Some(pos);
            }

            if let Some(start) = self.drag_start {
                if input.mouse_down && pos != start {
                    root.on_event(&UiEvent::Drag { pos, start }, rect, &ctx);
                }
                if input.mouse_released {
                    root.on_event(&UiEvent::DragEnd { pos, start }, rect, &ctx);
                    if pos.distance(start) <= CLICK_SLOP {
                        root.on_event(&UiEvent::Click { pos }, rect, &ctx);
                    }
                }
            }

            if input.scroll != 0.0 && over_ui {
                root.on_event(&UiEvent::ScrollWheel { delta: input.scroll }, rect, &ctx);
            }
        }

        let captured = over_ui || self.drag_start.is_some();
        if input.mouse_released || !input.mouse_down {
            self.drag_start = None;
        }

        UiFrame { pointer_captured: captured }
    }
}

impl Default for UiScene {
    fn default() -> Self {
        Self::new()
    }
}
