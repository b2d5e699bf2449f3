use deck3d_engine::coords::Vec2;

/// Pointer events routed through the widget tree.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    /// Primary button pressed and released at `pos` without dragging.
    Click { pos: Vec2 },
    /// Pointer position, sent every frame. Widgets that cover the pointer
    /// consume it so the scene behind them stays untouched.
    Hover { pos: Vec2 },
    /// Pointer moved while the primary button is held. `start` is the press position.
    Drag { pos: Vec2, start: Vec2 },
    /// Primary button released after a press on the UI, wherever the pointer is
    /// now. Owners recognize their drag with `rect.contains(start)`.
    DragEnd { pos: Vec2, start: Vec2 },
    /// Wheel delta in lines; positive scrolls down.
    ScrollWheel { delta: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Stop routing.
    Consumed,
    Ignored,
}

impl EventResult {
    #[inline]
    pub fn is_consumed(self) -> bool {
        self == EventResult::Consumed
    }

    /// `Consumed` when `hit`; used by opaque widgets for hover.
    #[inline]
    pub fn consumed_if(hit: bool) -> Self {
        if hit { EventResult::Consumed } else { EventResult::Ignored }
    }
}
