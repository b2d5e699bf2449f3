//! deck3d UI: a small widget tree painted into the engine's 2D draw stream.
//!
//! The tree is rebuilt every frame from application state. Widgets report
//! user intent through callbacks; they keep no state between frames.
//!
//! ```rust,ignore
//! use deck3d_ui::prelude::*;
//!
//! let mut ui = UiScene::new();
//! let frame = ui.frame(
//!     Column::new()
//!         .child(Text::new("Theme", font, 18.0, Color::WHITE))
//!         .child(Button::new(Text::new("Neon", font, 14.0, Color::WHITE)).on_click(|| ())),
//!     Rect::new(0.0, 0.0, 1280.0, 800.0),
//!     &input,
//! );
//! if !frame.pointer_captured {
//!     // the pointer belongs to the 3D scene
//! }
//! ```

pub mod constraints;
pub mod event;
pub mod painter;
pub mod scene;
pub mod widget;
pub mod widgets;

pub mod prelude {
    pub use crate::constraints::{Constraints, Edges, LayoutCtx, inset_rect};
    pub use crate::event::{EventResult, UiEvent};
    pub use crate::painter::Painter;
    pub use crate::scene::{UiFrame, UiInput, UiScene};
    pub use crate::widget::{Element, Widget};
    pub use crate::widgets::{
        button::Button,
        color_picker::ColorPicker,
        container::Container,
        flex::{Align, Column, Row},
        grid::Grid,
        slider::Slider,
        stack::{AnchorVal, SizeHint, Stack, StackItem},
        text::Text,
    };

    pub use deck3d_engine::coords::{CornerRadii, Rect, Vec2};
    pub use deck3d_engine::paint::{Color, ColorStop, LinearGradient, Paint, SpreadMode};
    pub use deck3d_engine::scene::Border;
    pub use deck3d_engine::text::FontId;
}
