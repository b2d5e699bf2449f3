use crate::coords::{CornerRadii, Rect};
use crate::paint::{Color, Paint};
use crate::scene::{DrawCmd, DrawList, ZIndex};

use super::Border;

#[derive(Debug, Clone, PartialEq)]
pub struct RoundedRectCmd {
    pub rect: Rect,
    pub radii: CornerRadii,
    pub paint: Paint,
    pub border: Option<Border>,
}

impl DrawList {
    pub fn push_rounded_rect(
        &mut self,
        z: ZIndex,
        rect: Rect,
        radii: CornerRadii,
        paint: Paint,
        border: Option<Border>,
    ) {
        self.push(z, DrawCmd::RoundedRect(RoundedRectCmd { rect, radii, paint, border }));
    }

    /// Uniform radius, solid fill, no border.
    #[inline]
    pub fn push_solid_rounded_rect(&mut self, z: ZIndex, rect: Rect, radius: f32, color: Color) {
        self.push_rounded_rect(z, rect, CornerRadii::all(radius), Paint::Solid(color), None);
    }
}
