/// Drawable area in logical pixels plus the DPI scale to physical pixels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub scale_factor: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height, scale_factor: 1.0 }
    }

    #[inline]
    pub const fn with_scale(mut self, scale_factor: f32) -> Self {
        self.scale_factor = scale_factor;
        self
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }

    #[inline]
    pub fn aspect(self) -> f32 {
        if self.height > 0.0 { self.width / self.height } else { 1.0 }
    }

    /// Size in whole physical pixels, never zero.
    pub fn physical_size(self) -> (u32, u32) {
        let s = self.scale_factor.max(0.01);
        (
            ((self.width * s).round() as u32).max(1),
            ((self.height * s).round() as u32).max(1),
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}
