/// Per-corner radii for a rounded rectangle, CSS order (tl, tr, br, bl).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct CornerRadii {
    pub top_left: f32,
    pub top_right: f32,
    pub bottom_right: f32,
    pub bottom_left: f32,
}

impl CornerRadii {
    #[inline]
    pub const fn new(top_left: f32, top_right: f32, bottom_right: f32, bottom_left: f32) -> Self {
        Self { top_left, top_right, bottom_right, bottom_left }
    }

    #[inline]
    pub const fn all(r: f32) -> Self {
        Self::new(r, r, r, r)
    }

    #[inline]
    pub const fn zero() -> Self {
        Self::all(0.0)
    }

    /// Scales radii down uniformly so adjacent corners never overlap on a `w` x `h` box.
    pub fn fitted(self, w: f32, h: f32) -> Self {
        let c = |r: f32| r.max(0.0);
        let (tl, tr, br, bl) = (c(self.top_left), c(self.top_right), c(self.bottom_right), c(self.bottom_left));

        let ratios = [
            w / (tl + tr),
            w / (bl + br),
            h / (tl + bl),
            h / (tr + br),
        ];
        let k = ratios
            .into_iter()
            .filter(|r| r.is_finite())
            .fold(1.0f32, f32::min);

        Self::new(tl * k, tr * k, br * k, bl * k)
    }

    pub fn is_zero(&self) -> bool {
        self.top_left <= 0.0 && self.top_right <= 0.0 && self.bottom_right <= 0.0 && self.bottom_left <= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fitted_shrinks_oversized_radii() {
        let r = CornerRadii::all(30.0).fitted(40.0, 100.0);
        assert!((r.top_left - 20.0).abs() < 1e-6);
        assert!((r.bottom_right - 20.0).abs() < 1e-6);
    }

    #[test]
    fn fitted_keeps_small_radii() {
        let r = CornerRadii::all(4.0).fitted(40.0, 100.0);
        assert_eq!(r, CornerRadii::all(4.0));
        assert_eq!(CornerRadii::zero().fitted(10.0, 10.0), CornerRadii::zero());
    }
}
