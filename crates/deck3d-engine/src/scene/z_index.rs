/// Z-layer for draw items; higher values paint on top.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
pub struct ZIndex(pub i32);

impl ZIndex {
    pub const BACKGROUND: ZIndex = ZIndex(0);
    pub const CONTENT: ZIndex = ZIndex(10);
    pub const OVERLAY: ZIndex = ZIndex(100);

    #[inline]
    pub const fn new(v: i32) -> Self {
        Self(v)
    }

    #[inline]
    pub const fn above(self, by: i32) -> Self {
        Self(self.0 + by)
    }
}
