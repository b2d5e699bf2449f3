use crate::coords::Rect;

use super::{DrawCmd, SortKey, ZIndex};

/// One recorded draw: sort key, command and the clip active when it was pushed.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    pub key: SortKey,
    pub cmd: DrawCmd,
    /// Clip in logical pixels; `None` draws everywhere.
    pub clip_rect: Option<Rect>,
}

/// Draw stream for one frame of 2D overlay.
///
/// The list is rebuilt every frame; `clear()` keeps capacity. Clips nest by
/// intersection:
///
/// ```ignore
/// list.push_clip(panel_rect);
/// // children
/// list.pop_clip();
/// ```
#[derive(Debug, Default)]
pub struct DrawList {
    items: Vec<DrawItem>,
    next_order: u32,
    clip_stack: Vec<Rect>,
}

impl DrawList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn clear(&mut self) {
        self.items.clear();
        self.next_order = 0;
        self.clip_stack.clear();
    }

    /// Items in insertion order.
    #[inline]
    pub fn items(&self) -> &[DrawItem] {
        &self.items
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Records `cmd` under the current clip.
    #[inline]
    pub fn push(&mut self, z: ZIndex, cmd: DrawCmd) {
        let order = self.next_order;
        self.next_order = self.next_order.wrapping_add(1);
        self.items.push(DrawItem {
            key: SortKey::new(z, order),
            cmd,
            clip_rect: self.clip_stack.last().copied(),
        });
    }

    /// Starts a clip region intersected with the enclosing one. Balance with [`pop_clip`](Self::pop_clip).
    #[inline]
    pub fn push_clip(&mut self, rect: Rect) {
        let effective = match self.clip_stack.last() {
            None => rect,
            // Disjoint clips collapse to an empty rect so nothing under them draws.
            Some(&parent) => parent.intersect(rect).unwrap_or_default(),
        };
        self.clip_stack.push(effective);
    }

    #[inline]
    pub fn pop_clip(&mut self) {
        debug_assert!(!self.clip_stack.is_empty(), "pop_clip without push_clip");
        self.clip_stack.pop();
    }

    /// Items sorted back-to-front.
    pub fn sorted(&self) -> Vec<&DrawItem> {
        let mut out: Vec<&DrawItem> = self.items.iter().collect();
        out.sort_by_key(|item| item.key);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::Color;

    #[test]
    fn paint_order_is_z_then_insertion() {
        let mut list = DrawList::new();
        list.push_solid_rect(ZIndex(5), Rect::new(0.0, 0.0, 1.0, 1.0), Color::WHITE);
        list.push_solid_rect(ZIndex(1), Rect::new(1.0, 0.0, 1.0, 1.0), Color::WHITE);
        list.push_solid_rect(ZIndex(1), Rect::new(2.0, 0.0, 1.0, 1.0), Color::WHITE);

        let order: Vec<u32> = list.sorted().iter().map(|i| i.key.order).collect();
        assert_eq!(order, [1, 2, 0]);
    }

    #[test]
    fn nested_clips_intersect() {
        let mut list = DrawList::new();
        list.push_clip(Rect::new(0.0, 0.0, 100.0, 100.0));
        list.push_clip(Rect::new(50.0, 50.0, 100.0, 100.0));
        list.push_solid_rect(ZIndex(0), Rect::new(0.0, 0.0, 10.0, 10.0), Color::BLACK);
        list.pop_clip();
        list.pop_clip();
        list.push_solid_rect(ZIndex(0), Rect::new(0.0, 0.0, 10.0, 10.0), Color::BLACK);

        assert_eq!(list.items()[0].clip_rect, Some(Rect::new(50.0, 50.0, 50.0, 50.0)));
        assert_eq!(list.items()[1].clip_rect, None);
    }

    #[test]
    fn disjoint_clip_collapses() {
        let mut list = DrawList::new();
        list.push_clip(Rect::new(0.0, 0.0, 10.0, 10.0));
        list.push_clip(Rect::new(20.0, 20.0, 10.0, 10.0));
        list.push_solid_rect(ZIndex(0), Rect::new(0.0, 0.0, 1.0, 1.0), Color::BLACK);
        assert!(list.items()[0].clip_rect.is_some_and(|r| r.is_empty()));
    }

    #[test]
    fn identical_frames_compare_equal() {
        let build = || {
            let mut list = DrawList::new();
            list.push_solid_rounded_rect(ZIndex(2), Rect::new(4.0, 4.0, 20.0, 8.0), 3.0, Color::WHITE);
            list
        };
        assert_eq!(build().items(), build().items());
    }
}
