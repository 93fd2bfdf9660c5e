//! Axis-aligned rectangle geometry for every entity in the maze
//!
//! Positions are integer pixel coordinates with the origin at the top-left of
//! the playfield and y growing downward. A rectangle covers the half-open span
//! `[x, x + w) × [y, y + h)`, so two tiles that merely share an edge do not
//! overlap.

use glam::IVec2;

/// An axis-aligned rectangle in playfield pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    /// Top-left corner
    pub pos: IVec2,
    /// Width and height (both positive)
    pub size: IVec2,
}

impl Rect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self {
            pos: IVec2::new(x, y),
            size: IVec2::new(w, h),
        }
    }

    /// Square rectangle at `pos`
    pub fn square(pos: IVec2, side: i32) -> Self {
        Self {
            pos,
            size: IVec2::splat(side),
        }
    }

    #[inline]
    pub fn left(&self) -> i32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> i32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.pos.y + self.size.y
    }

    /// Center point (rounded toward the top-left)
    pub fn center(&self) -> IVec2 {
        self.pos + self.size / 2
    }

    /// Copy of this rectangle displaced by `delta`
    #[inline]
    pub fn translated(&self, delta: IVec2) -> Self {
        Self {
            pos: self.pos + delta,
            size: self.size,
        }
    }

    /// Standard overlap test: true when the interiors intersect
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    /// True when this rectangle lies entirely inside `outer`
    pub fn inside(&self, outer: &Rect) -> bool {
        self.left() >= outer.left()
            && self.right() <= outer.right()
            && self.top() >= outer.top()
            && self.bottom() <= outer.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_overlap() {
        let a = Rect::new(0, 0, 40, 40);
        let b = Rect::new(30, 30, 40, 40);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn test_shared_edge_is_not_overlap() {
        let a = Rect::new(0, 0, 40, 40);
        let right = Rect::new(40, 0, 40, 40);
        let below = Rect::new(0, 40, 40, 40);
        assert!(!a.intersects(&right));
        assert!(!a.intersects(&below));
    }

    #[test]
    fn test_contained_overlaps() {
        let tile = Rect::new(40, 40, 40, 40);
        let token = Rect::new(50, 50, 20, 20);
        assert!(tile.intersects(&token));
        assert!(token.inside(&tile));
        assert!(!tile.inside(&token));
    }

    #[test]
    fn test_edges_and_center() {
        let r = Rect::new(45, 45, 30, 30);
        assert_eq!(r.left(), 45);
        assert_eq!(r.right(), 75);
        assert_eq!(r.bottom(), 75);
        assert_eq!(r.center(), IVec2::new(60, 60));
        assert_eq!(r.translated(IVec2::new(-5, 0)).left(), 40);
    }

    proptest! {
        #[test]
        fn intersects_is_symmetric(
            ax in -100i32..100, ay in -100i32..100, aw in 1i32..60, ah in 1i32..60,
            bx in -100i32..100, by in -100i32..100, bw in 1i32..60, bh in 1i32..60,
        ) {
            let a = Rect::new(ax, ay, aw, ah);
            let b = Rect::new(bx, by, bw, bh);
            prop_assert_eq!(a.intersects(&b), b.intersects(&a));
        }

        #[test]
        fn rect_intersects_itself(x in -100i32..100, y in -100i32..100, w in 1i32..60, h in 1i32..60) {
            let r = Rect::new(x, y, w, h);
            prop_assert!(r.intersects(&r));
            prop_assert!(r.inside(&r));
        }
    }
}
