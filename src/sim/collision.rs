//! Discrete move-then-veto movement against static walls
//!
//! An entity is displaced by its whole per-step delta, the new rectangle is
//! tested against every wall (and optionally the playfield bounds), and on any
//! overlap the move is discarded. There is no sweeping: per-step speeds are
//! kept well below wall thickness so nothing can tunnel.

use glam::IVec2;

use super::rect::Rect;
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};

/// Anything that occupies a rectangle in the maze
pub trait Collider {
    fn rect(&self) -> &Rect;

    /// Overlap test between any two colliders
    fn overlaps<C: Collider + ?Sized>(&self, other: &C) -> bool {
        self.rect().intersects(other.rect())
    }
}

impl Collider for Rect {
    fn rect(&self) -> &Rect {
        self
    }
}

/// The full playfield, used to confine obstacles
pub fn screen_bounds() -> Rect {
    Rect::new(0, 0, SCREEN_WIDTH, SCREEN_HEIGHT)
}

/// Result of a tentative move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionResult {
    /// Whether the move was vetoed
    pub hit: bool,
    /// Committed rectangle (the original one when `hit`)
    pub rect: Rect,
}

/// True if `rect` overlaps any of `walls`
pub fn hits_any<C: Collider>(rect: &Rect, walls: &[C]) -> bool {
    walls.iter().any(|w| rect.intersects(w.rect()))
}

/// Displace `rect` by `delta` unless the result overlaps a wall or leaves `bounds`
pub fn try_move<C: Collider>(
    rect: &Rect,
    delta: IVec2,
    walls: &[C],
    bounds: Option<&Rect>,
) -> CollisionResult {
    let moved = rect.translated(delta);

    let out_of_bounds = bounds.is_some_and(|b| !moved.inside(b));
    if out_of_bounds || hits_any(&moved, walls) {
        return CollisionResult {
            hit: true,
            rect: *rect,
        };
    }

    CollisionResult {
        hit: false,
        rect: moved,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn corridor_walls() -> Vec<Rect> {
        // Horizontal corridor on row 1 between walls on rows 0 and 2
        (0..5)
            .flat_map(|col| [Rect::new(col * 40, 0, 40, 40), Rect::new(col * 40, 80, 40, 40)])
            .collect()
    }

    #[test]
    fn test_free_move_commits() {
        let walls = corridor_walls();
        let player = Rect::new(45, 45, 30, 30);
        let result = try_move(&player, IVec2::new(5, 0), &walls, None);
        assert!(!result.hit);
        assert_eq!(result.rect.pos, IVec2::new(50, 45));
    }

    #[test]
    fn test_wall_vetoes_move() {
        let walls = corridor_walls();
        let player = Rect::new(45, 45, 30, 30);
        // 5px up puts the top edge at 40, touching but not entering the wall
        let result = try_move(&player, IVec2::new(0, -5), &walls, None);
        assert!(!result.hit);
        // Another 5px enters the wall row and is rolled back
        let result = try_move(&result.rect, IVec2::new(0, -5), &walls, None);
        assert!(result.hit);
        assert_eq!(result.rect.pos, IVec2::new(45, 40));
    }

    #[test]
    fn test_diagonal_move_is_all_or_nothing() {
        let walls = corridor_walls();
        let player = Rect::new(45, 40, 30, 30);
        // The x component alone would be fine; the y component is not
        let result = try_move(&player, IVec2::new(5, -5), &walls, None);
        assert!(result.hit);
        assert_eq!(result.rect, player);
    }

    #[test]
    fn test_bounds_veto() {
        let walls: Vec<Rect> = Vec::new();
        let bounds = screen_bounds();
        let obstacle = Rect::new(774, 7, 25, 25);
        let result = try_move(&obstacle, IVec2::new(1, 0), &walls, Some(&bounds));
        assert!(!result.hit);
        let result = try_move(&result.rect, IVec2::new(1, 0), &walls, Some(&bounds));
        assert!(result.hit);
        assert_eq!(result.rect.right(), SCREEN_WIDTH);
    }

    #[test]
    fn test_overlaps_trait() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(5, 5, 10, 10);
        assert!(a.overlaps(&b));
    }

    proptest! {
        #[test]
        fn committed_rect_never_overlaps_walls(
            x in 40i32..160, y in 40i32..50, dx in -8i32..=8, dy in -8i32..=8,
        ) {
            let walls = corridor_walls();
            let start = Rect::new(x, y, 30, 30);
            prop_assume!(!hits_any(&start, &walls));
            let result = try_move(&start, IVec2::new(dx, dy), &walls, None);
            prop_assert!(!hits_any(&result.rect, &walls));
        }
    }
}
