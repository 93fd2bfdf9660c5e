//! Cardinal directions and the obstacle wandering policy
//!
//! Obstacles walk straight until blocked, then turn. A turn prefers an open
//! sideways direction (never the blocked heading, never straight back) and
//! only reverses when nothing else is open, which keeps them from shuttling
//! back and forth in open corridors.

use glam::IVec2;
use rand::Rng;
use rand::seq::IndexedRandom;

/// One of the four grid-aligned headings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Right,
    Left,
    Down,
    Up,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Right,
        Direction::Left,
        Direction::Down,
        Direction::Up,
    ];

    /// Unit vector in screen space (y grows downward)
    pub fn delta(self) -> IVec2 {
        match self {
            Direction::Right => IVec2::new(1, 0),
            Direction::Left => IVec2::new(-1, 0),
            Direction::Down => IVec2::new(0, 1),
            Direction::Up => IVec2::new(0, -1),
        }
    }

    pub fn reverse(self) -> Self {
        match self {
            Direction::Right => Direction::Left,
            Direction::Left => Direction::Right,
            Direction::Down => Direction::Up,
            Direction::Up => Direction::Down,
        }
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }

    /// Uniformly random heading
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

/// Pick a new heading after `current` was blocked
///
/// `is_open` reports whether a step in a direction would be accepted. The
/// result is a uniformly random open direction other than `current` and its
/// reverse, or the reverse when no such direction is open.
pub fn choose_new_direction<R, F>(current: Direction, rng: &mut R, mut is_open: F) -> Direction
where
    R: Rng + ?Sized,
    F: FnMut(Direction) -> bool,
{
    let reverse = current.reverse();
    let candidates: Vec<Direction> = Direction::ALL
        .into_iter()
        .filter(|&d| d != current && d != reverse)
        .filter(|&d| is_open(d))
        .collect();

    candidates.choose(rng).copied().unwrap_or(reverse)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_reverse_is_involution() {
        for d in Direction::ALL {
            assert_eq!(d.reverse().reverse(), d);
            assert_eq!(d.delta() + d.reverse().delta(), IVec2::ZERO);
        }
    }

    #[test]
    fn test_dead_end_reverses() {
        let mut rng = Pcg32::seed_from_u64(1);
        for _ in 0..50 {
            // Only the way back is open
            let d = choose_new_direction(Direction::Right, &mut rng, |d| d == Direction::Left);
            assert_eq!(d, Direction::Left);
        }
    }

    #[test]
    fn test_fully_enclosed_falls_back_to_reverse() {
        let mut rng = Pcg32::seed_from_u64(2);
        let d = choose_new_direction(Direction::Up, &mut rng, |_| false);
        assert_eq!(d, Direction::Down);
    }

    #[test]
    fn test_prefers_sideways_over_reverse() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut seen_up = false;
        let mut seen_down = false;
        for _ in 0..200 {
            let d = choose_new_direction(Direction::Right, &mut rng, |_| true);
            assert!(d == Direction::Up || d == Direction::Down);
            seen_up |= d == Direction::Up;
            seen_down |= d == Direction::Down;
        }
        assert!(seen_up && seen_down);
    }

    #[test]
    fn test_single_open_side() {
        let mut rng = Pcg32::seed_from_u64(4);
        for _ in 0..20 {
            let d = choose_new_direction(Direction::Down, &mut rng, |d| d != Direction::Right);
            assert_eq!(d, Direction::Left);
        }
    }
}
