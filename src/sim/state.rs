//! Entity models and the game session
//!
//! Entities are plain records with their own per-frame rules; the session
//! (`GameState`) owns the current level snapshot, the phase machine, the RNG
//! and the notification queue. Nothing here is global.

use std::time::Duration;

use glam::IVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::collision::{Collider, try_move};
use super::level::{LevelSnapshot, load_level};
use super::motion::{Direction, choose_new_direction};
use super::rect::Rect;
use crate::consts::*;
use crate::levels::LevelTable;
use crate::messages::MessageQueue;
use crate::{centered_in_tile, colors, messages::Anchor, tile_to_pixel};

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Level cleared; the next level loads once `deadline` passes
    LevelComplete { deadline: Duration },
    /// Out of lives
    GameOver,
    /// Every level cleared
    GameComplete,
}

impl GamePhase {
    /// Phases in which only restart is accepted
    pub fn is_terminal(&self) -> bool {
        matches!(self, GamePhase::GameOver | GamePhase::GameComplete)
    }
}

/// Notable things that happened during a tick (drained by the frontend)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    TokenCollected { score: u64 },
    PlayerHit { lives: u32 },
    LevelCleared { level: usize, score: u64 },
    LevelLoaded { level: usize },
    GameOver { score: u64 },
    GameComplete { score: u64 },
}

/// The player's avatar
#[derive(Debug, Clone)]
pub struct Player {
    pub rect: Rect,
    /// Per-frame displacement, each axis in {-speed, 0, +speed}
    pub velocity: IVec2,
    pub speed: i32,
    pub score: u64,
    pub lives: u32,
    pub invulnerable: bool,
    /// Clock reading of the hit that started invulnerability
    pub invulnerable_since: Duration,
    /// Lives before this frame's update
    pub previous_lives: u32,
}

impl Player {
    pub fn new(pos: IVec2) -> Self {
        Self {
            rect: Rect::square(pos, PLAYER_SIZE),
            velocity: IVec2::ZERO,
            speed: PLAYER_SPEED,
            score: 0,
            lives: STARTING_LIVES,
            invulnerable: false,
            invulnerable_since: Duration::ZERO,
            previous_lives: STARTING_LIVES,
        }
    }

    /// Player centered in a grid cell
    pub fn at_tile(col: i32, row: i32) -> Self {
        Self::new(centered_in_tile(col, row, PLAYER_SIZE))
    }

    /// Direction key pressed: drive that axis
    pub fn press(&mut self, dir: Direction) {
        let d = dir.delta() * self.speed;
        if dir.is_horizontal() {
            self.velocity.x = d.x;
        } else {
            self.velocity.y = d.y;
        }
    }

    /// Direction key released: stop that axis only if it's still moving that way
    pub fn release(&mut self, dir: Direction) {
        match dir {
            Direction::Left if self.velocity.x < 0 => self.velocity.x = 0,
            Direction::Right if self.velocity.x > 0 => self.velocity.x = 0,
            Direction::Up if self.velocity.y < 0 => self.velocity.y = 0,
            Direction::Down if self.velocity.y > 0 => self.velocity.y = 0,
            _ => {}
        }
    }

    pub fn stop(&mut self) {
        self.velocity = IVec2::ZERO;
    }

    /// Advance one frame: move against walls, then resolve obstacle contact
    ///
    /// Returns true when an obstacle hit cost a life this frame.
    pub fn update(&mut self, walls: &[Wall], obstacles: &[MovingObstacle], now: Duration) -> bool {
        if self.velocity != IVec2::ZERO {
            self.rect = try_move(&self.rect, self.velocity, walls, None).rect;
        }

        self.previous_lives = self.lives;

        if self.invulnerable && now.saturating_sub(self.invulnerable_since) >= INVULNERABLE_DURATION {
            self.invulnerable = false;
        }
        if self.invulnerable {
            return false;
        }

        if obstacles.iter().any(|o| self.overlaps(o)) {
            self.lives = self.lives.saturating_sub(1);
            self.invulnerable = true;
            self.invulnerable_since = now;
            return true;
        }

        false
    }

    /// Lives dropped during the last update
    pub fn has_lost_life(&self) -> bool {
        self.lives < self.previous_lives
    }

    /// Blink phase while invulnerable (300 ms period, dimmed for the first half)
    pub fn flash_visible(&self, now: Duration) -> bool {
        !self.invulnerable || now.as_millis() % 300 >= 150
    }
}

impl Collider for Player {
    fn rect(&self) -> &Rect {
        &self.rect
    }
}

/// A solid maze tile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wall {
    pub rect: Rect,
}

impl Wall {
    pub fn at_tile(col: i32, row: i32) -> Self {
        Self {
            rect: Rect::square(tile_to_pixel(col, row), TILE_SIZE),
        }
    }
}

impl Collider for Wall {
    fn rect(&self) -> &Rect {
        &self.rect
    }
}

/// A collectible, centered in its tile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub rect: Rect,
}

impl Token {
    pub fn at_tile(col: i32, row: i32) -> Self {
        Self {
            rect: Rect::square(centered_in_tile(col, row, TOKEN_SIZE), TOKEN_SIZE),
        }
    }
}

impl Collider for Token {
    fn rect(&self) -> &Rect {
        &self.rect
    }
}

/// A wandering hazard
#[derive(Debug, Clone)]
pub struct MovingObstacle {
    pub rect: Rect,
    pub direction: Direction,
    pub speed: i32,
    /// Clock reading of the last move tick
    pub last_move: Duration,
}

impl MovingObstacle {
    /// Obstacle centered in a grid cell, heading in a random direction
    pub fn at_tile<R: Rng + ?Sized>(col: i32, row: i32, speed: i32, rng: &mut R, now: Duration) -> Self {
        Self {
            rect: Rect::square(centered_in_tile(col, row, OBSTACLE_SIZE), OBSTACLE_SIZE),
            direction: Direction::random(rng),
            speed,
            last_move: now,
        }
    }

    /// Step along the current heading if the move interval has elapsed
    ///
    /// Blocked steps are rolled back and the heading changes. Returns true if
    /// a move tick happened (whether or not the step was blocked).
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        walls: &[Wall],
        bounds: &Rect,
        now: Duration,
        rng: &mut R,
    ) -> bool {
        if now.saturating_sub(self.last_move) < OBSTACLE_MOVE_INTERVAL {
            return false;
        }
        self.last_move = now;

        let result = try_move(&self.rect, self.direction.delta() * self.speed, walls, Some(bounds));
        if result.hit {
            // A heading is open when the whole next tile that way is free
            let rect = self.rect;
            self.direction = choose_new_direction(self.direction, rng, |d| {
                !try_move(&rect, d.delta() * TILE_SIZE, walls, Some(bounds)).hit
            });
        } else {
            self.rect = result.rect;
        }

        true
    }
}

impl Collider for MovingObstacle {
    fn rect(&self) -> &Rect {
        &self.rect
    }
}

/// The whole session: level table, current snapshot and phase
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the session RNG was built from
    pub seed: u64,
    pub rng: Pcg32,
    pub levels: LevelTable,
    /// Index of the active level (== `levels.len()` once complete)
    pub level_index: usize,
    /// Live entities of the active level
    pub level: LevelSnapshot,
    pub phase: GamePhase,
    pub messages: MessageQueue,
    /// Events since the frontend last drained them
    pub events: Vec<GameEvent>,
    /// Clock reading of the most recent tick
    pub now: Duration,
}

impl GameState {
    /// Start a session on the first level
    pub fn new(levels: LevelTable, seed: u64, now: Duration) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let level = load_level(levels.first(), &mut rng, now);

        let mut state = Self {
            seed,
            rng,
            levels,
            level_index: 0,
            level,
            phase: GamePhase::Playing,
            messages: MessageQueue::new(),
            events: Vec::new(),
            now,
        };
        state.announce_level(now);
        state
    }

    pub fn player(&self) -> &Player {
        &self.level.player
    }

    pub fn score(&self) -> u64 {
        self.level.player.score
    }

    pub fn lives(&self) -> u32 {
        self.level.player.lives
    }

    /// Replace the snapshot with a fresh build of level `index`
    ///
    /// Score and lives are carried over from the outgoing player; everything
    /// else (walls, tokens, obstacles, invulnerability) starts over.
    pub(crate) fn enter_level(&mut self, index: usize, score: u64, lives: u32, now: Duration) -> bool {
        let Some(descriptor) = self.levels.get(index).cloned() else {
            return false;
        };

        let mut level = load_level(&descriptor, &mut self.rng, now);
        level.player.score = score;
        level.player.lives = lives;
        level.player.previous_lives = lives;

        self.level = level;
        self.level_index = index;
        self.phase = GamePhase::Playing;
        self.events.push(GameEvent::LevelLoaded { level: index });
        self.announce_level(now);
        true
    }

    fn announce_level(&mut self, now: Duration) {
        log::info!(
            "Level {} loaded: {} ({} tokens, {} obstacles)",
            self.level_index + 1,
            self.level.name,
            self.level.tokens.len(),
            self.level.obstacles.len()
        );
        self.messages.push(
            format!("Level {}: {}", self.level_index + 1, self.level.name),
            colors::WHITE,
            crate::messages::DEFAULT_MESSAGE_DURATION,
            Anchor::Top,
            now,
        );
    }

    /// Hand pending events to the caller
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::collision::screen_bounds;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn test_press_and_release_per_axis() {
        let mut p = Player::at_tile(1, 1);
        p.press(Direction::Left);
        p.press(Direction::Down);
        assert_eq!(p.velocity, IVec2::new(-PLAYER_SPEED, PLAYER_SPEED));

        // Opposite key pressed, then the first one released: keep the newer
        p.press(Direction::Right);
        p.release(Direction::Left);
        assert_eq!(p.velocity.x, PLAYER_SPEED);

        p.release(Direction::Right);
        assert_eq!(p.velocity.x, 0);
        p.release(Direction::Up);
        assert_eq!(p.velocity.y, PLAYER_SPEED);
        p.release(Direction::Down);
        assert_eq!(p.velocity, IVec2::ZERO);
    }

    #[test]
    fn test_player_blocked_by_wall() {
        let walls = vec![Wall::at_tile(2, 1)];
        let mut p = Player::at_tile(1, 1);
        p.press(Direction::Right);
        for _ in 0..10 {
            p.update(&walls, &[], Duration::ZERO);
            assert!(!walls.iter().any(|w| p.overlaps(w)));
        }
        // Right edge flush against the wall tile at x = 80
        assert_eq!(p.rect.right(), 80);
    }

    #[test]
    fn test_hit_costs_one_life_then_grace() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut p = Player::at_tile(1, 1);
        let obstacles = vec![MovingObstacle::at_tile(1, 1, 2, &mut rng, Duration::ZERO)];

        assert!(p.update(&[], &obstacles, ms(1000)));
        assert_eq!(p.lives, 2);
        assert!(p.has_lost_life());
        assert!(p.invulnerable);

        // Still touching, still immune
        for t in (1016..2500).step_by(16) {
            assert!(!p.update(&[], &obstacles, ms(t)));
            assert!(!p.has_lost_life());
        }
        assert_eq!(p.lives, 2);

        // Immunity over at T + 1.5s
        assert!(p.update(&[], &obstacles, ms(2500)));
        assert_eq!(p.lives, 1);
    }

    #[test]
    fn test_lives_floor_at_zero() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut p = Player::at_tile(1, 1);
        p.lives = 0;
        p.previous_lives = 0;
        let obstacles = vec![MovingObstacle::at_tile(1, 1, 2, &mut rng, Duration::ZERO)];
        p.update(&[], &obstacles, ms(10));
        assert_eq!(p.lives, 0);
    }

    #[test]
    fn test_flash_phase() {
        let mut p = Player::at_tile(1, 1);
        assert!(p.flash_visible(ms(0)));
        p.invulnerable = true;
        assert!(!p.flash_visible(ms(100)));
        assert!(p.flash_visible(ms(200)));
    }

    #[test]
    fn test_obstacle_respects_move_interval() {
        let mut rng = Pcg32::seed_from_u64(11);
        let mut o = MovingObstacle::at_tile(5, 5, 2, &mut rng, Duration::ZERO);
        o.direction = Direction::Right;
        let start = o.rect.pos;
        let bounds = screen_bounds();

        assert!(!o.update(&[], &bounds, ms(16), &mut rng));
        assert_eq!(o.rect.pos, start);

        assert!(o.update(&[], &bounds, ms(32), &mut rng));
        assert_eq!(o.rect.pos, start + IVec2::new(2, 0));

        // Next tick measured from the last move, not from spawn
        assert!(!o.update(&[], &bounds, ms(48), &mut rng));
        assert!(o.update(&[], &bounds, ms(62), &mut rng));
        assert_eq!(o.rect.pos, start + IVec2::new(4, 0));
    }

    #[test]
    fn test_obstacle_dead_end_reverses() {
        // Dead end opening to the left: walls above, below and to the right
        let walls = vec![Wall::at_tile(3, 1), Wall::at_tile(2, 0), Wall::at_tile(2, 2)];
        let mut rng = Pcg32::seed_from_u64(5);
        let bounds = screen_bounds();

        for _ in 0..20 {
            let mut o = MovingObstacle::at_tile(2, 1, 2, &mut rng, Duration::ZERO);
            o.direction = Direction::Right;
            // Walk into the end wall
            let mut t = 30;
            while o.direction == Direction::Right {
                o.update(&walls, &bounds, ms(t), &mut rng);
                t += 30;
            }
            assert_eq!(o.direction, Direction::Left);
            assert!(!walls.iter().any(|w| o.overlaps(w)));
        }
    }

    #[test]
    fn test_obstacle_turns_at_screen_edge() {
        let mut rng = Pcg32::seed_from_u64(9);
        let mut o = MovingObstacle::at_tile(0, 5, 2, &mut rng, Duration::ZERO);
        o.direction = Direction::Left;
        let bounds = screen_bounds();
        let mut t = 0;
        for _ in 0..10 {
            t += 30;
            o.update(&[], &bounds, ms(t), &mut rng);
            assert!(o.rect.inside(&bounds));
        }
        assert_ne!(o.direction, Direction::Left);
    }
}
