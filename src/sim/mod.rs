//! Frame simulation module
//!
//! All gameplay logic lives here:
//! - Discrete move-then-veto movement against walls
//! - Obstacle wandering on a real-time cadence
//! - Lives, invulnerability, score and level progression
//! - No rendering or terminal dependencies

pub mod collision;
pub mod level;
pub mod motion;
pub mod rect;
pub mod state;
pub mod tick;

pub use collision::{Collider, CollisionResult, screen_bounds, try_move};
pub use level::{LevelSnapshot, load_level};
pub use motion::{Direction, choose_new_direction};
pub use rect::Rect;
pub use state::{GameEvent, GamePhase, GameState, MovingObstacle, Player, Token, Wall};
pub use tick::{Steer, TickInput, advance_level, restart, tick};
