//! Maze Runner - A top-down tile-maze arcade game
//!
//! Core modules:
//! - `sim`: Frame simulation (movement, collisions, lives, level progression)
//! - `levels`: Static hand-authored level table
//! - `messages`: Time-expiring on-screen notifications
//! - `assets`: Sprite loading with placeholder fallback
//! - `input`: Keyboard mapping for the terminal frontend
//! - `renderer`: Terminal presentation
//! - `settings`: Runtime configuration

pub mod assets;
pub mod error;
pub mod input;
pub mod levels;
pub mod messages;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::LevelError;
pub use levels::{LevelDescriptor, LevelTable, TileKind};
pub use messages::{Anchor, Message, MessageQueue};
pub use settings::Settings;

use glam::IVec2;

/// Game configuration constants
pub mod consts {
    use std::time::Duration;

    /// Target update rate (frames per second)
    pub const TARGET_FPS: u32 = 60;

    /// Playfield dimensions in pixels
    pub const SCREEN_WIDTH: i32 = 800;
    pub const SCREEN_HEIGHT: i32 = 600;

    /// Edge length of one grid cell
    pub const TILE_SIZE: i32 = 40;

    /// Entity sizes (square)
    pub const PLAYER_SIZE: i32 = 30;
    pub const TOKEN_SIZE: i32 = 20;
    pub const OBSTACLE_SIZE: i32 = 25;
    pub const HEART_SIZE: i32 = 25;

    /// Player displacement per frame while a direction key is held
    pub const PLAYER_SPEED: i32 = 5;
    /// Lives at the start of a run
    pub const STARTING_LIVES: u32 = 3;
    /// Hit immunity after an obstacle contact
    pub const INVULNERABLE_DURATION: Duration = Duration::from_millis(1500);

    /// Obstacle displacement per move tick when the level doesn't say
    pub const DEFAULT_OBSTACLE_SPEED: i32 = 2;
    /// Real-time cadence of obstacle move ticks
    pub const OBSTACLE_MOVE_INTERVAL: Duration = Duration::from_millis(30);

    /// Points per collected token
    pub const TOKEN_SCORE: u64 = 10;
    /// Points for clearing a level
    pub const LEVEL_BONUS: u64 = 10;
    /// Pause between clearing a level and loading the next
    pub const LEVEL_TRANSITION_PAUSE: Duration = Duration::from_secs(2);

    /// Tile used for the player when a level has no spawn tile (col, row)
    pub const DEFAULT_SPAWN_TILE: (i32, i32) = (1, 1);
}

/// RGB palette shared by the simulation's notifications and the renderer
pub mod colors {
    pub type Rgb = [u8; 3];

    pub const BLACK: Rgb = [0, 0, 0];
    pub const WHITE: Rgb = [255, 255, 255];
    pub const GREEN: Rgb = [0, 255, 0];
    pub const BLUE: Rgb = [0, 0, 255];
    pub const RED: Rgb = [255, 0, 0];
    pub const GOLD: Rgb = [255, 215, 0];
    /// Missing-texture fill
    pub const MAGENTA: Rgb = [255, 0, 255];
}

/// Top-left pixel of a grid cell
#[inline]
pub fn tile_to_pixel(col: i32, row: i32) -> IVec2 {
    IVec2::new(col * consts::TILE_SIZE, row * consts::TILE_SIZE)
}

/// Top-left pixel that centers an entity of `size` inside a grid cell
#[inline]
pub fn centered_in_tile(col: i32, row: i32, size: i32) -> IVec2 {
    let inset = (consts::TILE_SIZE - size) / 2;
    tile_to_pixel(col, row) + IVec2::splat(inset)
}
