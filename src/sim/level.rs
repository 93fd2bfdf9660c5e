//! Level loading: tile grid to live entities
//!
//! A level is built in one pass over the grid. The result is a complete,
//! self-contained snapshot; moving to another level throws the whole snapshot
//! away and builds a new one.

use std::time::Duration;

use rand::Rng;
use rand::seq::IndexedRandom;

use super::state::{MovingObstacle, Player, Token, Wall};
use crate::colors::{self, Rgb};
use crate::consts::DEFAULT_SPAWN_TILE;
use crate::levels::{LevelDescriptor, TileKind};

/// Live entities of one level
#[derive(Debug, Clone)]
pub struct LevelSnapshot {
    pub walls: Vec<Wall>,
    pub player: Player,
    pub tokens: Vec<Token>,
    pub obstacles: Vec<MovingObstacle>,
    /// Every walkable cell as (col, row)
    pub empty_spaces: Vec<(i32, i32)>,
    pub name: String,
    pub description: String,
    pub wall_color: Rgb,
    /// Grid size as (cols, rows)
    pub grid_size: (i32, i32),
}

/// Build a fresh snapshot from a level descriptor
///
/// Never fails: a missing player spawn falls back to a fixed tile, and an
/// obstacle count larger than the free cells just yields fewer obstacles.
pub fn load_level<R: Rng + ?Sized>(
    descriptor: &LevelDescriptor,
    rng: &mut R,
    now: Duration,
) -> LevelSnapshot {
    let (cols, rows) = descriptor.dimensions();

    let mut walls = Vec::new();
    let mut tokens = Vec::new();
    let mut player = None;
    let mut empty_spaces = Vec::new();
    let mut obstacle_spawns = Vec::new();

    for (row, cells) in descriptor.maze.iter().enumerate() {
        for col in 0..cols {
            let (c, r) = (col as i32, row as i32);
            let kind = cells
                .get(col)
                .copied()
                .and_then(TileKind::from_code)
                .unwrap_or(TileKind::Empty);

            match kind {
                TileKind::Wall => walls.push(Wall::at_tile(c, r)),
                TileKind::PlayerSpawn => {
                    if player.is_some() {
                        log::warn!("Level '{}' has more than one player spawn; using the last", descriptor.name);
                    }
                    player = Some(Player::at_tile(c, r));
                }
                TileKind::Token => tokens.push(Token::at_tile(c, r)),
                TileKind::ObstacleSpawn => obstacle_spawns.push((c, r)),
                TileKind::Empty => {}
            }

            if kind.is_walkable() {
                empty_spaces.push((c, r));
            }
        }
    }

    let player = player.unwrap_or_else(|| {
        log::warn!(
            "Level '{}' has no player spawn; using default tile {:?}",
            descriptor.name,
            DEFAULT_SPAWN_TILE
        );
        Player::at_tile(DEFAULT_SPAWN_TILE.0, DEFAULT_SPAWN_TILE.1)
    });

    let obstacles = place_obstacles(descriptor, &obstacle_spawns, &empty_spaces, rng, now);

    LevelSnapshot {
        walls,
        player,
        tokens,
        obstacles,
        empty_spaces,
        name: descriptor.name.clone(),
        description: descriptor.description.clone(),
        wall_color: descriptor.wall_color.unwrap_or(colors::BLUE),
        grid_size: (cols as i32, rows as i32),
    }
}

/// Spawn points first (in grid order), then distinct random free cells
fn place_obstacles<R: Rng + ?Sized>(
    descriptor: &LevelDescriptor,
    spawns: &[(i32, i32)],
    empty_spaces: &[(i32, i32)],
    rng: &mut R,
    now: Duration,
) -> Vec<MovingObstacle> {
    let wanted = descriptor.obstacle_count;
    let speed = descriptor.obstacle_speed;

    let mut cells: Vec<(i32, i32)> = spawns.iter().copied().take(wanted).collect();
    let remaining = wanted - cells.len();
    if remaining > 0 {
        cells.extend(empty_spaces.choose_multiple(rng, remaining).copied());
    }

    if cells.len() < wanted {
        log::warn!(
            "Level '{}' asked for {} obstacles but only {} fit",
            descriptor.name,
            wanted,
            cells.len()
        );
    }

    cells
        .into_iter()
        .map(|(col, row)| MovingObstacle::at_tile(col, row, speed, rng, now))
        .collect()
}
