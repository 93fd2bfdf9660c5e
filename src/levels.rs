//! Hand-authored level table
//!
//! Levels are stored as JSON (embedded at compile time) so they can be edited
//! without touching code. Each level is a rectangular grid of tile codes plus
//! optional tuning; anything omitted falls back to a sensible default.

use serde::{Deserialize, Serialize};

use crate::LevelError;
use crate::consts::{DEFAULT_OBSTACLE_SPEED, TILE_SIZE};

/// Built-in level data
const BUILTIN_LEVELS: &str = include_str!("../levels/levels.json");

/// What a grid cell holds at load time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileKind {
    Empty,
    Wall,
    PlayerSpawn,
    Token,
    ObstacleSpawn,
}

impl TileKind {
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(TileKind::Empty),
            1 => Some(TileKind::Wall),
            2 => Some(TileKind::PlayerSpawn),
            3 => Some(TileKind::Token),
            4 => Some(TileKind::ObstacleSpawn),
            _ => None,
        }
    }

    pub fn code(self) -> u8 {
        match self {
            TileKind::Empty => 0,
            TileKind::Wall => 1,
            TileKind::PlayerSpawn => 2,
            TileKind::Token => 3,
            TileKind::ObstacleSpawn => 4,
        }
    }

    /// Every non-wall cell can be walked on
    pub fn is_walkable(self) -> bool {
        self != TileKind::Wall
    }
}

fn default_obstacle_speed() -> i32 {
    DEFAULT_OBSTACLE_SPEED
}

fn default_name() -> String {
    "Unnamed Level".to_string()
}

/// One level as authored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelDescriptor {
    /// Row-major tile codes (see [`TileKind`])
    pub maze: Vec<Vec<u8>>,
    /// RGB wall tint (blue when absent)
    #[serde(default)]
    pub wall_color: Option<[u8; 3]>,
    /// Obstacles to place at load
    #[serde(default)]
    pub obstacle_count: usize,
    /// Obstacle displacement per move tick
    #[serde(default = "default_obstacle_speed")]
    pub obstacle_speed: i32,
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl LevelDescriptor {
    /// Descriptor with default tuning around a grid
    pub fn new(maze: Vec<Vec<u8>>) -> Self {
        Self {
            maze,
            wall_color: None,
            obstacle_count: 0,
            obstacle_speed: DEFAULT_OBSTACLE_SPEED,
            name: default_name(),
            description: String::new(),
        }
    }

    pub fn with_obstacles(mut self, count: usize, speed: i32) -> Self {
        self.obstacle_count = count;
        self.obstacle_speed = speed;
        self
    }

    pub fn with_name(mut self, name: &str, description: &str) -> Self {
        self.name = name.to_string();
        self.description = description.to_string();
        self
    }

    /// Grid dimensions as (cols, rows), taken from the first row
    pub fn dimensions(&self) -> (usize, usize) {
        let cols = self.maze.first().map_or(0, Vec::len);
        (cols, self.maze.len())
    }

    fn validate(&self, level: usize) -> Result<(), LevelError> {
        let (cols, rows) = self.dimensions();
        if rows == 0 || cols == 0 {
            return Err(LevelError::EmptyGrid { level });
        }
        // A step of a whole tile or more could carry an obstacle through a wall
        if !(1..TILE_SIZE).contains(&self.obstacle_speed) {
            return Err(LevelError::ObstacleSpeed {
                level,
                speed: self.obstacle_speed,
            });
        }

        for (row, cells) in self.maze.iter().enumerate() {
            if cells.len() != cols {
                return Err(LevelError::RaggedRow {
                    level,
                    row,
                    expected: cols,
                    found: cells.len(),
                });
            }
            if let Some((col, &code)) = cells
                .iter()
                .enumerate()
                .find(|(_, c)| TileKind::from_code(**c).is_none())
            {
                return Err(LevelError::UnknownTile {
                    level,
                    row,
                    col,
                    code,
                });
            }
        }

        Ok(())
    }
}

/// Ordered, validated sequence of levels
#[derive(Debug, Clone, PartialEq)]
pub struct LevelTable {
    levels: Vec<LevelDescriptor>,
}

impl LevelTable {
    /// Validate and wrap a list of levels
    pub fn new(levels: Vec<LevelDescriptor>) -> Result<Self, LevelError> {
        if levels.is_empty() {
            return Err(LevelError::Empty);
        }
        for (i, level) in levels.iter().enumerate() {
            level.validate(i)?;
        }
        Ok(Self { levels })
    }

    /// Parse a JSON array of level descriptors
    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        let levels: Vec<LevelDescriptor> = serde_json::from_str(json)?;
        Self::new(levels)
    }

    /// The levels shipped with the game
    pub fn builtin() -> Result<Self, LevelError> {
        let table = Self::from_json(BUILTIN_LEVELS)?;
        log::debug!("Loaded {} built-in levels", table.len());
        Ok(table)
    }

    /// Opening level (a table is never empty)
    pub fn first(&self) -> &LevelDescriptor {
        &self.levels[0]
    }

    pub fn get(&self, index: usize) -> Option<&LevelDescriptor> {
        self.levels.get(index)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LevelDescriptor> {
        self.levels.iter()
    }
}
