//! Painting the game state into a canvas
//!
//! Each maze tile is two cells wide and one tall. Entities are placed by the
//! centre of their rectangle, at half-tile resolution horizontally.

use std::time::Duration;

use super::canvas::Canvas;
use crate::assets::{SpriteKind, SpriteSet};
use crate::colors::{self, Rgb};
use crate::consts::TILE_SIZE;
use crate::messages::Anchor;
use crate::sim::{GamePhase, GameState, Rect};

/// Terminal columns per maze tile
pub const CELL_COLUMNS: i32 = 2;
/// Rows above the maze (score/lives, level title)
const HUD_ROWS: i32 = 2;
/// Rows below the maze (description, controls hint)
const FOOTER_ROWS: i32 = 2;
/// Narrowest canvas, so the HUD and hint fit on small mazes
const MIN_WIDTH: i32 = 44;

const PLAYER_GLYPH: char = '@';
const TOKEN_GLYPH: char = '*';
const OBSTACLE_GLYPH: char = 'O';
const HEART_GLYPH: char = '♥';
const LIFE_LOST_TINT: Rgb = [90, 0, 0];

pub const CONTROLS_HINT: &str = "Controls: Arrow Keys to move | ESC: Quit";

/// Entity colors
///
/// Taken from the sprites when they loaded; a missing sprite falls back to the
/// flat color the entity is drawn with when there are no images. Walls with no
/// sprite use the level's tint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub player: Rgb,
    pub wall: Option<Rgb>,
    pub token: Rgb,
    pub obstacle: Rgb,
    pub heart: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            player: colors::GREEN,
            wall: None,
            token: colors::GOLD,
            obstacle: colors::RED,
            heart: colors::RED,
        }
    }
}

impl Palette {
    pub fn from_sprites(sprites: &SpriteSet) -> Self {
        let defaults = Self::default();
        let pick = |kind: SpriteKind| {
            let sprite = sprites.get(kind);
            if sprite.is_placeholder {
                None
            } else {
                sprite.average_color()
            }
        };
        Self {
            player: pick(SpriteKind::Player).unwrap_or(defaults.player),
            wall: pick(SpriteKind::Wall),
            token: pick(SpriteKind::Token).unwrap_or(defaults.token),
            obstacle: pick(SpriteKind::Obstacle).unwrap_or(defaults.obstacle),
            heart: pick(SpriteKind::Heart).unwrap_or(defaults.heart),
        }
    }
}

/// Canvas dimensions for the current level (width, height)
pub fn canvas_size(state: &GameState) -> (u16, u16) {
    let (cols, rows) = state.level.grid_size;
    let width = (cols * CELL_COLUMNS).max(MIN_WIDTH);
    let height = HUD_ROWS + rows + FOOTER_ROWS;
    (width as u16, height as u16)
}

/// Maze placement on the canvas
struct Layout {
    left: i32,
    top: i32,
    rows: i32,
}

impl Layout {
    fn new(canvas: &Canvas, state: &GameState) -> Self {
        let (cols, rows) = state.level.grid_size;
        Self {
            left: (canvas.width() as i32 - cols * CELL_COLUMNS).max(0) / 2,
            top: HUD_ROWS,
            rows,
        }
    }

    /// Canvas cell holding the centre of a rectangle
    fn cell_of(&self, rect: &Rect) -> (i32, i32) {
        let c = rect.center();
        let x = c.x.div_euclid(TILE_SIZE / CELL_COLUMNS);
        let y = c.y.div_euclid(TILE_SIZE);
        (self.left + x, self.top + y)
    }

    /// Canvas origin of a tile
    fn tile_origin(&self, rect: &Rect) -> (i32, i32) {
        let x = rect.pos.x.div_euclid(TILE_SIZE) * CELL_COLUMNS;
        let y = rect.pos.y.div_euclid(TILE_SIZE);
        (self.left + x, self.top + y)
    }

    fn center_row(&self) -> i32 {
        self.top + self.rows / 2
    }

    fn bottom_row(&self) -> i32 {
        self.top + self.rows - 1
    }
}

/// Paint one frame
pub fn draw_scene(canvas: &mut Canvas, state: &GameState, palette: &Palette, show_hint: bool) {
    canvas.clear();
    let layout = Layout::new(canvas, state);
    let now = state.now;
    let level = &state.level;

    if state.phase == GamePhase::Playing && level.player.has_lost_life() {
        for y in layout.top..=layout.bottom_row() {
            for x in 0..canvas.width() as i32 {
                canvas.set_bg(x, y, LIFE_LOST_TINT);
            }
        }
    }

    let wall_color = palette.wall.unwrap_or(level.wall_color);
    for wall in &level.walls {
        let (x, y) = layout.tile_origin(&wall.rect);
        for dx in 0..CELL_COLUMNS {
            canvas.set_bg(x + dx, y, wall_color);
        }
    }

    for token in &level.tokens {
        let (x, y) = layout.cell_of(&token.rect);
        canvas.put(x, y, TOKEN_GLYPH, palette.token);
    }
    for obstacle in &level.obstacles {
        let (x, y) = layout.cell_of(&obstacle.rect);
        canvas.put(x, y, OBSTACLE_GLYPH, palette.obstacle);
    }

    draw_player(canvas, &layout, state, palette, now);
    draw_hud(canvas, state, palette);
    draw_messages(canvas, &layout, state);
    draw_footer(canvas, &layout, state, show_hint);
    draw_overlay(canvas, &layout, state);
}

fn draw_player(canvas: &mut Canvas, layout: &Layout, state: &GameState, palette: &Palette, now: Duration) {
    let player = state.player();
    let (x, y) = layout.cell_of(&player.rect);
    let color = if player.flash_visible(now) {
        palette.player
    } else {
        colors::WHITE
    };
    canvas.put(x, y, PLAYER_GLYPH, color);
}

fn draw_hud(canvas: &mut Canvas, state: &GameState, palette: &Palette) {
    canvas.text(0, 0, &format!("Score: {}", state.score()), colors::WHITE);

    let hearts: String = std::iter::repeat_n(HEART_GLYPH, state.lives() as usize).collect();
    canvas.text_right(0, &hearts, palette.heart);

    let number = (state.level_index + 1).min(state.levels.len());
    let title = format!("Level {number}: {}", state.level.name);
    canvas.text_centered(1, &title, colors::WHITE);
}

/// Top stack grows down from the maze top, bottom stack ends at the maze
/// bottom, centre stack is centred on the middle row
fn draw_messages(canvas: &mut Canvas, layout: &Layout, state: &GameState) {
    let now = state.now;
    let live = |anchor| {
        state
            .messages
            .at(anchor)
            .filter(move |m| m.is_live(now))
            .collect::<Vec<_>>()
    };

    for (i, msg) in live(Anchor::Top).iter().enumerate() {
        canvas.text_centered(layout.top + i as i32, &msg.text, msg.color);
    }

    let bottom = live(Anchor::Bottom);
    let first = layout.bottom_row() + 1 - bottom.len() as i32;
    for (i, msg) in bottom.iter().enumerate() {
        canvas.text_centered(first + i as i32, &msg.text, msg.color);
    }

    // End-of-run overlays repeat the centre banners
    if state.phase.is_terminal() {
        return;
    }
    let center = live(Anchor::Center);
    let first = layout.center_row() - center.len() as i32 / 2;
    for (i, msg) in center.iter().enumerate() {
        canvas.text_centered(first + i as i32, &msg.text, msg.color);
    }
}

fn draw_overlay(canvas: &mut Canvas, layout: &Layout, state: &GameState) {
    let mid = layout.center_row();
    let score = format!("Final Score: {}", state.score());
    match state.phase {
        GamePhase::Playing => {}
        GamePhase::LevelComplete { .. } => {
            canvas.text_centered(mid - 2, "LEVEL COMPLETE", colors::GREEN);
        }
        GamePhase::GameOver => {
            canvas.text_centered(mid - 2, "GAME OVER", colors::RED);
            canvas.text_centered(mid, &score, colors::GOLD);
            canvas.text_centered(mid + 2, "Press R to Restart", colors::WHITE);
        }
        GamePhase::GameComplete => {
            canvas.text_centered(mid - 2, "All Levels Complete!", colors::GREEN);
            canvas.text_centered(mid, &score, colors::GOLD);
            canvas.text_centered(mid + 2, "Want to play again? Press R", colors::WHITE);
        }
    }
}

fn draw_footer(canvas: &mut Canvas, layout: &Layout, state: &GameState, show_hint: bool) {
    let row = layout.bottom_row() + 1;
    canvas.text_centered(row, &state.level.description, colors::WHITE);
    if show_hint {
        canvas.text(0, row + 1, CONTROLS_HINT, colors::WHITE);
    }
}
