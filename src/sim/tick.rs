//! Per-frame simulation step
//!
//! The frontend samples a monotonic clock once per frame and passes the
//! reading in; every timer (invulnerability, obstacle cadence, the pause
//! between levels) compares against that value rather than counting frames.

use std::time::Duration;

use super::collision::{Collider, screen_bounds};
use super::motion::Direction;
use super::state::{GameEvent, GamePhase, GameState};
use crate::colors;
use crate::consts::*;
use crate::messages::{Anchor, DEFAULT_MESSAGE_DURATION};

/// A direction key edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Steer {
    Press(Direction),
    Release(Direction),
}

/// Input commands for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Direction key presses/releases, in arrival order
    pub steer: Vec<Steer>,
    /// Start over from the first level (game over / complete only)
    pub restart: bool,
    /// Skip the rest of the level-complete pause
    pub advance: bool,
}

/// Advance the session by one frame
pub fn tick(state: &mut GameState, input: &TickInput, now: Duration) {
    state.now = now;

    // Releases always land; presses only steer during play
    let playing = state.phase == GamePhase::Playing;
    for steer in &input.steer {
        match *steer {
            Steer::Press(dir) if playing => state.level.player.press(dir),
            Steer::Release(dir) => state.level.player.release(dir),
            Steer::Press(_) => {}
        }
    }

    match state.phase {
        GamePhase::Playing => step_playing(state, now),
        GamePhase::LevelComplete { deadline } => {
            if input.advance || now >= deadline {
                advance_level(state, now);
            }
        }
        GamePhase::GameOver | GamePhase::GameComplete => {
            if input.restart {
                restart(state, now);
            }
        }
    }

    state.messages.expire(now);
}

/// Player, obstacles, tokens, then lives and completion checks
fn step_playing(state: &mut GameState, now: Duration) {
    let bounds = screen_bounds();
    let level = &mut state.level;

    if level.player.update(&level.walls, &level.obstacles, now) {
        state.events.push(GameEvent::PlayerHit {
            lives: level.player.lives,
        });
        state.messages.push(
            "Ouch! Hit by an obstacle!",
            colors::RED,
            DEFAULT_MESSAGE_DURATION,
            Anchor::Bottom,
            now,
        );
    }
    if level.player.has_lost_life() {
        state.messages.push(
            "Life lost!",
            colors::RED,
            INVULNERABLE_DURATION,
            Anchor::Center,
            now,
        );
    }

    for obstacle in &mut level.obstacles {
        obstacle.update(&level.walls, &bounds, now, &mut state.rng);
    }

    let player = &mut level.player;
    level.tokens.retain(|token| {
        if player.overlaps(token) {
            player.score += TOKEN_SCORE;
            state.events.push(GameEvent::TokenCollected {
                score: player.score,
            });
            false
        } else {
            true
        }
    });

    if player.lives == 0 {
        let score = player.score;
        log::info!("Game over with score {score}");
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::GameOver { score });
        state.messages.add_game_over(score, now);
        return;
    }

    if level.tokens.is_empty() {
        player.score += LEVEL_BONUS;
        player.stop();
        let score = player.score;
        log::info!("Level {} cleared, score {score}", state.level_index + 1);
        state.events.push(GameEvent::LevelCleared {
            level: state.level_index,
            score,
        });
        state.messages.push(
            format!("Level Complete! +{LEVEL_BONUS} points"),
            colors::GREEN,
            LEVEL_TRANSITION_PAUSE,
            Anchor::Center,
            now,
        );
        state.phase = GamePhase::LevelComplete {
            deadline: now + LEVEL_TRANSITION_PAUSE,
        };
    }
}

/// Load the next level, or finish the run when none remain
pub fn advance_level(state: &mut GameState, now: Duration) {
    let score = state.score();
    let lives = state.lives();
    let next = state.level_index + 1;

    if !state.enter_level(next, score, lives, now) {
        log::info!("All {} levels complete, final score {score}", state.levels.len());
        state.level_index = state.levels.len();
        state.phase = GamePhase::GameComplete;
        state.events.push(GameEvent::GameComplete { score });
        state.messages.add_game_complete(score, now);
    }
}

/// Fresh run from the first level
pub fn restart(state: &mut GameState, now: Duration) {
    log::info!("Restarting from level 1");
    state.enter_level(0, 0, STARTING_LIVES, now);
}
