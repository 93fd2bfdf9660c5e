//! Keyboard input for the terminal frontend
//!
//! Direction keys are tracked as held/released and turned into `Steer`
//! commands for the simulation. Terminals with the keyboard enhancement
//! protocol report real releases; on the rest a key only repeats while held,
//! so a direction that hasn't been seen for `HOLD_WINDOW` is released for it.

use std::collections::HashMap;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::sim::{Direction, Steer, TickInput};

/// Silence after which a held key counts as released (no release events).
/// OS key repeat runs at 15Hz or faster, so this is refreshed while held.
pub const HOLD_WINDOW: Duration = Duration::from_millis(150);

/// What a key means to the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Move(Direction),
    Quit,
    Restart,
    Advance,
}

/// Map a key to its action; unknown keys are ignored
pub fn map_key(code: KeyCode, modifiers: KeyModifiers) -> Option<KeyAction> {
    match code {
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
            Some(KeyAction::Move(Direction::Right))
        }
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => {
            Some(KeyAction::Move(Direction::Left))
        }
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => {
            Some(KeyAction::Move(Direction::Down))
        }
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => {
            Some(KeyAction::Move(Direction::Up))
        }
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Some(KeyAction::Quit),
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => Some(KeyAction::Quit),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(KeyAction::Restart),
        KeyCode::Char('n') | KeyCode::Char('N') => Some(KeyAction::Advance),
        _ => None,
    }
}

/// Collects one frame's worth of key events into a `TickInput`
#[derive(Debug)]
pub struct KeyTracker {
    /// Held direction -> last time a press/repeat was seen
    held: HashMap<Direction, Duration>,
    /// Terminal reports key releases
    release_events: bool,
    input: TickInput,
    quit: bool,
}

impl KeyTracker {
    pub fn new(release_events: bool) -> Self {
        Self {
            held: HashMap::new(),
            release_events,
            input: TickInput::default(),
            quit: false,
        }
    }

    /// Feed one key event received at `now`
    pub fn handle(&mut self, event: &KeyEvent, now: Duration) {
        let Some(action) = map_key(event.code, event.modifiers) else {
            return;
        };

        match (action, event.kind) {
            // Every press/repeat is forwarded: the simulation drops presses
            // outside play, so a key held across a level load has to steer
            // the fresh player on its next repeat
            (KeyAction::Move(dir), KeyEventKind::Press | KeyEventKind::Repeat) => {
                self.held.insert(dir, now);
                self.input.steer.push(Steer::Press(dir));
            }
            (KeyAction::Move(dir), KeyEventKind::Release) => {
                if self.held.remove(&dir).is_some() {
                    self.input.steer.push(Steer::Release(dir));
                }
            }
            (KeyAction::Quit, KeyEventKind::Press) => self.quit = true,
            (KeyAction::Restart, KeyEventKind::Press) => self.input.restart = true,
            (KeyAction::Advance, KeyEventKind::Press) => self.input.advance = true,
            _ => {}
        }
    }

    /// Quit was pressed
    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    pub fn is_held(&self, dir: Direction) -> bool {
        self.held.contains_key(&dir)
    }

    /// Input for this frame; resets for the next one
    pub fn take_input(&mut self, now: Duration) -> TickInput {
        if !self.release_events {
            let stale: Vec<Direction> = self
                .held
                .iter()
                .filter(|&(_, &seen)| now.saturating_sub(seen) > HOLD_WINDOW)
                .map(|(&dir, _)| dir)
                .collect();
            for dir in stale {
                self.held.remove(&dir);
                self.input.steer.push(Steer::Release(dir));
            }
        }
        std::mem::take(&mut self.input)
    }
}
