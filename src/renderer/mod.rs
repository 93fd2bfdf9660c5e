//! Terminal rendering module
//!
//! `scene` paints a `GameState` into a `Canvas` of colored character cells
//! without touching the terminal; `terminal` pushes a finished canvas to the
//! screen with crossterm.

pub mod canvas;
pub mod scene;
pub mod terminal;

pub use canvas::{Canvas, Cell};
pub use scene::{Palette, canvas_size, draw_scene};
pub use terminal::TerminalRenderer;
