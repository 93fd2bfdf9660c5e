//! Pushing canvases to the terminal

use std::io::Write;

use crossterm::{
    QueueableCommand, cursor,
    style::{self, Color, Print},
    terminal,
};

use super::canvas::Canvas;
use super::scene::{Palette, canvas_size, draw_scene};
use crate::colors::Rgb;
use crate::sim::GameState;

fn to_color([r, g, b]: Rgb) -> Color {
    Color::Rgb { r, g, b }
}

/// Owns the frame buffer and redraws it each frame
pub struct TerminalRenderer {
    canvas: Canvas,
    palette: Palette,
    show_hint: bool,
    /// Clear the whole screen before the next frame
    needs_clear: bool,
}

impl TerminalRenderer {
    pub fn new(palette: Palette, show_hint: bool) -> Self {
        Self {
            canvas: Canvas::new(0, 0),
            palette,
            show_hint,
            needs_clear: true,
        }
    }

    /// Force a full clear (after a terminal resize)
    pub fn invalidate(&mut self) {
        self.needs_clear = true;
    }

    /// Paint and flush one frame
    pub fn render<W: Write>(&mut self, out: &mut W, state: &GameState) -> std::io::Result<()> {
        let (w, h) = canvas_size(state);
        if (self.canvas.width(), self.canvas.height()) != (w, h) {
            self.canvas = Canvas::new(w, h);
            self.needs_clear = true;
        }
        draw_scene(&mut self.canvas, state, &self.palette, self.show_hint);

        if self.needs_clear {
            out.queue(terminal::Clear(terminal::ClearType::All))?;
            self.needs_clear = false;
        }
        flush_canvas(out, &self.canvas)
    }
}

/// Write every row, only switching colors when they change
fn flush_canvas<W: Write>(out: &mut W, canvas: &Canvas) -> std::io::Result<()> {
    let mut current: Option<(Rgb, Rgb)> = None;
    for (y, row) in canvas.rows().enumerate() {
        out.queue(cursor::MoveTo(0, y as u16))?;
        let mut line = String::with_capacity(row.len());
        for cell in row {
            if current != Some((cell.fg, cell.bg)) {
                if !line.is_empty() {
                    out.queue(Print(std::mem::take(&mut line)))?;
                }
                out.queue(style::SetForegroundColor(to_color(cell.fg)))?;
                out.queue(style::SetBackgroundColor(to_color(cell.bg)))?;
                current = Some((cell.fg, cell.bg));
            }
            line.push(cell.glyph);
        }
        if !line.is_empty() {
            out.queue(Print(line))?;
        }
    }

    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, canvas.height()))?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors;

    #[test]
    fn test_flush_writes_text_and_colors() {
        let mut canvas = Canvas::new(6, 1);
        canvas.text(0, 0, "ab", colors::RED);
        canvas.text(2, 0, "cd", colors::GREEN);

        let mut out = Vec::new();
        flush_canvas(&mut out, &canvas).unwrap();
        let written = String::from_utf8(out).unwrap();
        assert!(written.contains("ab"));
        assert!(written.contains("cd"));
        // Truecolor escape for pure red foreground
        assert!(written.contains("38;2;255;0;0"));
    }

    #[test]
    fn test_render_resizes_canvas_to_level() {
        let state = crate::sim::GameState::new(
            crate::LevelTable::builtin().unwrap(),
            1,
            std::time::Duration::ZERO,
        );
        let mut renderer = TerminalRenderer::new(Palette::default(), true);
        let mut out = Vec::new();
        renderer.render(&mut out, &state).unwrap();
        assert_eq!(
            (renderer.canvas.width(), renderer.canvas.height()),
            canvas_size(&state)
        );
        assert!(!renderer.needs_clear);
        assert!(String::from_utf8_lossy(&out).contains("Score: 0"));
    }
}
