//! Character-cell frame buffer

use crate::colors::{self, Rgb};

/// One terminal cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub glyph: char,
    pub fg: Rgb,
    pub bg: Rgb,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            glyph: ' ',
            fg: colors::WHITE,
            bg: colors::BLACK,
        }
    }
}

/// Fixed-size grid of cells, row-major
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Canvas {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    pub fn get(&self, x: i32, y: i32) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    /// Set glyph and foreground, keeping the background
    pub fn put(&mut self, x: i32, y: i32, glyph: char, fg: Rgb) {
        if let Some(i) = self.index(x, y) {
            self.cells[i].glyph = glyph;
            self.cells[i].fg = fg;
        }
    }

    pub fn set_bg(&mut self, x: i32, y: i32, bg: Rgb) {
        if let Some(i) = self.index(x, y) {
            self.cells[i].bg = bg;
        }
    }

    /// Write text starting at (x, y), clipped at the edges
    pub fn text(&mut self, x: i32, y: i32, text: &str, fg: Rgb) {
        for (i, glyph) in text.chars().enumerate() {
            self.put(x + i as i32, y, glyph, fg);
        }
    }

    /// Write text on a black strip, horizontally centered on row `y`
    pub fn text_centered(&mut self, y: i32, text: &str, fg: Rgb) {
        let len = text.chars().count() as i32;
        let x = (self.width as i32 - len) / 2;
        for (i, glyph) in text.chars().enumerate() {
            let cx = x + i as i32;
            self.put(cx, y, glyph, fg);
            self.set_bg(cx, y, colors::BLACK);
        }
    }

    /// Write text so it ends at the right edge of row `y`
    pub fn text_right(&mut self, y: i32, text: &str, fg: Rgb) {
        let len = text.chars().count() as i32;
        self.text(self.width as i32 - len, y, text, fg);
    }

    /// Row contents as plain text
    pub fn row_text(&self, y: u16) -> String {
        let start = y as usize * self.width as usize;
        self.cells[start..start + self.width as usize]
            .iter()
            .map(|c| c.glyph)
            .collect()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width.max(1) as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_is_clipped() {
        let mut canvas = Canvas::new(5, 2);
        canvas.text(3, 0, "hello", colors::WHITE);
        canvas.text(-2, 1, "abcd", colors::WHITE);
        assert_eq!(canvas.row_text(0), "   he");
        assert_eq!(canvas.row_text(1), "cd   ");
    }

    #[test]
    fn test_text_centered_and_right() {
        let mut canvas = Canvas::new(9, 2);
        canvas.text_centered(0, "abc", colors::RED);
        canvas.text_right(1, "xy", colors::RED);
        assert_eq!(canvas.row_text(0), "   abc   ");
        assert_eq!(canvas.row_text(1), "       xy");
        assert_eq!(canvas.get(3, 0).unwrap().fg, colors::RED);
    }

    #[test]
    fn test_put_keeps_background() {
        let mut canvas = Canvas::new(2, 1);
        canvas.set_bg(0, 0, colors::BLUE);
        canvas.put(0, 0, '#', colors::GOLD);
        let cell = canvas.get(0, 0).unwrap();
        assert_eq!((cell.glyph, cell.fg, cell.bg), ('#', colors::GOLD, colors::BLUE));
        assert!(canvas.get(2, 0).is_none());

        canvas.clear();
        assert_eq!(*canvas.get(0, 0).unwrap(), Cell::default());
    }
}
