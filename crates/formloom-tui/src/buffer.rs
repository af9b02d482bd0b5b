#![forbid(unsafe_code)]

//! Buffer: a 2D grid of cells.
//!
//! Writes outside the buffer bounds are silently clipped, so widgets can
//! render into any area without pre-checking.

use unicode_width::UnicodeWidthChar;

use crate::cell::{Cell, CellContent};
use crate::geometry::Rect;
use crate::style::Style;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Buffer {
    /// Create a buffer of default (empty) cells.
    pub fn new(width: u16, height: u16) -> Self {
        let size = width as usize * height as usize;
        Self {
            width,
            height,
            cells: vec![Cell::default(); size],
        }
    }

    #[inline]
    pub const fn width(&self) -> u16 {
        self.width
    }

    #[inline]
    pub const fn height(&self) -> u16 {
        self.height
    }

    #[inline]
    pub const fn bounds(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }

    #[inline]
    fn index(&self, x: u16, y: u16) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    #[inline]
    pub fn get_mut(&mut self, x: u16, y: u16) -> Option<&mut Cell> {
        self.index(x, y).map(|i| &mut self.cells[i])
    }

    /// Overwrite the cell at (x, y). Out-of-bounds writes are ignored.
    #[inline]
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(slot) = self.get_mut(x, y) {
            *slot = cell;
        }
    }

    /// Fill `area` (clipped to the buffer) with `cell`.
    pub fn fill(&mut self, area: Rect, cell: Cell) {
        let area = area.intersection(&self.bounds());
        for y in area.y..area.bottom() {
            for x in area.x..area.right() {
                self.set(x, y, cell);
            }
        }
    }

    /// Apply `style` to every cell in `area`, keeping content.
    pub fn set_style(&mut self, area: Rect, style: Style) {
        let area = area.intersection(&self.bounds());
        for y in area.y..area.bottom() {
            for x in area.x..area.right() {
                if let Some(cell) = self.get_mut(x, y) {
                    style.apply_to(cell);
                }
            }
        }
    }

    /// Write `text` starting at (x, y), stopping before column `max_x`.
    ///
    /// Control and zero-width characters are skipped. A wide character that
    /// would straddle `max_x` is not written. Returns the column after the
    /// last written cell.
    pub fn set_string(&mut self, x: u16, y: u16, text: &str, style: Style, max_x: u16) -> u16 {
        let max_x = max_x.min(self.width);
        let mut col = x;
        for c in text.chars() {
            let w = match c.width() {
                Some(w) if w > 0 && !c.is_control() => w as u16,
                _ => continue,
            };
            if col.saturating_add(w) > max_x {
                break;
            }
            let mut cell = self.get(col, y).copied().unwrap_or_default();
            cell.content = CellContent::Char(c);
            style.apply_to(&mut cell);
            self.set(col, y, cell);
            if w == 2 {
                let mut tail = cell;
                tail.content = CellContent::Continuation;
                self.set(col + 1, y, tail);
            }
            col += w;
        }
        col
    }

    /// Reset every cell to default.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }

    /// The presented text of row `y`, trailing spaces included.
    pub fn row_text(&self, y: u16) -> String {
        (0..self.width)
            .filter_map(|x| self.get(x, y))
            .filter(|cell| cell.content != CellContent::Continuation)
            .map(Cell::symbol)
            .collect()
    }

    /// All rows joined by `\n`, each with trailing spaces trimmed.
    pub fn to_text(&self) -> String {
        (0..self.height)
            .map(|y| self.row_text(y).trim_end().to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::PackedRgba;

    #[test]
    fn out_of_bounds_writes_are_clipped() {
        let mut buf = Buffer::new(3, 2);
        buf.set(5, 5, Cell::from_char('x'));
        assert!(buf.get(5, 5).is_none());
        buf.fill(Rect::new(2, 1, 10, 10), Cell::from_char('#'));
        assert_eq!(buf.to_text(), "\n  #");
    }

    #[test]
    fn set_string_clips_at_max_x() {
        let mut buf = Buffer::new(10, 1);
        let end = buf.set_string(1, 0, "hello world", Style::new(), 6);
        assert_eq!(end, 6);
        assert_eq!(buf.row_text(0), " hello    ");
    }

    #[test]
    fn wide_chars_take_two_cells() {
        let mut buf = Buffer::new(4, 1);
        let end = buf.set_string(0, 0, "日本語", Style::new(), 4);
        assert_eq!(end, 4);
        assert_eq!(buf.get(1, 0).unwrap().content, CellContent::Continuation);
        assert_eq!(buf.row_text(0), "日本");
    }

    #[test]
    fn set_string_skips_control_chars() {
        let mut buf = Buffer::new(5, 1);
        buf.set_string(0, 0, "a\x1bb\tc", Style::new(), 5);
        assert_eq!(buf.to_text(), "abc");
    }

    #[test]
    fn set_style_keeps_content() {
        let mut buf = Buffer::new(2, 1);
        buf.set_string(0, 0, "ab", Style::new(), 2);
        buf.set_style(buf.bounds(), Style::new().bg(PackedRgba::WHITE));
        assert_eq!(buf.get(1, 0).unwrap().content.as_char(), Some('b'));
        assert_eq!(buf.get(1, 0).unwrap().bg, PackedRgba::WHITE);
    }
}
