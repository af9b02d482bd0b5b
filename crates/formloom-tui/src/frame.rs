#![forbid(unsafe_code)]

//! Frame = Buffer + metadata for a render pass.
//!
//! The `Frame` is the render target that `Model::view()` writes to. It
//! bundles the cell grid ([`Buffer`]) with a hit grid for mouse hit testing
//! and the cursor the presenter should show.
//!
//! # Usage
//!
//! ```
//! use formloom_tui::cell::Cell;
//! use formloom_tui::frame::{Frame, HitId, HitRegion};
//! use formloom_tui::geometry::Rect;
//!
//! let mut frame = Frame::new(80, 24);
//! frame.buffer.set(0, 0, Cell::from_char('H'));
//! frame.register_hit(Rect::new(0, 0, 5, 1), HitId::new(1), HitRegion::Button, 7);
//! assert_eq!(frame.hit_test(2, 0), Some((HitId::new(1), HitRegion::Button, 7)));
//! frame.set_cursor(Some((2, 0)));
//! ```

use crate::buffer::Buffer;
use crate::geometry::Rect;

/// Identifier for a clickable region in the hit grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct HitId(pub u32);

impl HitId {
    #[inline]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[inline]
    pub const fn id(self) -> u32 {
        self.0
    }
}

/// Opaque user data attached to a hit region (e.g. a row index).
pub type HitData = u64;

/// Regions within a widget for mouse interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HitRegion {
    #[default]
    None,
    /// Main content area.
    Content,
    /// Drag handle or drop target.
    Handle,
    /// Clickable button.
    Button,
}

/// A single hit cell in the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HitCell {
    pub widget_id: Option<HitId>,
    pub region: HitRegion,
    pub data: HitData,
}

/// Hit testing grid: maps screen positions to the last registered region.
#[derive(Debug, Clone)]
pub struct HitGrid {
    width: u16,
    height: u16,
    cells: Vec<HitCell>,
}

impl HitGrid {
    pub fn new(width: u16, height: u16) -> Self {
        let size = width as usize * height as usize;
        Self {
            width,
            height,
            cells: vec![HitCell::default(); size],
        }
    }

    #[inline]
    fn index(&self, x: u16, y: u16) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Register a clickable region. Later registrations win where they overlap.
    pub fn register(&mut self, rect: Rect, widget_id: HitId, region: HitRegion, data: HitData) {
        let x_end = (rect.x as usize + rect.width as usize).min(self.width as usize) as u16;
        let y_end = (rect.y as usize + rect.height as usize).min(self.height as usize) as u16;

        let hit_cell = HitCell {
            widget_id: Some(widget_id),
            region,
            data,
        };
        for y in rect.y..y_end {
            for x in rect.x..x_end {
                if let Some(i) = self.index(x, y) {
                    self.cells[i] = hit_cell;
                }
            }
        }
    }

    /// Hit test at the given position.
    pub fn hit_test(&self, x: u16, y: u16) -> Option<(HitId, HitRegion, HitData)> {
        let cell = self.cells.get(self.index(x, y)?)?;
        cell.widget_id.map(|id| (id, cell.region, cell.data))
    }

    pub fn clear(&mut self) {
        self.cells.fill(HitCell::default());
    }
}

/// Everything needed to present a single frame.
#[derive(Debug, Clone)]
pub struct Frame {
    /// The cell grid for this render pass.
    pub buffer: Buffer,

    /// Hit grid for mouse hit testing.
    pub hit_grid: HitGrid,

    /// Cursor position (if the app wants a visible cursor).
    pub cursor_position: Option<(u16, u16)>,
}

impl Frame {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            buffer: Buffer::new(width, height),
            hit_grid: HitGrid::new(width, height),
            cursor_position: None,
        }
    }

    #[inline]
    pub fn width(&self) -> u16 {
        self.buffer.width()
    }

    #[inline]
    pub fn height(&self) -> u16 {
        self.buffer.height()
    }

    #[inline]
    pub fn bounds(&self) -> Rect {
        self.buffer.bounds()
    }

    /// Reset buffer, hit grid, and cursor for the next render.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.hit_grid.clear();
        self.cursor_position = None;
    }

    #[inline]
    pub fn set_cursor(&mut self, position: Option<(u16, u16)>) {
        self.cursor_position = position;
    }

    pub fn register_hit(&mut self, rect: Rect, id: HitId, region: HitRegion, data: HitData) {
        self.hit_grid.register(rect, id, region, data);
    }

    pub fn hit_test(&self, x: u16, y: u16) -> Option<(HitId, HitRegion, HitData)> {
        self.hit_grid.hit_test(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_registration_wins() {
        let mut frame = Frame::new(10, 3);
        frame.register_hit(Rect::new(0, 0, 10, 3), HitId::new(1), HitRegion::Content, 0);
        frame.register_hit(Rect::new(8, 1, 2, 1), HitId::new(2), HitRegion::Button, 4);
        assert_eq!(frame.hit_test(0, 0), Some((HitId::new(1), HitRegion::Content, 0)));
        assert_eq!(frame.hit_test(9, 1), Some((HitId::new(2), HitRegion::Button, 4)));
    }

    #[test]
    fn out_of_bounds_registration_is_clipped() {
        let mut frame = Frame::new(4, 2);
        frame.register_hit(Rect::new(2, 1, 100, 100), HitId::new(3), HitRegion::Handle, 1);
        assert_eq!(frame.hit_test(3, 1), Some((HitId::new(3), HitRegion::Handle, 1)));
        assert_eq!(frame.hit_test(4, 1), None);
        assert_eq!(frame.hit_test(1, 1), None);
    }

    #[test]
    fn clear_resets_hits_and_cursor() {
        let mut frame = Frame::new(4, 2);
        frame.register_hit(frame.bounds(), HitId::new(1), HitRegion::Content, 0);
        frame.set_cursor(Some((1, 1)));
        frame.clear();
        assert_eq!(frame.hit_test(0, 0), None);
        assert_eq!(frame.cursor_position, None);
    }
}
