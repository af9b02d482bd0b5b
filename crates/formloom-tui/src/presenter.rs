#![forbid(unsafe_code)]

//! Presenter: state-tracked ANSI emission.
//!
//! The presenter diffs each new buffer against the last one it presented
//! and only writes the cells that changed. Style sequences are emitted only
//! when the style differs from the previous written cell, and cursor moves
//! only when a run of changes is not contiguous.
//!
//! # Usage
//!
//! ```
//! use formloom_tui::frame::Frame;
//! use formloom_tui::presenter::Presenter;
//!
//! let mut presenter = Presenter::new(Vec::<u8>::new());
//! let mut frame = Frame::new(10, 2);
//! frame.buffer.set_string(0, 0, "hi", Default::default(), 10);
//! presenter.present(&frame)?;
//! # Ok::<(), std::io::Error>(())
//! ```

use std::io::{self, Write};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::style::{Attribute, Color, Print, SetAttribute, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{BeginSynchronizedUpdate, Clear, ClearType, EndSynchronizedUpdate};
use crossterm::queue;

use crate::buffer::Buffer;
use crate::cell::{Cell, CellContent, PackedRgba, StyleFlags};
use crate::frame::Frame;

/// Cached style state for comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CellStyle {
    fg: PackedRgba,
    bg: PackedRgba,
    attrs: StyleFlags,
}

impl CellStyle {
    fn from_cell(cell: &Cell) -> Self {
        Self {
            fg: cell.fg,
            bg: cell.bg,
            attrs: cell.attrs,
        }
    }
}

/// Positions of every cell that differs between `prev` and `next`, row-major.
///
/// Buffers of different sizes are treated as fully changed.
pub fn diff(prev: &Buffer, next: &Buffer) -> Vec<(u16, u16)> {
    let same_size = prev.width() == next.width() && prev.height() == next.height();
    let mut changes = Vec::new();
    for y in 0..next.height() {
        for x in 0..next.width() {
            if !same_size || prev.get(x, y) != next.get(x, y) {
                changes.push((x, y));
            }
        }
    }
    changes
}

/// State-tracked ANSI presenter.
pub struct Presenter<W: Write> {
    writer: W,
    /// Last presented buffer; `None` forces a full repaint.
    previous: Option<Buffer>,
    /// Screen row of the frame's top edge (non-zero in inline mode).
    origin_y: u16,
}

impl<W: Write> Presenter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            previous: None,
            origin_y: 0,
        }
    }

    /// Place the frame's top-left corner at screen row `y`. Forces a repaint.
    pub fn set_origin(&mut self, y: u16) {
        if self.origin_y != y {
            self.origin_y = y;
            self.previous = None;
        }
    }

    /// Drop the cached buffer so the next present repaints everything.
    pub fn invalidate(&mut self) {
        self.previous = None;
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    pub fn writer_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    /// Present `frame`, writing only what changed since the last present.
    ///
    /// Returns the number of cells written.
    pub fn present(&mut self, frame: &Frame) -> io::Result<usize> {
        let next = &frame.buffer;
        queue!(self.writer, BeginSynchronizedUpdate, Hide)?;

        let changes = match &self.previous {
            Some(prev) if prev.width() == next.width() && prev.height() == next.height() => {
                diff(prev, next)
            }
            _ => {
                self.clear_region(next.height())?;
                diff(&Buffer::new(0, 0), next)
            }
        };

        #[cfg(feature = "tracing")]
        tracing::trace!(changes = changes.len(), "present");

        let mut style: Option<CellStyle> = None;
        let mut cursor: Option<(u16, u16)> = None;
        let mut written = 0;
        for (x, y) in changes {
            let Some(cell) = next.get(x, y) else {
                continue;
            };
            if cell.content == CellContent::Continuation {
                continue;
            }
            if cursor != Some((x, y)) {
                queue!(self.writer, MoveTo(x, self.origin_y + y))?;
            }
            let cell_style = CellStyle::from_cell(cell);
            if style != Some(cell_style) {
                self.emit_style(cell_style)?;
                style = Some(cell_style);
            }
            queue!(self.writer, Print(cell.symbol()))?;
            let w = unicode_width::UnicodeWidthChar::width(cell.symbol()).unwrap_or(1) as u16;
            cursor = Some((x + w.max(1), y));
            written += 1;
        }

        queue!(self.writer, SetAttribute(Attribute::Reset))?;
        if let Some((x, y)) = frame.cursor_position {
            queue!(self.writer, MoveTo(x, self.origin_y + y), Show)?;
        }
        queue!(self.writer, EndSynchronizedUpdate)?;
        self.writer.flush()?;

        self.previous = Some(next.clone());
        Ok(written)
    }

    /// Blank the area the UI occupies: the whole screen at origin 0,
    /// otherwise only the `height` rows below the origin.
    fn clear_region(&mut self, height: u16) -> io::Result<()> {
        if self.origin_y == 0 {
            queue!(self.writer, SetAttribute(Attribute::Reset), Clear(ClearType::All))?;
            return Ok(());
        }
        queue!(self.writer, SetAttribute(Attribute::Reset))?;
        for y in 0..height {
            queue!(
                self.writer,
                MoveTo(0, self.origin_y + y),
                Clear(ClearType::CurrentLine)
            )?;
        }
        Ok(())
    }

    fn emit_style(&mut self, style: CellStyle) -> io::Result<()> {
        queue!(
            self.writer,
            SetAttribute(Attribute::Reset),
            SetForegroundColor(to_color(style.fg)),
            SetBackgroundColor(to_color(style.bg))
        )?;
        let pairs = [
            (StyleFlags::BOLD, Attribute::Bold),
            (StyleFlags::DIM, Attribute::Dim),
            (StyleFlags::ITALIC, Attribute::Italic),
            (StyleFlags::UNDERLINE, Attribute::Underlined),
            (StyleFlags::REVERSE, Attribute::Reverse),
        ];
        for (flag, attr) in pairs {
            if style.attrs.contains(flag) {
                queue!(self.writer, SetAttribute(attr))?;
            }
        }
        Ok(())
    }
}

fn to_color(color: PackedRgba) -> Color {
    if color.is_transparent() {
        Color::Reset
    } else {
        Color::Rgb {
            r: color.r(),
            g: color.g(),
            b: color.b(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Style;

    fn frame_with(text: &str) -> Frame {
        let mut frame = Frame::new(8, 2);
        frame.buffer.set_string(0, 0, text, Style::new(), 8);
        frame
    }

    #[test]
    fn diff_reports_changed_cells_only() {
        let a = frame_with("abc").buffer;
        let b = frame_with("abd").buffer;
        assert_eq!(diff(&a, &b), vec![(2, 0)]);
        assert!(diff(&a, &a).is_empty());
    }

    #[test]
    fn size_change_is_full_diff() {
        let a = Buffer::new(2, 2);
        let b = Buffer::new(3, 1);
        assert_eq!(diff(&a, &b).len(), 3);
    }

    #[test]
    fn first_present_writes_everything_then_only_changes() {
        let mut presenter = Presenter::new(Vec::new());
        assert_eq!(presenter.present(&frame_with("abc")).unwrap(), 16);

        presenter.writer_mut().clear();
        assert_eq!(presenter.present(&frame_with("abd")).unwrap(), 1);
        let out = String::from_utf8_lossy(presenter.writer());
        assert!(out.contains('d'));
        assert!(!out.contains('a'));
    }

    #[test]
    fn invalidate_forces_repaint() {
        let mut presenter = Presenter::new(Vec::new());
        let frame = frame_with("x");
        presenter.present(&frame).unwrap();
        assert_eq!(presenter.present(&frame).unwrap(), 0);
        presenter.invalidate();
        assert_eq!(presenter.present(&frame).unwrap(), 16);
    }

    #[test]
    fn repaint_clears_screen_or_inline_rows() {
        let mut full = Presenter::new(Vec::new());
        full.present(&frame_with("a")).unwrap();
        let out = String::from_utf8_lossy(full.writer());
        assert!(out.contains("\x1b[2J"));
        assert!(!out.contains("\x1b[2K"));

        let mut inline = Presenter::new(Vec::new());
        inline.set_origin(5);
        inline.present(&frame_with("a")).unwrap();
        let out = String::from_utf8_lossy(inline.writer());
        assert!(!out.contains("\x1b[2J"));
        assert_eq!(out.matches("\x1b[2K").count(), 2);
        assert!(out.contains("\x1b[6;1H\x1b[2K"));
        assert!(out.contains("\x1b[7;1H\x1b[2K"));
    }

    #[test]
    fn truecolor_is_emitted() {
        let mut presenter = Presenter::new(Vec::new());
        let mut frame = Frame::new(1, 1);
        frame.buffer.set_string(
            0,
            0,
            "z",
            Style::new().fg(PackedRgba::rgb(1, 2, 3)),
            1,
        );
        presenter.present(&frame).unwrap();
        let out = String::from_utf8_lossy(presenter.writer());
        assert!(out.contains("38;2;1;2;3"));
    }
}
