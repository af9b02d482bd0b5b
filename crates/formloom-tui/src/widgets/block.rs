#![forbid(unsafe_code)]

use unicode_width::UnicodeWidthStr;

use super::{Widget, draw_text_span};
use crate::cell::{Cell, CellContent};
use crate::frame::Frame;
use crate::geometry::Rect;
use crate::style::Style;

/// Line style of a block's frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BorderType {
    #[default]
    Plain,
    Rounded,
    Double,
    Thick,
}

impl BorderType {
    /// `[horizontal, vertical, top-left, top-right, bottom-left, bottom-right]`.
    const fn glyphs(self) -> [char; 6] {
        match self {
            Self::Plain => ['─', '│', '┌', '┐', '└', '┘'],
            Self::Rounded => ['─', '│', '╭', '╮', '╰', '╯'],
            Self::Double => ['═', '║', '╔', '╗', '╚', '╝'],
            Self::Thick => ['━', '┃', '┏', '┓', '┗', '┛'],
        }
    }
}

/// Text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

/// A filled area, optionally framed on all four sides with a title in the
/// top edge.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Block<'a> {
    framed: bool,
    border_style: Style,
    border_type: BorderType,
    title: Option<&'a str>,
    title_alignment: Alignment,
    style: Style,
}

impl<'a> Block<'a> {
    /// A plain filled area with no frame.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bordered() -> Self {
        Self {
            framed: true,
            ..Self::default()
        }
    }

    pub fn border_style(mut self, style: Style) -> Self {
        self.border_style = style;
        self
    }

    pub fn border_type(mut self, border_type: BorderType) -> Self {
        self.border_type = border_type;
        self
    }

    pub fn title(mut self, title: &'a str) -> Self {
        self.title = Some(title);
        self
    }

    pub fn title_alignment(mut self, alignment: Alignment) -> Self {
        self.title_alignment = alignment;
        self
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// The area left for content.
    pub fn inner(&self, area: Rect) -> Rect {
        if !self.framed {
            return area;
        }
        Rect::new(
            area.x.saturating_add(1),
            area.y.saturating_add(1),
            area.width.saturating_sub(2),
            area.height.saturating_sub(2),
        )
    }

    fn put(&self, frame: &mut Frame, x: u16, y: u16, c: char) {
        let mut cell = frame.buffer.get(x, y).copied().unwrap_or_default();
        cell.content = CellContent::Char(c);
        self.border_style.apply_to(&mut cell);
        frame.buffer.set(x, y, cell);
    }

    fn render_frame(&self, area: Rect, frame: &mut Frame) {
        let [h, v, tl, tr, bl, br] = self.border_type.glyphs();
        let (left, top) = (area.x, area.y);
        let (right, bottom) = (area.right() - 1, area.bottom() - 1);

        for x in left..=right {
            self.put(frame, x, top, h);
            self.put(frame, x, bottom, h);
        }
        for y in top..=bottom {
            self.put(frame, left, y, v);
            self.put(frame, right, y, v);
        }
        for (x, y, c) in [(left, top, tl), (right, top, tr), (left, bottom, bl), (right, bottom, br)] {
            self.put(frame, x, y, c);
        }
    }

    fn render_title(&self, area: Rect, frame: &mut Frame) {
        let Some(title) = self.title else {
            return;
        };
        if !self.framed || area.width < 3 {
            return;
        }

        let room = area.width as usize - 2;
        let width = title.width().min(room) as u16;
        let x = match self.title_alignment {
            Alignment::Left => area.x + 1,
            Alignment::Center => area.x + 1 + (room as u16 - width) / 2,
            Alignment::Right => area.right() - 1 - width,
        };
        draw_text_span(frame, x, area.y, title, self.border_style, area.right() - 1);
    }
}

impl Widget for Block<'_> {
    fn render(&self, area: Rect, frame: &mut Frame) {
        let area = area.intersection(&frame.bounds());
        if area.is_empty() {
            return;
        }

        frame.buffer.fill(area, Cell::default());
        frame.buffer.set_style(area, self.style);
        if self.framed {
            self.render_frame(area, frame);
            self.render_title(area, frame);
        }
    }
}
