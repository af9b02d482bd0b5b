#![forbid(unsafe_code)]

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::block::{Alignment, Block};
use super::{Widget, align_x, draw_text_span};
use crate::frame::Frame;
use crate::geometry::Rect;
use crate::style::Style;

/// A widget that renders multi-line text.
#[derive(Debug, Clone, Default)]
pub struct Paragraph<'a> {
    text: String,
    block: Option<Block<'a>>,
    style: Style,
    wrap: bool,
    alignment: Alignment,
    scroll: u16,
}

impl<'a> Paragraph<'a> {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Break lines wider than the area at character boundaries.
    pub fn wrap(mut self, wrap: bool) -> Self {
        self.wrap = wrap;
        self
    }

    pub fn alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Skip this many visual lines from the top.
    pub fn scroll(mut self, offset: u16) -> Self {
        self.scroll = offset;
        self
    }

    /// Visual lines this paragraph occupies at `width` columns.
    pub fn line_count(&self, width: u16) -> usize {
        self.visual_lines(width).len()
    }

    fn visual_lines(&self, width: u16) -> Vec<String> {
        let width = width as usize;
        let mut out = Vec::new();
        for line in self.text.lines() {
            if !self.wrap || width == 0 || line.width() <= width {
                out.push(line.to_string());
                continue;
            }
            let mut current = String::new();
            let mut used = 0;
            for c in line.chars() {
                let w = c.width().unwrap_or(0);
                if used + w > width && !current.is_empty() {
                    out.push(std::mem::take(&mut current));
                    used = 0;
                }
                current.push(c);
                used += w;
            }
            out.push(current);
        }
        out
    }
}

impl Widget for Paragraph<'_> {
    fn render(&self, area: Rect, frame: &mut Frame) {
        #[cfg(feature = "tracing")]
        let _span = tracing::trace_span!(
            "widget_render",
            widget = "Paragraph",
            x = area.x,
            y = area.y,
            w = area.width,
            h = area.height
        )
        .entered();

        let text_area = match self.block {
            Some(ref b) => {
                b.render(area, frame);
                b.inner(area)
            }
            None => area,
        };
        if text_area.is_empty() {
            return;
        }
        frame.buffer.set_style(text_area, self.style);

        let lines = self.visual_lines(text_area.width);
        for (y, line) in (text_area.y..text_area.bottom()).zip(lines.iter().skip(self.scroll as usize)) {
            let x = align_x(text_area, line.width(), self.alignment);
            draw_text_span(frame, x, y, line, self.style, text_area.right());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_lines_top_down() {
        let mut frame = Frame::new(6, 3);
        Paragraph::new("ab\ncd").render(frame.bounds(), &mut frame);
        assert_eq!(frame.buffer.to_text(), "ab\ncd");
    }

    #[test]
    fn wraps_and_scrolls() {
        let p = Paragraph::new("abcdefgh").wrap(true);
        assert_eq!(p.line_count(3), 3);

        let mut frame = Frame::new(3, 2);
        p.scroll(1).render(frame.bounds(), &mut frame);
        assert_eq!(frame.buffer.to_text(), "def\ngh");
    }

    #[test]
    fn unwrapped_lines_are_clipped() {
        let mut frame = Frame::new(4, 1);
        Paragraph::new("abcdefgh").render(frame.bounds(), &mut frame);
        assert_eq!(frame.buffer.to_text(), "abcd");
    }

    #[test]
    fn right_alignment() {
        let mut frame = Frame::new(6, 1);
        Paragraph::new("ab")
            .alignment(Alignment::Right)
            .render(frame.bounds(), &mut frame);
        assert_eq!(frame.buffer.row_text(0), "    ab");
    }

    #[test]
    fn renders_inside_block() {
        let mut frame = Frame::new(6, 3);
        Paragraph::new("hey")
            .block(Block::bordered())
            .render(frame.bounds(), &mut frame);
        assert_eq!(frame.buffer.row_text(1), "│hey │");
    }
}
