#![forbid(unsafe_code)]

//! Core widgets.

pub mod block;
pub mod input;
pub mod paragraph;

use unicode_width::UnicodeWidthStr;

use crate::frame::Frame;
use crate::geometry::Rect;
use crate::style::Style;

pub use block::{Alignment, BorderType, Block};
pub use input::TextInput;
pub use paragraph::Paragraph;

/// A `Widget` is a renderable component.
///
/// Widgets render themselves into a `Frame` within a given `Rect`.
pub trait Widget {
    /// Render the widget into the frame at the given area.
    fn render(&self, area: Rect, frame: &mut Frame);
}

/// Draw `text` at (x, y) with `style`, clipped at `max_x`. Returns the next column.
pub fn draw_text_span(frame: &mut Frame, x: u16, y: u16, text: &str, style: Style, max_x: u16) -> u16 {
    frame.buffer.set_string(x, y, text, style, max_x)
}

/// Column at which text of `width` starts inside `area` for `alignment`.
pub(crate) fn align_x(area: Rect, width: usize, alignment: Alignment) -> u16 {
    let width = width.min(area.width as usize) as u16;
    match alignment {
        Alignment::Left => area.x,
        Alignment::Center => area.x + (area.width - width) / 2,
        Alignment::Right => area.right() - width,
    }
}

/// Truncate `text` to at most `max_width` display columns, appending `…`
/// when anything was cut.
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w + 1 > max_width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}
