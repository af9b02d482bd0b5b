#![forbid(unsafe_code)]

//! Text input widget.
//!
//! A single-line text input with grapheme-aware cursor movement, horizontal
//! scrolling, and a placeholder shown while empty.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use super::{Widget, draw_text_span};
use crate::event::{Event, KeyCode, KeyEvent, KeyEventKind};
use crate::frame::Frame;
use crate::geometry::Rect;
use crate::style::Style;

/// A single-line text input widget.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    /// Text value.
    value: String,
    /// Cursor position (grapheme index).
    cursor: usize,
    /// Placeholder text.
    placeholder: String,
    /// Base style.
    style: Style,
    /// Placeholder style.
    placeholder_style: Style,
    /// Whether the input is focused (controls cursor output).
    focused: bool,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    // --- Builder methods ---

    /// Set the text value, cursor at the end.
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self.cursor = self.grapheme_count();
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn with_placeholder_style(mut self, style: Style) -> Self {
        self.placeholder_style = style;
        self
    }

    pub fn with_focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    // --- Value access ---

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Set the value, clamping the cursor to the valid range.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor = self.cursor.min(self.grapheme_count());
    }

    /// Clear all text.
    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// Take the value out, leaving the input empty.
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.value)
    }

    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[inline]
    pub fn focused(&self) -> bool {
        self.focused
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    // --- Event handling ---

    /// Handle a terminal event. Returns `true` if the state changed.
    pub fn handle_event(&mut self, event: &Event) -> bool {
        match event {
            Event::Key(key)
                if key.kind == KeyEventKind::Press || key.kind == KeyEventKind::Repeat =>
            {
                self.handle_key(key)
            }
            Event::Paste(paste) => {
                self.insert_text(&paste.text);
                true
            }
            _ => false,
        }
    }

    fn handle_key(&mut self, key: &KeyEvent) -> bool {
        match key.code {
            KeyCode::Char(c) if !key.ctrl() && !key.alt() => {
                self.insert_text(c.encode_utf8(&mut [0; 4]));
                true
            }
            // Ctrl+U: clear to start
            KeyCode::Char('u') if key.ctrl() => {
                let at = self.byte_offset(self.cursor);
                self.value.replace_range(..at, "");
                self.cursor = 0;
                true
            }
            KeyCode::Backspace => {
                if self.cursor == 0 {
                    return false;
                }
                let start = self.byte_offset(self.cursor - 1);
                let end = self.byte_offset(self.cursor);
                self.value.replace_range(start..end, "");
                self.cursor -= 1;
                true
            }
            KeyCode::Delete => {
                if self.cursor >= self.grapheme_count() {
                    return false;
                }
                let start = self.byte_offset(self.cursor);
                let end = self.byte_offset(self.cursor + 1);
                self.value.replace_range(start..end, "");
                true
            }
            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                true
            }
            KeyCode::Right => {
                self.cursor = (self.cursor + 1).min(self.grapheme_count());
                true
            }
            KeyCode::Home => {
                self.cursor = 0;
                true
            }
            KeyCode::End => {
                self.cursor = self.grapheme_count();
                true
            }
            _ => false,
        }
    }

    /// Insert text at the cursor. Line breaks and tabs become spaces; other
    /// control characters are dropped.
    pub fn insert_text(&mut self, text: &str) {
        let clean: String = text
            .chars()
            .map(|c| if matches!(c, '\n' | '\r' | '\t') { ' ' } else { c })
            .filter(|c| !c.is_control())
            .collect();
        if clean.is_empty() {
            return;
        }
        let at = self.byte_offset(self.cursor);
        self.value.insert_str(at, &clean);
        self.cursor += clean.graphemes(true).count();
    }

    // --- Geometry ---

    fn grapheme_count(&self) -> usize {
        self.value.graphemes(true).count()
    }

    fn byte_offset(&self, grapheme_index: usize) -> usize {
        self.value
            .grapheme_indices(true)
            .nth(grapheme_index)
            .map_or(self.value.len(), |(i, _)| i)
    }

    fn cursor_visual_pos(&self) -> usize {
        self.value[..self.byte_offset(self.cursor)].width()
    }

    /// Columns scrolled off the left so the cursor stays inside `width`.
    fn scroll_for(&self, width: usize) -> usize {
        self.cursor_visual_pos()
            .saturating_sub(width.saturating_sub(1))
    }

    /// Cursor screen position inside `area`, for `Frame::set_cursor`.
    pub fn cursor_position(&self, area: Rect) -> (u16, u16) {
        let rel = self.cursor_visual_pos() - self.scroll_for(area.width as usize);
        let x = area
            .x
            .saturating_add(rel as u16)
            .min(area.right().saturating_sub(1));
        (x, area.y)
    }
}

impl Widget for TextInput {
    fn render(&self, area: Rect, frame: &mut Frame) {
        if area.is_empty() {
            return;
        }
        let row = Rect::new(area.x, area.y, area.width, 1);
        frame.buffer.set_style(row, self.style);

        if self.value.is_empty() {
            if !self.placeholder.is_empty() {
                let style = self.style.patch(self.placeholder_style);
                draw_text_span(frame, row.x, row.y, &self.placeholder, style, row.right());
            }
        } else {
            let skip = self.scroll_for(row.width as usize);
            let mut skipped = 0;
            let visible: String = self
                .value
                .graphemes(true)
                .skip_while(|g| {
                    let done = skipped >= skip;
                    if !done {
                        skipped += g.width();
                    }
                    !done
                })
                .collect();
            draw_text_span(frame, row.x, row.y, &visible, self.style, row.right());
        }

        if self.focused {
            frame.set_cursor(Some(self.cursor_position(row)));
        }
    }
}
