#![forbid(unsafe_code)]

//! Color palette and named styles.

use formloom_tui::{PackedRgba, Style, StyleFlags};

// ---------------------------------------------------------------------------
// Color palette
// ---------------------------------------------------------------------------

/// Background colors.
pub mod bg {
    use super::*;

    pub const DEEP: PackedRgba = PackedRgba::rgb(15, 15, 30);
    pub const BASE: PackedRgba = PackedRgba::rgb(25, 25, 45);
    pub const SURFACE: PackedRgba = PackedRgba::rgb(35, 35, 60);
    pub const HIGHLIGHT: PackedRgba = PackedRgba::rgb(55, 55, 90);
}

/// Foreground / text colors.
pub mod fg {
    use super::*;

    pub const PRIMARY: PackedRgba = PackedRgba::rgb(220, 220, 240);
    pub const SECONDARY: PackedRgba = PackedRgba::rgb(180, 180, 210);
    pub const MUTED: PackedRgba = PackedRgba::rgb(120, 120, 150);
}

/// Accent / semantic colors.
pub mod accent {
    use super::*;

    pub const PRIMARY: PackedRgba = PackedRgba::rgb(130, 170, 255);
    pub const SUCCESS: PackedRgba = PackedRgba::rgb(80, 220, 140);
    pub const WARNING: PackedRgba = PackedRgba::rgb(255, 200, 80);
    pub const ERROR: PackedRgba = PackedRgba::rgb(255, 100, 100);
    pub const INFO: PackedRgba = PackedRgba::rgb(100, 200, 255);
}

// ---------------------------------------------------------------------------
// Named styles
// ---------------------------------------------------------------------------

pub fn body() -> Style {
    Style::new().fg(fg::PRIMARY)
}

pub fn muted() -> Style {
    Style::new().fg(fg::MUTED)
}

pub fn title() -> Style {
    Style::new().fg(fg::PRIMARY).attrs(StyleFlags::BOLD)
}

/// Border of the pane that has keyboard focus.
pub fn pane_focused() -> Style {
    Style::new().fg(accent::INFO).bg(bg::DEEP)
}

pub fn pane() -> Style {
    Style::new().fg(fg::MUTED).bg(bg::DEEP)
}

/// Cursor row inside a list.
pub fn selected() -> Style {
    Style::new()
        .fg(fg::PRIMARY)
        .bg(bg::HIGHLIGHT)
        .attrs(StyleFlags::BOLD)
}

/// A row being moved with the keyboard or mouse.
pub fn dragging() -> Style {
    Style::new().fg(accent::WARNING).bg(bg::SURFACE)
}

pub fn drop_target() -> Style {
    Style::new().fg(accent::SUCCESS).attrs(StyleFlags::UNDERLINE)
}

pub fn kind_tag() -> Style {
    Style::new().fg(accent::PRIMARY)
}

pub fn button() -> Style {
    Style::new().fg(bg::DEEP).bg(accent::PRIMARY)
}

pub fn button_focused() -> Style {
    Style::new()
        .fg(bg::DEEP)
        .bg(accent::SUCCESS)
        .attrs(StyleFlags::BOLD)
}

pub fn danger() -> Style {
    Style::new().fg(accent::ERROR)
}

pub fn code() -> Style {
    Style::new().fg(accent::INFO).bg(bg::BASE)
}

pub fn input() -> Style {
    Style::new().fg(fg::PRIMARY).bg(bg::SURFACE)
}

pub fn input_focused() -> Style {
    Style::new()
        .fg(fg::PRIMARY)
        .bg(bg::HIGHLIGHT)
        .attrs(StyleFlags::UNDERLINE)
}

pub fn placeholder() -> Style {
    Style::new().fg(fg::MUTED).attrs(StyleFlags::ITALIC)
}

pub fn modal() -> Style {
    Style::new().fg(fg::SECONDARY).bg(bg::BASE)
}

pub fn help_overlay() -> Style {
    Style::new().fg(fg::PRIMARY).bg(bg::SURFACE)
}

pub fn status_bar() -> Style {
    Style::new().fg(fg::SECONDARY).bg(bg::SURFACE)
}

pub fn status_error() -> Style {
    Style::new()
        .fg(accent::ERROR)
        .bg(bg::SURFACE)
        .attrs(StyleFlags::BOLD)
}

pub fn status_ok() -> Style {
    Style::new().fg(accent::SUCCESS).bg(bg::SURFACE)
}
