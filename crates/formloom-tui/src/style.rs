#![forbid(unsafe_code)]

//! Style: optional colors and attributes layered onto cells.

use crate::cell::{Cell, PackedRgba, StyleFlags};

/// A partial style. Unset fields leave the underlying cell untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    pub fg: Option<PackedRgba>,
    pub bg: Option<PackedRgba>,
    pub attrs: Option<StyleFlags>,
}

impl Style {
    pub const fn new() -> Self {
        Self {
            fg: None,
            bg: None,
            attrs: None,
        }
    }

    #[must_use]
    pub const fn fg(mut self, fg: PackedRgba) -> Self {
        self.fg = Some(fg);
        self
    }

    #[must_use]
    pub const fn bg(mut self, bg: PackedRgba) -> Self {
        self.bg = Some(bg);
        self
    }

    #[must_use]
    pub const fn attrs(mut self, attrs: StyleFlags) -> Self {
        self.attrs = Some(attrs);
        self
    }

    #[must_use]
    pub const fn bold(self) -> Self {
        self.attrs(StyleFlags::BOLD)
    }

    #[must_use]
    pub const fn reversed(self) -> Self {
        self.attrs(StyleFlags::REVERSE)
    }

    /// Layer `other` on top of `self`; fields set in `other` win.
    #[must_use]
    pub fn patch(self, other: Style) -> Self {
        Self {
            fg: other.fg.or(self.fg),
            bg: other.bg.or(self.bg),
            attrs: other.attrs.or(self.attrs),
        }
    }

    /// Apply this style to a cell in place.
    pub fn apply_to(&self, cell: &mut Cell) {
        if let Some(fg) = self.fg {
            cell.fg = fg;
        }
        if let Some(bg) = self.bg {
            cell.bg = bg;
        }
        if let Some(attrs) = self.attrs {
            cell.attrs = attrs;
        }
    }
}
