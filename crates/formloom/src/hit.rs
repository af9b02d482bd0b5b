#![forbid(unsafe_code)]

//! Hit-region ids registered during `view` and resolved on mouse input.
//!
//! The `HitData` payload carries the row or index the region stands for.

use formloom_tui::HitId;

/// Pane background; data is the pane index.
pub const PANE: HitId = HitId::new(1);
/// Palette entry; data is the palette index.
pub const PALETTE_ROW: HitId = HitId::new(2);
/// Canvas field row; data is the list index.
pub const CANVAS_ROW: HitId = HitId::new(3);
/// `[x]` delete button on a canvas row; data is the list index.
pub const CANVAS_DELETE: HitId = HitId::new(4);
pub const PREVIEW_TOGGLE: HitId = HitId::new(5);
pub const COPY: HitId = HitId::new(6);

/// Everything behind the editor modal.
pub const EDITOR_BACKDROP: HitId = HitId::new(10);
/// The modal panel itself; swallows clicks between controls.
pub const EDITOR_PANEL: HitId = HitId::new(11);
/// An editor input; data is the focus slot.
pub const EDITOR_INPUT: HitId = HitId::new(12);
/// An option row; data is the option index.
pub const EDITOR_OPTION: HitId = HitId::new(13);
pub const EDITOR_SAVE: HitId = HitId::new(14);
pub const EDITOR_CANCEL: HitId = HitId::new(15);
