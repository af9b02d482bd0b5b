#![forbid(unsafe_code)]

//! The form builder application model.
//!
//! Three panes share one [`BuilderList`]: the palette adds fields, the canvas
//! edits, deletes and reorders them, and the preview shows the form as it
//! would look above the generated markup. The editor modal and the help
//! overlay sit on top.
//!
//! `view` caches the frame's hit grid so mouse events in `update` resolve
//! against what was last drawn.

use std::cell::RefCell;

use formloom_core::{BuilderList, EditorDraft, FieldDefinition, FieldId, PALETTE, markup};
use formloom_tui::event::KeyEventKind;
use formloom_tui::frame::HitGrid;
use formloom_tui::widgets::{
    Alignment, Block, BorderType, Paragraph, Widget, draw_text_span, truncate_to_width,
};
use formloom_tui::{
    Cmd, Constraint, Event, Flex, Frame, HitRegion, KeyCode, KeyEvent, Model, MouseButton,
    MouseEvent, MouseEventKind, Rect, Style,
};

use crate::editor::{Editor, EditorFocus, EditorOutcome};
use crate::hit;
use crate::preview::{self, LineRole};
use crate::theme;

const PALETTE_WIDTH: u16 = 26;

/// Which pane has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pane {
    Palette,
    Canvas,
    Preview,
}

impl Pane {
    fn index(self) -> u64 {
        match self {
            Self::Palette => 0,
            Self::Canvas => 1,
            Self::Preview => 2,
        }
    }

    fn from_index(i: u64) -> Option<Self> {
        match i {
            0 => Some(Self::Palette),
            1 => Some(Self::Canvas),
            2 => Some(Self::Preview),
            _ => None,
        }
    }
}

/// State of an active mouse drag on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseDrag {
    /// List index the drag started on.
    pub source: usize,
    /// Row under the pointer, `None` when off the list.
    pub hover: Option<usize>,
    /// Whether the pointer moved since the button went down.
    pub moved: bool,
}

/// A field picked up with the keyboard. It moves live; `origin` restores it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Carry {
    pub id: FieldId,
    pub origin: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub text: String,
    pub kind: StatusKind,
}

/// Top-level application message.
#[derive(Debug)]
pub enum Msg {
    Event(Event),
}

impl From<Event> for Msg {
    fn from(event: Event) -> Self {
        Self::Event(event)
    }
}

/// Top-level application state.
pub struct FormBuilder {
    list: BuilderList,
    pane: Pane,
    palette_cursor: usize,
    canvas_cursor: usize,
    show_preview: bool,
    preview_scroll: u16,
    carry: Option<Carry>,
    mouse_drag: Option<MouseDrag>,
    editor: Option<Editor>,
    /// Draft left by a cancelled edit; seeds the next palette add.
    pending_draft: Option<EditorDraft>,
    show_help: bool,
    status: Option<Status>,
    /// Hit grid from the last render. `RefCell` because `view()` takes `&self`.
    last_hits: RefCell<HitGrid>,
}

impl Default for FormBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl FormBuilder {
    pub fn new() -> Self {
        Self {
            list: BuilderList::new(),
            pane: Pane::Palette,
            palette_cursor: 0,
            canvas_cursor: 0,
            show_preview: false,
            preview_scroll: 0,
            carry: None,
            mouse_drag: None,
            editor: None,
            pending_draft: None,
            show_help: false,
            status: None,
            last_hits: RefCell::new(HitGrid::new(0, 0)),
        }
    }

    /// Start with one field per definition, in order.
    pub fn with_fields<'a>(definitions: impl IntoIterator<Item = &'a FieldDefinition>) -> Self {
        let mut app = Self::new();
        for definition in definitions {
            app.list.add(definition, None);
        }
        app
    }

    // --- Accessors ---

    pub fn builder(&self) -> &BuilderList {
        &self.list
    }

    pub fn into_builder(self) -> BuilderList {
        self.list
    }

    pub fn pane(&self) -> Pane {
        self.pane
    }

    pub fn palette_cursor(&self) -> usize {
        self.palette_cursor
    }

    pub fn canvas_cursor(&self) -> usize {
        self.canvas_cursor
    }

    pub fn editor(&self) -> Option<&Editor> {
        self.editor.as_ref()
    }

    pub fn carry(&self) -> Option<&Carry> {
        self.carry.as_ref()
    }

    pub fn mouse_drag(&self) -> Option<&MouseDrag> {
        self.mouse_drag.as_ref()
    }

    pub fn status(&self) -> Option<&Status> {
        self.status.as_ref()
    }

    pub fn show_preview(&self) -> bool {
        self.show_preview
    }

    pub fn pending_draft(&self) -> Option<&EditorDraft> {
        self.pending_draft.as_ref()
    }

    pub fn show_help(&self) -> bool {
        self.show_help
    }

    /// Markup for the current list.
    pub fn markup(&self) -> String {
        markup::generate(self.list.fields())
    }

    // --- Actions ---

    fn info(&mut self, text: impl Into<String>) {
        self.status = Some(Status {
            text: text.into(),
            kind: StatusKind::Info,
        });
    }

    fn error(&mut self, text: impl Into<String>) {
        self.status = Some(Status {
            text: text.into(),
            kind: StatusKind::Error,
        });
    }

    fn panes(&self) -> Vec<Pane> {
        if self.show_preview {
            vec![Pane::Palette, Pane::Canvas, Pane::Preview]
        } else {
            vec![Pane::Palette, Pane::Canvas]
        }
    }

    fn cycle_pane(&mut self, forward: bool) {
        let panes = self.panes();
        let at = panes.iter().position(|p| *p == self.pane).unwrap_or(0);
        let next = if forward {
            (at + 1) % panes.len()
        } else {
            (at + panes.len() - 1) % panes.len()
        };
        self.pane = panes[next];
    }

    fn add_from_palette(&mut self, index: usize) {
        let Some(definition) = PALETTE.get(index) else {
            return;
        };
        let draft = self.pending_draft.take();
        let id = self.list.add(definition, draft.as_ref());
        self.canvas_cursor = self.list.len() - 1;
        self.info(format!("Added {} ({id})", definition.label));
    }

    fn delete_at(&mut self, index: usize) {
        let Some(id) = self.list.fields().get(index).map(|f| f.id.clone()) else {
            return;
        };
        if let Some(removed) = self.list.remove(&id) {
            self.canvas_cursor = self.canvas_cursor.min(self.list.len().saturating_sub(1));
            self.info(format!("Deleted {} ({id})", removed.label));
        }
    }

    fn open_editor(&mut self, index: usize) {
        if let Some(field) = self.list.fields().get(index) {
            tracing::debug!(id = %field.id, "editor opened");
            self.editor = Some(Editor::open(field));
            self.canvas_cursor = index;
        }
    }

    fn save_editor(&mut self) {
        let Some(editor) = self.editor.take() else {
            return;
        };
        let (id, draft) = editor.into_parts();
        self.pending_draft = None;
        match self.list.apply_draft(&id, &draft) {
            Ok(()) => self.info(format!("Saved {id}")),
            Err(err) => {
                tracing::warn!(%err, "edit not applied");
                self.error(err.to_string());
            }
        }
    }

    fn cancel_editor(&mut self) {
        if let Some(editor) = self.editor.take() {
            let (id, draft) = editor.into_parts();
            tracing::debug!(%id, "edit cancelled");
            self.pending_draft = Some(draft);
            self.info("Edit cancelled");
        }
    }

    fn toggle_preview(&mut self) {
        self.show_preview = !self.show_preview;
        if !self.show_preview && self.pane == Pane::Preview {
            self.pane = Pane::Canvas;
        }
    }

    fn copy_markup(&mut self) -> Cmd {
        if self.list.is_empty() {
            self.error("Nothing to copy: the form is empty");
            return Cmd::none();
        }
        let markup = self.markup();
        tracing::info!(fields = self.list.len(), bytes = markup.len(), "markup copied");
        self.info(format!("Copied markup for {} field(s)", self.list.len()));
        Cmd::set_clipboard(markup)
    }

    fn pick_up(&mut self) {
        if let Some(field) = self.list.fields().get(self.canvas_cursor) {
            self.carry = Some(Carry {
                id: field.id.clone(),
                origin: self.canvas_cursor,
            });
            self.info("Moving: arrows to move, Space/Enter to drop, Esc to cancel");
        }
    }

    fn move_carried(&mut self, up: bool) {
        let Some(carry) = &self.carry else {
            return;
        };
        let moved = if up {
            self.list.move_up(&carry.id)
        } else {
            self.list.move_down(&carry.id)
        };
        if let Some(index) = moved {
            self.canvas_cursor = index;
        }
    }

    fn drop_carried(&mut self) {
        if let Some(carry) = self.carry.take() {
            tracing::info!(id = %carry.id, from = carry.origin, to = self.canvas_cursor, "field moved");
            self.info(format!("Moved {} to position {}", carry.id, self.canvas_cursor + 1));
        }
    }

    fn cancel_carry(&mut self) {
        if let Some(carry) = self.carry.take() {
            if let Some(current) = self.list.position(&carry.id) {
                self.list.reorder(current, Some(carry.origin));
                self.canvas_cursor = carry.origin;
            }
            self.info("Move cancelled");
        }
    }

    fn move_selected(&mut self, up: bool) {
        let Some(id) = self.list.fields().get(self.canvas_cursor).map(|f| f.id.clone()) else {
            return;
        };
        let moved = if up {
            self.list.move_up(&id)
        } else {
            self.list.move_down(&id)
        };
        if let Some(index) = moved {
            self.canvas_cursor = index;
        }
    }

    // --- Event handling ---

    fn handle_key(&mut self, key: &KeyEvent) -> Cmd {
        if key.ctrl() && key.is_char('c') {
            return Cmd::quit();
        }

        if self.show_help {
            self.show_help = false;
            return Cmd::none();
        }

        if self.carry.is_some() {
            match key.code {
                KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K') => self.move_carried(true),
                KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') => {
                    self.move_carried(false)
                }
                KeyCode::Char(' ') | KeyCode::Enter => self.drop_carried(),
                KeyCode::Escape => self.cancel_carry(),
                _ => {}
            }
            return Cmd::none();
        }

        match key.code {
            KeyCode::Char('q') => return Cmd::quit(),
            KeyCode::Char('?') => {
                self.show_help = true;
                return Cmd::none();
            }
            KeyCode::Tab => {
                self.cycle_pane(true);
                return Cmd::none();
            }
            KeyCode::BackTab => {
                self.cycle_pane(false);
                return Cmd::none();
            }
            KeyCode::Char('p') => {
                self.toggle_preview();
                return Cmd::none();
            }
            KeyCode::Char('y') => return self.copy_markup(),
            _ => {}
        }

        match self.pane {
            Pane::Palette => match key.code {
                KeyCode::Up | KeyCode::Char('k') => {
                    self.palette_cursor = self.palette_cursor.saturating_sub(1);
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    self.palette_cursor = (self.palette_cursor + 1).min(PALETTE.len() - 1);
                }
                KeyCode::Enter | KeyCode::Char(' ') => self.add_from_palette(self.palette_cursor),
                _ => {}
            },
            Pane::Canvas => match key.code {
                KeyCode::Up | KeyCode::Char('k') => {
                    self.canvas_cursor = self.canvas_cursor.saturating_sub(1);
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    self.canvas_cursor =
                        (self.canvas_cursor + 1).min(self.list.len().saturating_sub(1));
                }
                KeyCode::Char('K') => self.move_selected(true),
                KeyCode::Char('J') => self.move_selected(false),
                KeyCode::Enter | KeyCode::Char('e') => self.open_editor(self.canvas_cursor),
                KeyCode::Char('x') | KeyCode::Delete => self.delete_at(self.canvas_cursor),
                KeyCode::Char(' ') => self.pick_up(),
                _ => {}
            },
            Pane::Preview => match key.code {
                KeyCode::Up | KeyCode::Char('k') => {
                    self.preview_scroll = self.preview_scroll.saturating_sub(1);
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    self.preview_scroll = self.preview_scroll.saturating_add(1);
                }
                KeyCode::Home => self.preview_scroll = 0,
                _ => {}
            },
        }
        Cmd::none()
    }

    fn hit_test(&self, x: u16, y: u16) -> Option<(formloom_tui::HitId, HitRegion, u64)> {
        self.last_hits.borrow().hit_test(x, y)
    }

    fn handle_mouse(&mut self, mouse: &MouseEvent) -> Cmd {
        let hit = self.hit_test(mouse.x, mouse.y);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.show_help = false;
                let Some((id, _, data)) = hit else {
                    return Cmd::none();
                };
                let index = data as usize;
                match id {
                    hit::PALETTE_ROW => {
                        self.pane = Pane::Palette;
                        self.palette_cursor = index;
                        self.add_from_palette(index);
                    }
                    hit::CANVAS_ROW => {
                        self.pane = Pane::Canvas;
                        self.canvas_cursor = index;
                        self.mouse_drag = Some(MouseDrag {
                            source: index,
                            hover: Some(index),
                            moved: false,
                        });
                    }
                    hit::CANVAS_DELETE => {
                        self.pane = Pane::Canvas;
                        self.delete_at(index);
                    }
                    hit::PREVIEW_TOGGLE => self.toggle_preview(),
                    hit::COPY => return self.copy_markup(),
                    hit::PANE => {
                        if let Some(pane) = Pane::from_index(data) {
                            self.pane = pane;
                        }
                    }
                    _ => {}
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                let hover = match hit {
                    Some((hit::CANVAS_ROW | hit::CANVAS_DELETE, _, data)) => Some(data as usize),
                    _ => None,
                };
                if let Some(drag) = &mut self.mouse_drag {
                    drag.hover = hover;
                    drag.moved = true;
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                if let Some(drag) = self.mouse_drag.take() {
                    self.finish_drag(drag);
                }
            }
            MouseEventKind::ScrollUp | MouseEventKind::ScrollDown => {
                let up = mouse.kind == MouseEventKind::ScrollUp;
                let pane = match hit {
                    Some((hit::PALETTE_ROW, ..)) => Some(Pane::Palette),
                    Some((hit::CANVAS_ROW | hit::CANVAS_DELETE, ..)) => Some(Pane::Canvas),
                    Some((hit::PANE, _, data)) => Pane::from_index(data),
                    _ => None,
                };
                if let Some(pane) = pane {
                    self.pane = pane;
                    let code = if up { KeyCode::Up } else { KeyCode::Down };
                    return self.handle_key(&KeyEvent::new(code));
                }
            }
            _ => {}
        }
        Cmd::none()
    }

    /// A press and release on the same row without motion is a click and opens
    /// the editor; anything else is a drop.
    fn finish_drag(&mut self, drag: MouseDrag) {
        if !drag.moved && drag.hover == Some(drag.source) {
            self.open_editor(drag.source);
            return;
        }
        if self.list.reorder(drag.source, drag.hover) {
            if let Some(to) = drag.hover {
                self.canvas_cursor = to;
                self.info(format!("Moved field to position {}", to + 1));
            }
        } else {
            tracing::debug!(source = drag.source, "drag released outside the list");
        }
    }

    fn handle_editor_event(&mut self, event: &Event) -> Cmd {
        let outcome = match event {
            Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                self.handle_editor_click(mouse)
            }
            Event::Mouse(_) => EditorOutcome::Continue,
            Event::Key(key) if key.ctrl() && key.is_char('c') => return Cmd::quit(),
            other => match &mut self.editor {
                Some(editor) => editor.handle_event(other),
                None => EditorOutcome::Continue,
            },
        };
        match outcome {
            EditorOutcome::Save => self.save_editor(),
            EditorOutcome::Cancel => self.cancel_editor(),
            EditorOutcome::Rejected(err) => self.error(err.to_string()),
            EditorOutcome::Continue => {}
        }
        Cmd::none()
    }

    fn handle_editor_click(&mut self, mouse: &MouseEvent) -> EditorOutcome {
        let Some((id, _, data)) = self.hit_test(mouse.x, mouse.y) else {
            return EditorOutcome::Continue;
        };
        let Some(editor) = &mut self.editor else {
            return EditorOutcome::Continue;
        };
        match id {
            hit::EDITOR_BACKDROP => EditorOutcome::Cancel,
            hit::EDITOR_SAVE => EditorOutcome::Save,
            hit::EDITOR_CANCEL => EditorOutcome::Cancel,
            hit::EDITOR_INPUT => {
                if let Some(focus) = EditorFocus::from_index(data) {
                    editor.set_focus(focus);
                }
                EditorOutcome::Continue
            }
            hit::EDITOR_OPTION => {
                editor.select_option(data as usize);
                EditorOutcome::Continue
            }
            _ => EditorOutcome::Continue,
        }
    }

    // --- Rendering ---

    fn pane_block<'a>(&self, pane: Pane, title: &'a str) -> Block<'a> {
        let focused = self.pane == pane && self.editor.is_none();
        Block::bordered()
            .border_type(if focused {
                BorderType::Thick
            } else {
                BorderType::Rounded
            })
            .title(title)
            .border_style(if focused {
                theme::pane_focused()
            } else {
                theme::pane()
            })
            .style(Style::new().bg(theme::bg::DEEP))
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        Paragraph::new(" Formloom · form builder")
            .style(theme::status_bar().patch(theme::title()))
            .render(area, frame);

        let preview_label = if self.show_preview {
            "[Back to Edit]"
        } else {
            "[Preview]"
        };
        let copy_label = "[Copy]";
        let width = (preview_label.len() + copy_label.len() + 2) as u16;
        let mut x = area.right().saturating_sub(width);
        for (label, id) in [(preview_label, hit::PREVIEW_TOGGLE), (copy_label, hit::COPY)] {
            let end = draw_text_span(frame, x, area.y, label, theme::button(), area.right());
            frame.register_hit(
                Rect::new(x, area.y, end.saturating_sub(x), 1),
                id,
                HitRegion::Button,
                0,
            );
            x = end.saturating_add(1);
        }
    }

    fn render_palette(&self, frame: &mut Frame, area: Rect) {
        let block = self.pane_block(Pane::Palette, " Palette ");
        block.render(area, frame);
        frame.register_hit(area, hit::PANE, HitRegion::Content, Pane::Palette.index());
        let inner = block.inner(area);

        let focused = self.pane == Pane::Palette;
        for (i, definition) in PALETTE.iter().enumerate() {
            let row = inner.row(i as u16);
            if row.is_empty() {
                break;
            }
            let selected = i == self.palette_cursor;
            let style = if selected && focused {
                theme::selected()
            } else {
                theme::body()
            };
            frame.buffer.set_style(row, style);
            let marker = if selected { "› " } else { "  " };
            let x = draw_text_span(frame, row.x, row.y, marker, style, row.right());
            let x = draw_text_span(frame, x, row.y, definition.label, style, row.right());
            let tag = format!(" {}", definition.kind);
            let tag_x = row.right().saturating_sub(tag.len() as u16).max(x);
            draw_text_span(frame, tag_x, row.y, &tag, theme::kind_tag(), row.right());
            frame.register_hit(row, hit::PALETTE_ROW, HitRegion::Content, i as u64);
        }
    }

    fn render_canvas(&self, frame: &mut Frame, area: Rect) {
        let title = format!(" Form ({}) ", self.list.len());
        let block = self.pane_block(Pane::Canvas, &title);
        block.render(area, frame);
        frame.register_hit(area, hit::PANE, HitRegion::Content, Pane::Canvas.index());
        let inner = block.inner(area);
        if inner.is_empty() {
            return;
        }

        if self.list.is_empty() {
            Paragraph::new("(empty)\nClick a palette entry or press Enter on it to add a field.")
                .wrap(true)
                .style(theme::muted())
                .render(inner, frame);
            return;
        }

        let rows = inner.height as usize;
        let offset = self.canvas_cursor.saturating_sub(rows.saturating_sub(1));
        let focused = self.pane == Pane::Canvas;
        for (row_idx, (i, field)) in self
            .list
            .iter()
            .enumerate()
            .skip(offset)
            .take(rows)
            .enumerate()
        {
            let row = inner.row(row_idx as u16);
            let carried = self.carry.as_ref().is_some_and(|c| c.id == field.id);
            let drag_source = self
                .mouse_drag
                .is_some_and(|d| d.moved && d.source == i);
            let drop_target = self
                .mouse_drag
                .is_some_and(|d| d.moved && d.source != i && d.hover == Some(i));

            let style = if carried || drag_source {
                theme::dragging()
            } else if drop_target {
                theme::drop_target()
            } else if focused && i == self.canvas_cursor {
                theme::selected()
            } else {
                theme::body()
            };
            frame.buffer.set_style(row, style);

            let delete = "[x]";
            let delete_x = row.right().saturating_sub(delete.len() as u16);
            let prefix = format!("{:>2}. ", i + 1);
            let x = draw_text_span(frame, row.x, row.y, &prefix, style, delete_x);
            let tag = format!(" {} · {}", field.kind, field.id);
            let label_room = delete_x.saturating_sub(x).saturating_sub(tag.len() as u16 + 1);
            let label = truncate_to_width(&field.label, label_room as usize);
            let x = draw_text_span(frame, x, row.y, &label, style, delete_x);
            draw_text_span(frame, x, row.y, &tag, theme::muted(), delete_x.saturating_sub(1));
            draw_text_span(frame, delete_x, row.y, delete, theme::danger(), row.right());

            frame.register_hit(
                Rect::new(row.x, row.y, delete_x.saturating_sub(row.x), 1),
                hit::CANVAS_ROW,
                HitRegion::Content,
                i as u64,
            );
            frame.register_hit(
                Rect::new(delete_x, row.y, row.right().saturating_sub(delete_x), 1),
                hit::CANVAS_DELETE,
                HitRegion::Button,
                i as u64,
            );
        }
    }

    fn render_preview(&self, frame: &mut Frame, area: Rect) {
        let parts = Flex::vertical()
            .constraints([Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)])
            .split(area);
        self.render_form_preview(frame, parts[0]);
        self.render_code(frame, parts[1]);
    }

    fn render_form_preview(&self, frame: &mut Frame, area: Rect) {
        let block = self.pane_block(Pane::Preview, " Preview ");
        block.render(area, frame);
        frame.register_hit(area, hit::PANE, HitRegion::Content, Pane::Preview.index());
        let inner = block.inner(area);
        if inner.is_empty() {
            return;
        }

        if self.list.is_empty() {
            Paragraph::new("(nothing to preview)")
                .style(theme::muted())
                .render(inner, frame);
            return;
        }

        let lines = preview::form_lines(self.list.fields(), inner.width as usize);
        let rows = inner.height as usize;
        let overflow = lines.len() > rows;
        let shown = if overflow { rows - 1 } else { lines.len() };
        for (i, line) in lines.iter().take(shown).enumerate() {
            let style = match line.role {
                LineRole::Label => theme::body(),
                LineRole::Control => theme::input(),
                LineRole::Button => theme::button(),
            };
            let row = inner.row(i as u16);
            draw_text_span(frame, row.x, row.y, &line.text, style, row.right());
        }
        if overflow {
            let row = inner.row(shown as u16);
            let more = format!("… {} more line(s)", lines.len() - shown);
            draw_text_span(frame, row.x, row.y, &more, theme::muted(), row.right());
        }
    }

    fn render_code(&self, frame: &mut Frame, area: Rect) {
        let block = self.pane_block(Pane::Preview, " Generated Code ");
        block.render(area, frame);
        frame.register_hit(area, hit::PANE, HitRegion::Content, Pane::Preview.index());
        let inner = block.inner(area);

        let markup = self.markup();
        if markup.is_empty() {
            Paragraph::new("(no markup yet)")
                .style(theme::muted())
                .render(inner, frame);
            return;
        }
        let paragraph = Paragraph::new(markup).wrap(true).style(theme::code());
        let max_scroll = paragraph
            .line_count(inner.width)
            .saturating_sub(inner.height as usize) as u16;
        paragraph
            .scroll(self.preview_scroll.min(max_scroll))
            .render(inner, frame);
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        let (text, style) = match &self.status {
            Some(Status {
                text,
                kind: StatusKind::Error,
            }) => (text.clone(), theme::status_error()),
            Some(Status { text, .. }) => (text.clone(), theme::status_ok()),
            None => (
                "Tab pane · Enter add/edit · x delete · J/K move · p preview · y copy · ? help · q quit"
                    .to_string(),
                theme::status_bar(),
            ),
        };
        Paragraph::new(format!(" {text}"))
            .style(style)
            .render(area, frame);
        let count = format!("{} field(s) ", self.list.len());
        let x = area.right().saturating_sub(count.len() as u16);
        draw_text_span(frame, x, area.y, &count, theme::status_bar(), area.right());
    }

    fn render_help_overlay(&self, frame: &mut Frame, area: Rect) {
        let overlay = area.centered(58.min(area.width.saturating_sub(4)), 18.min(area.height));
        let block = Block::bordered()
            .border_type(BorderType::Double)
            .title(" Help ")
            .title_alignment(Alignment::Center)
            .style(theme::help_overlay());
        block.render(overlay, frame);
        Paragraph::new(
            "Tab / Shift+Tab    switch pane\n\
             j k / arrows       move cursor\n\
             Enter / Space      add palette entry\n\
             Enter / e          edit field\n\
             x / Delete         delete field\n\
             Shift+K / Shift+J  move field up / down\n\
             Space              pick up field, arrows move, Space drops\n\
             p                  toggle preview\n\
             y                  copy markup to clipboard\n\
             Mouse              click to add/edit, drag rows to reorder\n\
             q / Ctrl+C         quit\n\
             \n\
             Editor: Tab cycles, Enter adds option, Ctrl+S saves, Esc cancels",
        )
        .style(theme::help_overlay())
        .render(block.inner(overlay), frame);
    }
}

impl Model for FormBuilder {
    type Message = Msg;

    fn update(&mut self, msg: Msg) -> Cmd {
        let Msg::Event(event) = msg;

        let starts_interaction = matches!(
            event,
            Event::Key(KeyEvent {
                kind: KeyEventKind::Press,
                ..
            }) | Event::Mouse(MouseEvent {
                kind: MouseEventKind::Down(_),
                ..
            })
        );
        if starts_interaction {
            self.status = None;
        }

        if self.editor.is_some() {
            return self.handle_editor_event(&event);
        }

        match &event {
            Event::Key(key) if key.kind != KeyEventKind::Release => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Resize { .. } => {
                // Layout is recomputed on the next view; stale hits must not match.
                self.mouse_drag = None;
                Cmd::none()
            }
            _ => Cmd::none(),
        }
    }

    fn view(&self, frame: &mut Frame) {
        let area = frame.bounds();
        if area.is_empty() {
            return;
        }

        let chunks = Flex::vertical()
            .constraints([
                Constraint::Fixed(1),
                Constraint::Min(3),
                Constraint::Fixed(1),
            ])
            .split(area);

        self.render_header(frame, chunks[0]);

        let body = if self.show_preview {
            Flex::horizontal()
                .constraints([
                    Constraint::Fixed(PALETTE_WIDTH),
                    Constraint::Ratio(1, 2),
                    Constraint::Ratio(1, 2),
                ])
                .split(chunks[1])
        } else {
            Flex::horizontal()
                .constraints([Constraint::Fixed(PALETTE_WIDTH), Constraint::Min(10)])
                .split(chunks[1])
        };
        self.render_palette(frame, body[0]);
        self.render_canvas(frame, body[1]);
        if let Some(preview) = body.get(2) {
            self.render_preview(frame, *preview);
        }

        self.render_status(frame, chunks[2]);

        if self.show_help {
            self.render_help_overlay(frame, area);
        }
        if let Some(editor) = &self.editor {
            editor.view(frame, area);
        }

        self.last_hits.replace(frame.hit_grid.clone());
    }
}
