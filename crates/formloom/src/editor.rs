#![forbid(unsafe_code)]

//! The field editor modal.
//!
//! Holds an [`EditorDraft`] for one placed field plus the text inputs that
//! feed it. Nothing reaches the builder list until the caller takes the draft
//! on [`EditorOutcome::Save`].

use formloom_core::{DraftError, EditorDraft, FieldId, FieldInstance, FieldKind};
use formloom_tui::widgets::{
    Alignment, Block, BorderType, TextInput, Widget, draw_text_span, truncate_to_width,
};
use formloom_tui::{Event, Frame, HitRegion, KeyCode, KeyEvent, Rect};

use crate::hit;
use crate::theme;

/// Rows reserved for the option list.
const OPTION_ROWS: u16 = 4;
const MAX_WIDTH: u16 = 60;

/// Focusable slots, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorFocus {
    Label,
    Placeholder,
    OptionInput,
    OptionList,
    Save,
    Cancel,
}

impl EditorFocus {
    const ALL: [EditorFocus; 6] = [
        Self::Label,
        Self::Placeholder,
        Self::OptionInput,
        Self::OptionList,
        Self::Save,
        Self::Cancel,
    ];

    pub fn index(self) -> u64 {
        Self::ALL.iter().position(|f| *f == self).unwrap_or(0) as u64
    }

    pub fn from_index(index: u64) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }
}

/// What the modal asks its owner to do after an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorOutcome {
    /// Keep the modal open.
    Continue,
    Save,
    Cancel,
    /// The edit was refused; the modal stays open.
    Rejected(DraftError),
}

#[derive(Debug, Clone)]
pub struct Editor {
    target: FieldId,
    draft: EditorDraft,
    label: TextInput,
    placeholder: TextInput,
    option_input: TextInput,
    option_cursor: usize,
    focus: EditorFocus,
    error: Option<DraftError>,
}

impl Editor {
    /// Open the editor on `field`, seeded with its current properties.
    pub fn open(field: &FieldInstance) -> Self {
        let draft = EditorDraft::from_field(field);
        let mut editor = Self {
            target: field.id.clone(),
            label: TextInput::new()
                .with_value(draft.label())
                .with_placeholder("Field label"),
            placeholder: TextInput::new()
                .with_value(draft.placeholder())
                .with_placeholder("Placeholder text"),
            option_input: TextInput::new().with_placeholder("New option, Enter to add"),
            draft,
            option_cursor: 0,
            focus: EditorFocus::Label,
            error: None,
        };
        editor.sync_focus();
        editor
    }

    pub fn target(&self) -> &FieldId {
        &self.target
    }

    pub fn draft(&self) -> &EditorDraft {
        &self.draft
    }

    pub fn focus(&self) -> EditorFocus {
        self.focus
    }

    pub fn option_cursor(&self) -> usize {
        self.option_cursor
    }

    /// Consume the modal, yielding the field it edits and the final draft.
    pub fn into_parts(self) -> (FieldId, EditorDraft) {
        (self.target, self.draft)
    }

    fn kind(&self) -> FieldKind {
        self.draft.kind()
    }

    /// Focus slots that exist for this field's kind.
    pub fn focus_order(&self) -> Vec<EditorFocus> {
        let kind = self.kind();
        EditorFocus::ALL
            .into_iter()
            .filter(|f| match f {
                EditorFocus::Placeholder => kind.accepts_placeholder(),
                EditorFocus::OptionInput | EditorFocus::OptionList => kind.accepts_options(),
                _ => true,
            })
            .collect()
    }

    /// Move focus to `focus` if the slot exists for this kind.
    pub fn set_focus(&mut self, focus: EditorFocus) {
        if self.focus_order().contains(&focus) {
            self.focus = focus;
            self.sync_focus();
        }
    }

    fn cycle_focus(&mut self, forward: bool) {
        let order = self.focus_order();
        let at = order.iter().position(|f| *f == self.focus).unwrap_or(0);
        let next = if forward {
            (at + 1) % order.len()
        } else {
            (at + order.len() - 1) % order.len()
        };
        self.focus = order[next];
        self.sync_focus();
    }

    fn sync_focus(&mut self) {
        self.label.set_focused(self.focus == EditorFocus::Label);
        self.placeholder
            .set_focused(self.focus == EditorFocus::Placeholder);
        self.option_input
            .set_focused(self.focus == EditorFocus::OptionInput);
    }

    /// Highlight option `index` and focus the list.
    pub fn select_option(&mut self, index: usize) {
        if index < self.draft.options().len() {
            self.option_cursor = index;
            self.set_focus(EditorFocus::OptionList);
        }
    }

    /// Add the option input's text to the draft.
    pub fn add_option(&mut self) -> EditorOutcome {
        match self.draft.push_option(self.option_input.value()) {
            Ok(()) => {
                self.option_input.clear();
                self.option_cursor = self.draft.options().len() - 1;
                self.error = None;
                EditorOutcome::Continue
            }
            Err(err) => {
                tracing::debug!(field = %self.target, "blank option rejected");
                self.error = Some(err.clone());
                EditorOutcome::Rejected(err)
            }
        }
    }

    /// Remove the highlighted option.
    pub fn remove_selected_option(&mut self) -> Option<String> {
        let removed = self.draft.remove_option(self.option_cursor)?;
        let len = self.draft.options().len();
        if self.option_cursor >= len {
            self.option_cursor = len.saturating_sub(1);
        }
        Some(removed)
    }

    pub fn handle_event(&mut self, event: &Event) -> EditorOutcome {
        match event {
            Event::Key(key) if key.kind != formloom_tui::event::KeyEventKind::Release => {
                self.handle_key(key)
            }
            Event::Paste(_) => {
                self.forward_to_input(event);
                EditorOutcome::Continue
            }
            _ => EditorOutcome::Continue,
        }
    }

    fn handle_key(&mut self, key: &KeyEvent) -> EditorOutcome {
        if key.ctrl() && key.is_char('s') {
            return EditorOutcome::Save;
        }
        match key.code {
            KeyCode::Escape => return EditorOutcome::Cancel,
            KeyCode::Tab => {
                self.cycle_focus(true);
                return EditorOutcome::Continue;
            }
            KeyCode::BackTab => {
                self.cycle_focus(false);
                return EditorOutcome::Continue;
            }
            _ => {}
        }

        match self.focus {
            EditorFocus::Save | EditorFocus::Cancel => match key.code {
                KeyCode::Enter | KeyCode::Char(' ') => {
                    if self.focus == EditorFocus::Save {
                        EditorOutcome::Save
                    } else {
                        EditorOutcome::Cancel
                    }
                }
                KeyCode::Left | KeyCode::Right => {
                    self.focus = if self.focus == EditorFocus::Save {
                        EditorFocus::Cancel
                    } else {
                        EditorFocus::Save
                    };
                    EditorOutcome::Continue
                }
                _ => EditorOutcome::Continue,
            },
            EditorFocus::OptionList => {
                let len = self.draft.options().len();
                match key.code {
                    KeyCode::Up | KeyCode::Char('k') => {
                        self.option_cursor = self.option_cursor.saturating_sub(1);
                    }
                    KeyCode::Down | KeyCode::Char('j') if len > 0 => {
                        self.option_cursor = (self.option_cursor + 1).min(len - 1);
                    }
                    KeyCode::Delete | KeyCode::Char('x') => {
                        if let Some(option) = self.remove_selected_option() {
                            tracing::debug!(field = %self.target, option = %option, "option removed");
                        }
                    }
                    _ => {}
                }
                EditorOutcome::Continue
            }
            EditorFocus::OptionInput if key.code == KeyCode::Enter => self.add_option(),
            EditorFocus::Label | EditorFocus::Placeholder if key.code == KeyCode::Enter => {
                self.cycle_focus(true);
                EditorOutcome::Continue
            }
            _ => {
                self.forward_to_input(&Event::Key(*key));
                EditorOutcome::Continue
            }
        }
    }

    fn forward_to_input(&mut self, event: &Event) {
        let changed = match self.focus {
            EditorFocus::Label => self.label.handle_event(event),
            EditorFocus::Placeholder => self.placeholder.handle_event(event),
            EditorFocus::OptionInput => self.option_input.handle_event(event),
            _ => false,
        };
        if changed {
            self.draft.set_label(self.label.value());
            self.draft.set_placeholder(self.placeholder.value());
            if self.focus == EditorFocus::OptionInput {
                self.error = None;
            }
        }
    }

    // --- Rendering ---

    fn content_height(&self) -> u16 {
        let kind = self.kind();
        let mut h = 2;
        if kind.accepts_placeholder() {
            h += 2;
        }
        if kind.accepts_options() {
            h += 2 + OPTION_ROWS;
        }
        // blank, buttons, message
        h + 3
    }

    /// The modal rectangle for a screen of `area`.
    pub fn modal_area(&self, area: Rect) -> Rect {
        let width = MAX_WIDTH.min(area.width.saturating_sub(4)).max(area.width.min(20));
        let height = (self.content_height() + 2).min(area.height);
        area.centered(width, height)
    }

    fn caption(&self, frame: &mut Frame, x: u16, y: u16, text: &str, focused: bool, max_x: u16) {
        let style = if focused {
            theme::title()
        } else {
            theme::muted()
        };
        draw_text_span(frame, x, y, text, style, max_x);
    }

    fn render_input(
        &self,
        frame: &mut Frame,
        input: &TextInput,
        slot: EditorFocus,
        row: Rect,
    ) {
        let style = if self.focus == slot {
            theme::input_focused()
        } else {
            theme::input()
        };
        input
            .clone()
            .with_style(style)
            .with_placeholder_style(theme::placeholder())
            .render(row, frame);
        frame.register_hit(row, hit::EDITOR_INPUT, HitRegion::Content, slot.index());
    }

    /// Draw the modal over `area` and register its hit regions.
    pub fn view(&self, frame: &mut Frame, area: Rect) {
        frame.register_hit(area, hit::EDITOR_BACKDROP, HitRegion::Content, 0);

        let modal = self.modal_area(area);
        let title = format!(" Edit {} · {} ", self.kind(), self.target);
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .title(&title)
            .title_alignment(Alignment::Center)
            .border_style(theme::pane_focused())
            .style(theme::modal());
        block.render(modal, frame);
        frame.register_hit(modal, hit::EDITOR_PANEL, HitRegion::Content, 0);

        let inner = block.inner(modal);
        if inner.is_empty() {
            return;
        }
        let max_x = inner.right();
        let mut y = inner.y;
        let fits = |y: u16| y < inner.bottom();

        if fits(y + 1) {
            self.caption(frame, inner.x, y, "Label", self.focus == EditorFocus::Label, max_x);
            self.render_input(frame, &self.label, EditorFocus::Label, inner.row(y - inner.y + 1));
        }
        y += 2;

        if self.kind().accepts_placeholder() {
            if fits(y + 1) {
                let focused = self.focus == EditorFocus::Placeholder;
                self.caption(frame, inner.x, y, "Placeholder", focused, max_x);
                self.render_input(
                    frame,
                    &self.placeholder,
                    EditorFocus::Placeholder,
                    inner.row(y - inner.y + 1),
                );
            }
            y += 2;
        }

        if self.kind().accepts_options() {
            if fits(y + 1) {
                let focused = matches!(
                    self.focus,
                    EditorFocus::OptionInput | EditorFocus::OptionList
                );
                self.caption(frame, inner.x, y, "Options", focused, max_x);
                self.render_input(
                    frame,
                    &self.option_input,
                    EditorFocus::OptionInput,
                    inner.row(y - inner.y + 1),
                );
            }
            y += 2;
            self.render_options(frame, Rect::new(inner.x, y, inner.width, OPTION_ROWS), inner);
            y += OPTION_ROWS;
        }

        y += 1;
        if fits(y) {
            self.render_buttons(frame, inner.row(y - inner.y));
        }
        y += 1;
        if fits(y) {
            if let Some(err) = &self.error {
                draw_text_span(frame, inner.x, y, &err.to_string(), theme::danger(), max_x);
            }
        }

        // Only inputs place a cursor; keep it off while a button or the list is focused.
        if !matches!(
            self.focus,
            EditorFocus::Label | EditorFocus::Placeholder | EditorFocus::OptionInput
        ) {
            frame.set_cursor(None);
        }
    }

    fn render_options(&self, frame: &mut Frame, list: Rect, clip: Rect) {
        let list = list.intersection(&clip);
        if list.is_empty() {
            return;
        }
        let options = self.draft.options();
        if options.is_empty() {
            draw_text_span(frame, list.x + 2, list.y, "(no options)", theme::muted(), list.right());
            return;
        }
        let rows = list.height as usize;
        let offset = self.option_cursor.saturating_sub(rows.saturating_sub(1));
        for (row, (i, option)) in options.iter().enumerate().skip(offset).take(rows).enumerate() {
            let rect = list.row(row as u16);
            let selected = self.focus == EditorFocus::OptionList && i == self.option_cursor;
            let style = if selected {
                theme::selected()
            } else {
                theme::body()
            };
            frame.buffer.set_style(rect, style);
            let text = truncate_to_width(option, rect.width.saturating_sub(4) as usize);
            draw_text_span(frame, rect.x, rect.y, "  • ", style, rect.right());
            draw_text_span(frame, rect.x + 4, rect.y, &text, style, rect.right());
            frame.register_hit(rect, hit::EDITOR_OPTION, HitRegion::Content, i as u64);
        }
    }

    fn render_buttons(&self, frame: &mut Frame, row: Rect) {
        let mut x = row.x;
        for (label, slot, id) in [
            (" Save ", EditorFocus::Save, hit::EDITOR_SAVE),
            (" Cancel ", EditorFocus::Cancel, hit::EDITOR_CANCEL),
        ] {
            let style = if self.focus == slot {
                theme::button_focused()
            } else {
                theme::button()
            };
            let end = draw_text_span(frame, x, row.y, label, style, row.right());
            frame.register_hit(
                Rect::new(x, row.y, end.saturating_sub(x), 1),
                id,
                HitRegion::Button,
                0,
            );
            x = end.saturating_add(2);
        }
    }
}
