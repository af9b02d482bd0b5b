#![forbid(unsafe_code)]

//! Terminal rendition of the form being built.
//!
//! Every field becomes one or more text lines that mimic how a browser would
//! show it: text-like inputs get their label on one line and an input box
//! below it; radios, checkboxes and buttons carry their label inline.

use formloom_core::{FieldInstance, FieldKind};
use formloom_tui::widgets::truncate_to_width;
use unicode_width::UnicodeWidthStr;

/// Widest an input box is drawn, borders included.
const CONTROL_WIDTH: usize = 24;
/// Narrowest box that still shows its brackets and one cell of content.
const MIN_CONTROL_WIDTH: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineRole {
    Label,
    Control,
    Button,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewLine {
    pub text: String,
    pub role: LineRole,
}

impl PreviewLine {
    fn new(text: String, role: LineRole) -> Self {
        Self { text, role }
    }
}

/// `[content____]` exactly `width` columns wide.
fn boxed(content: &str, fill: char, trailer: &str, width: usize) -> String {
    let room = width.saturating_sub(2 + trailer.width());
    let content = truncate_to_width(content, room);
    let pad = room - content.width();
    let mut out = String::with_capacity(width + 4);
    out.push('[');
    out.push_str(&content);
    out.extend(std::iter::repeat_n(fill, pad));
    out.push_str(trailer);
    out.push(']');
    out
}

/// Lines for one field, fitted to `width` columns.
pub fn field_lines(field: &FieldInstance, width: usize) -> Vec<PreviewLine> {
    let control = width.clamp(MIN_CONTROL_WIDTH, CONTROL_WIDTH);
    let label = || PreviewLine::new(field.label.clone(), LineRole::Label);
    let input = |content: &str| PreviewLine::new(boxed(content, '_', "", control), LineRole::Control);

    match field.kind {
        FieldKind::Text | FieldKind::Email | FieldKind::Tel => {
            vec![label(), input(field.placeholder_text())]
        }
        FieldKind::Textarea => vec![label(), input(field.placeholder_text()), input("")],
        FieldKind::Select => {
            let first = field.options.first().map(String::as_str).unwrap_or_default();
            let shown = format!(" {first}");
            vec![
                label(),
                PreviewLine::new(boxed(&shown, ' ', " ▾", control), LineRole::Control),
            ]
        }
        FieldKind::Radio => vec![PreviewLine::new(
            format!("( ) {}", field.label),
            LineRole::Control,
        )],
        FieldKind::Checkbox => vec![PreviewLine::new(
            format!("[ ] {}", field.label),
            LineRole::Control,
        )],
        FieldKind::Button => vec![PreviewLine::new(
            format!("[ {} ]", field.label),
            LineRole::Button,
        )],
    }
}

/// Lines for the whole form, fields in list order.
pub fn form_lines(fields: &[FieldInstance], width: usize) -> Vec<PreviewLine> {
    fields.iter().flat_map(|f| field_lines(f, width)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use formloom_core::{FieldDefinition, FieldId};

    fn field(key: &str) -> FieldInstance {
        let definition = FieldDefinition::by_key(key).unwrap();
        FieldInstance::from_definition(FieldId::new(format!("{key}-1")), definition)
    }

    fn texts(lines: &[PreviewLine]) -> Vec<&str> {
        lines.iter().map(|l| l.text.as_str()).collect()
    }

    #[test]
    fn text_inputs_get_label_then_box() {
        let mut email = field("email");
        email.placeholder = Some("you@x".into());
        let lines = field_lines(&email, 12);
        assert_eq!(texts(&lines), ["Email", "[you@x_____]"]);
        assert_eq!(lines[0].role, LineRole::Label);
        assert_eq!(lines[1].role, LineRole::Control);
    }

    #[test]
    fn textarea_spans_two_rows() {
        let lines = field_lines(&field("textarea"), 6);
        assert_eq!(texts(&lines), ["Text Area", "[____]", "[____]"]);
    }

    #[test]
    fn select_shows_first_option_and_arrow() {
        let mut select = field("dropdown");
        assert_eq!(texts(&field_lines(&select, 10))[1], "[       ▾]");
        select.options = vec!["Red".into(), "Blue".into()];
        let lines = field_lines(&select, 10);
        assert_eq!(texts(&lines), ["Dropdown", "[ Red   ▾]"]);
        assert_eq!(lines[1].text.width(), 10);
    }

    #[test]
    fn choice_kinds_render_inline() {
        assert_eq!(texts(&field_lines(&field("radio"), 30)), ["( ) Radio Button"]);
        assert_eq!(texts(&field_lines(&field("checkbox"), 30)), ["[ ] Checkbox"]);
        let button = field_lines(&field("cta"), 30);
        assert_eq!(texts(&button), ["[ CTA Button ]"]);
        assert_eq!(button[0].role, LineRole::Button);
    }

    #[test]
    fn boxes_are_capped_and_truncate_long_placeholders() {
        let mut text = field("userName");
        text.placeholder = Some("a very long placeholder indeed".into());
        let lines = field_lines(&text, 80);
        assert_eq!(lines[1].text.width(), CONTROL_WIDTH);
        assert!(lines[1].text.ends_with("…]"));
        assert_eq!(field_lines(&text, 1)[1].text.width(), MIN_CONTROL_WIDTH);
    }

    #[test]
    fn form_keeps_field_order() {
        let fields = [field("cta"), field("radio")];
        assert_eq!(texts(&form_lines(&fields, 20)), ["[ CTA Button ]", "( ) Radio Button"]);
        assert!(form_lines(&[], 20).is_empty());
    }
}
