#![forbid(unsafe_code)]

//! HTML markup generation.
//!
//! [`generate`] maps the builder list to one HTML fragment per field, joined
//! with newlines in list order. It is a pure function: equal inputs give
//! byte-identical output, and an empty list gives an empty string.
//!
//! All user-supplied text (labels, placeholders, options, ids) is escaped
//! before interpolation, so a label like `<b>` can never produce live markup
//! or break out of an attribute.

use v_htmlescape::escape;

use crate::field::FieldInstance;
use crate::kind::FieldKind;

/// Classes applied to free-text inputs, textareas and selects.
pub const INPUT_CLASS: &str = "border rounded-[.25rem] p-2 mb-4 w-full";
/// Classes applied to radio buttons and checkboxes.
pub const CHOICE_CLASS: &str = "mr-2";
/// Classes applied to call-to-action buttons.
pub const BUTTON_CLASS: &str = "bg-blue-500 text-white p-2 rounded-[.25rem]";

const OPTION_INDENT: &str = "  ";

/// Generate markup for `fields`, in order.
#[must_use]
pub fn generate<'a>(fields: impl IntoIterator<Item = &'a FieldInstance>) -> String {
    fields
        .into_iter()
        .map(fragment)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Markup for a single field.
#[must_use]
pub fn fragment(field: &FieldInstance) -> String {
    match field.kind {
        FieldKind::Text | FieldKind::Email | FieldKind::Tel => {
            let mut out = format!("<input type=\"{}\"", field.kind.input_type());
            if let Some(placeholder) = &field.placeholder {
                out.push_str(&format!(" placeholder=\"{}\"", escape(placeholder)));
            }
            out.push_str(&format!(" class=\"{INPUT_CLASS}\" />"));
            out
        }
        FieldKind::Textarea => {
            let mut out = String::from("<textarea");
            if let Some(placeholder) = &field.placeholder {
                out.push_str(&format!(" placeholder=\"{}\"", escape(placeholder)));
            }
            out.push_str(&format!(" class=\"{INPUT_CLASS}\"></textarea>"));
            out
        }
        FieldKind::Select => {
            let mut out = format!("<select class=\"{INPUT_CLASS}\">\n");
            for option in &field.options {
                let option = escape(option);
                out.push_str(&format!(
                    "{OPTION_INDENT}<option value=\"{option}\">{option}</option>\n"
                ));
            }
            out.push_str("</select>");
            out
        }
        FieldKind::Radio => format!(
            "<input type=\"radio\" name=\"{}\" class=\"{CHOICE_CLASS}\" /> {}",
            escape(field.id.as_str()),
            escape(&field.label)
        ),
        FieldKind::Checkbox => format!(
            "<input type=\"checkbox\" class=\"{CHOICE_CLASS}\" /> {}",
            escape(&field.label)
        ),
        FieldKind::Button => format!(
            "<button class=\"{BUTTON_CLASS}\">{}</button>",
            escape(&field.label)
        ),
    }
}
