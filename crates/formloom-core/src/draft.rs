#![forbid(unsafe_code)]

//! The editor draft: the unsaved property set shown in the modal.

use thiserror::Error;

use crate::field::FieldInstance;
use crate::kind::FieldKind;

/// Rejections raised while editing a draft.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("option text is blank")]
    BlankOption,
}

/// In-progress properties for one field.
///
/// A draft never touches the builder list by itself; saving goes through
/// [`BuilderList::apply_draft`](crate::BuilderList::apply_draft).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorDraft {
    kind: FieldKind,
    label: String,
    placeholder: String,
    options: Vec<String>,
}

impl EditorDraft {
    /// An empty draft for a field of `kind`.
    pub fn new(kind: FieldKind) -> Self {
        Self {
            kind,
            label: String::new(),
            placeholder: String::new(),
            options: Vec::new(),
        }
    }

    /// Seed a draft from an existing instance.
    pub fn from_field(field: &FieldInstance) -> Self {
        Self {
            kind: field.kind,
            label: field.label.clone(),
            placeholder: field.placeholder_text().to_string(),
            options: field.options.clone(),
        }
    }

    #[must_use]
    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    pub fn set_placeholder(&mut self, placeholder: impl Into<String>) {
        self.placeholder = placeholder.into();
    }

    /// Append an option. Blank text is rejected; anything else is kept as typed.
    pub fn push_option(&mut self, text: impl Into<String>) -> Result<(), DraftError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(DraftError::BlankOption);
        }
        self.options.push(text);
        Ok(())
    }

    /// Remove the option at `index`, returning it.
    pub fn remove_option(&mut self, index: usize) -> Option<String> {
        (index < self.options.len()).then(|| self.options.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldId;

    fn select_field() -> FieldInstance {
        FieldInstance {
            id: FieldId::new("dropdown-1"),
            label: "Pick".into(),
            kind: FieldKind::Select,
            placeholder: None,
            options: vec!["A".into(), "B".into()],
        }
    }

    #[test]
    fn seeds_from_field() {
        let draft = EditorDraft::from_field(&select_field());
        assert_eq!(draft.kind(), FieldKind::Select);
        assert_eq!(draft.label(), "Pick");
        assert_eq!(draft.placeholder(), "");
        assert_eq!(draft.options(), ["A", "B"]);
    }

    #[test]
    fn blank_options_are_rejected() {
        let mut draft = EditorDraft::new(FieldKind::Select);
        assert_eq!(draft.push_option(""), Err(DraftError::BlankOption));
        assert_eq!(draft.push_option("   \t"), Err(DraftError::BlankOption));
        assert!(draft.options().is_empty());
    }

    #[test]
    fn options_keep_typed_text() {
        let mut draft = EditorDraft::new(FieldKind::Select);
        draft.push_option(" padded ").unwrap();
        assert_eq!(draft.options(), [" padded "]);
    }

    #[test]
    fn remove_option_by_index() {
        let mut draft = EditorDraft::from_field(&select_field());
        assert_eq!(draft.remove_option(5), None);
        assert_eq!(draft.remove_option(0).as_deref(), Some("A"));
        assert_eq!(draft.options(), ["B"]);
    }
}
