#![forbid(unsafe_code)]

//! The builder list: the ordered collection of placed fields.
//!
//! Order is significant. It is the order fields are shown on the canvas and
//! the order their markup is generated in. Every mutation keeps ids unique
//! and leaves untouched fields where they were.

use thiserror::Error;

use crate::draft::EditorDraft;
use crate::field::{FieldId, FieldInstance, IdGenerator};
use crate::palette::FieldDefinition;

/// Errors from builder list mutations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuilderError {
    #[error("no field with id `{0}`")]
    UnknownField(FieldId),
}

/// Ordered field instances plus the id source that names them.
#[derive(Debug, Clone, Default)]
pub struct BuilderList {
    fields: Vec<FieldInstance>,
    ids: IdGenerator,
}

impl BuilderList {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    #[must_use]
    pub fn fields(&self) -> &[FieldInstance] {
        &self.fields
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FieldInstance> {
        self.fields.iter()
    }

    #[must_use]
    pub fn get(&self, id: &FieldId) -> Option<&FieldInstance> {
        self.fields.iter().find(|f| &f.id == id)
    }

    #[must_use]
    pub fn position(&self, id: &FieldId) -> Option<usize> {
        self.fields.iter().position(|f| &f.id == id)
    }

    /// Append a field instantiated from `definition`.
    ///
    /// The label always comes from the palette. When `draft` is given its
    /// placeholder and options are carried over, the placeholder only for
    /// kinds that accept one.
    pub fn add(&mut self, definition: &FieldDefinition, draft: Option<&EditorDraft>) -> FieldId {
        let id = self.ids.next_for(definition);
        let mut field = FieldInstance::from_definition(id.clone(), definition);
        if let Some(draft) = draft {
            if definition.kind.accepts_placeholder() {
                field.placeholder = Some(draft.placeholder().to_string());
            }
            field.options = draft.options().to_vec();
        }

        #[cfg(feature = "tracing")]
        tracing::info!(id = %id, kind = %definition.kind, "field added");

        self.fields.push(field);
        id
    }

    /// Save `draft` over the field named `id`.
    ///
    /// Label, placeholder (per kind) and options come from the draft; id,
    /// kind and position are kept.
    pub fn apply_draft(&mut self, id: &FieldId, draft: &EditorDraft) -> Result<(), BuilderError> {
        let field = self
            .fields
            .iter_mut()
            .find(|f| &f.id == id)
            .ok_or_else(|| BuilderError::UnknownField(id.clone()))?;

        field.label = draft.label().to_string();
        field.placeholder = field
            .kind
            .accepts_placeholder()
            .then(|| draft.placeholder().to_string());
        field.options = draft.options().to_vec();

        #[cfg(feature = "tracing")]
        tracing::info!(id = %id, "field edited");

        Ok(())
    }

    /// Remove the field named `id`. Absent ids are ignored.
    pub fn remove(&mut self, id: &FieldId) -> Option<FieldInstance> {
        let index = self.position(id)?;

        #[cfg(feature = "tracing")]
        tracing::info!(id = %id, index, "field removed");

        Some(self.fields.remove(index))
    }

    /// Move the field at `source` to `destination`, shifting the fields in
    /// between.
    ///
    /// A missing destination (a drag released outside any drop target) or an
    /// out-of-range index leaves the list untouched and returns `false`.
    pub fn reorder(&mut self, source: usize, destination: Option<usize>) -> bool {
        let Some(destination) = destination else {
            return false;
        };
        if source >= self.fields.len() || destination >= self.fields.len() {
            return false;
        }
        let field = self.fields.remove(source);
        self.fields.insert(destination, field);

        #[cfg(feature = "tracing")]
        tracing::debug!(source, destination, "field reordered");

        true
    }

    /// Swap two positions. Out-of-range indices are ignored.
    pub fn swap(&mut self, a: usize, b: usize) -> bool {
        if a >= self.fields.len() || b >= self.fields.len() {
            return false;
        }
        self.fields.swap(a, b);
        true
    }

    /// Swap the field named `id` with its predecessor. Returns its new index.
    pub fn move_up(&mut self, id: &FieldId) -> Option<usize> {
        let index = self.position(id)?;
        if index == 0 {
            return None;
        }
        self.fields.swap(index, index - 1);
        Some(index - 1)
    }

    /// Swap the field named `id` with its successor. Returns its new index.
    pub fn move_down(&mut self, id: &FieldId) -> Option<usize> {
        let index = self.position(id)?;
        if index + 1 >= self.fields.len() {
            return None;
        }
        self.fields.swap(index, index + 1);
        Some(index + 1)
    }
}

impl<'a> IntoIterator for &'a BuilderList {
    type Item = &'a FieldInstance;
    type IntoIter = std::slice::Iter<'a, FieldInstance>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::FieldKind;
    use crate::palette::PALETTE;

    fn def(key: &str) -> &'static FieldDefinition {
        FieldDefinition::by_key(key).unwrap()
    }

    fn ids(list: &BuilderList) -> Vec<String> {
        list.iter().map(|f| f.id.to_string()).collect()
    }

    #[test]
    fn add_without_draft_uses_defaults() {
        let mut list = BuilderList::new();
        let id = list.add(def("userName"), None);
        let field = list.get(&id).unwrap();
        assert_eq!(field.label, "User Name");
        assert_eq!(field.kind, FieldKind::Text);
        assert_eq!(field.placeholder.as_deref(), Some(""));
        assert!(field.options.is_empty());
    }

    #[test]
    fn add_with_draft_carries_options_but_not_label() {
        let mut draft = EditorDraft::new(FieldKind::Select);
        draft.set_label("Country");
        draft.set_placeholder("never shown");
        draft.push_option("NL").unwrap();

        let mut list = BuilderList::new();
        let id = list.add(def("dropdown"), Some(&draft));
        let field = list.get(&id).unwrap();
        assert_eq!(field.label, "Dropdown");
        assert_eq!(field.placeholder, None);
        assert_eq!(field.options, ["NL"]);
    }

    #[test]
    fn add_with_draft_carries_placeholder_across_kinds() {
        let mut draft = EditorDraft::new(FieldKind::Tel);
        draft.set_label("Mobile");
        draft.set_placeholder("555");
        let mut list = BuilderList::new();
        let id = list.add(def("email"), Some(&draft));
        let field = list.get(&id).unwrap();
        assert_eq!(field.label, "Email");
        assert_eq!(field.placeholder.as_deref(), Some("555"));
    }

    #[test]
    fn every_add_gets_a_fresh_id() {
        let mut list = BuilderList::new();
        for def in PALETTE.iter().chain(PALETTE.iter()) {
            list.add(def, None);
        }
        let mut seen = ids(&list);
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), PALETTE.len() * 2);
    }

    #[test]
    fn apply_draft_keeps_id_and_position() {
        let mut list = BuilderList::new();
        let first = list.add(def("userName"), None);
        let second = list.add(def("cta"), None);
        let third = list.add(def("textarea"), None);

        let mut draft = EditorDraft::from_field(list.get(&second).unwrap());
        draft.set_label("Submit");
        draft.set_placeholder("dropped for buttons");
        list.apply_draft(&second, &draft).unwrap();

        assert_eq!(ids(&list), [first.as_str(), second.as_str(), third.as_str()]);
        let saved = list.get(&second).unwrap();
        assert_eq!(saved.label, "Submit");
        assert_eq!(saved.kind, FieldKind::Button);
        assert_eq!(saved.placeholder, None);
        assert_eq!(list.get(&first).unwrap().label, "User Name");
    }

    #[test]
    fn apply_draft_to_unknown_id_fails() {
        let mut list = BuilderList::new();
        list.add(def("userName"), None);
        let missing = FieldId::new("ghost-9");
        let err = list
            .apply_draft(&missing, &EditorDraft::new(FieldKind::Text))
            .unwrap_err();
        assert_eq!(err, BuilderError::UnknownField(missing));
    }

    #[test]
    fn remove_present_and_absent() {
        let mut list = BuilderList::new();
        let a = list.add(def("userName"), None);
        list.add(def("email"), None);

        assert!(list.remove(&FieldId::new("nope-1")).is_none());
        assert_eq!(list.len(), 2);

        let removed = list.remove(&a).unwrap();
        assert_eq!(removed.id, a);
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn reorder_moves_and_shifts() {
        let mut list = BuilderList::new();
        for key in ["userName", "email", "number", "dropdown"] {
            list.add(def(key), None);
        }
        let before = ids(&list);

        assert!(list.reorder(0, Some(2)));
        assert_eq!(
            ids(&list),
            [
                before[1].clone(),
                before[2].clone(),
                before[0].clone(),
                before[3].clone()
            ]
        );

        assert!(list.reorder(3, Some(0)));
        assert_eq!(
            ids(&list),
            [
                before[3].clone(),
                before[1].clone(),
                before[2].clone(),
                before[0].clone()
            ]
        );
    }

    #[test]
    fn reorder_without_destination_is_noop() {
        let mut list = BuilderList::new();
        list.add(def("userName"), None);
        list.add(def("email"), None);
        let before = ids(&list);
        assert!(!list.reorder(0, None));
        assert!(!list.reorder(5, Some(0)));
        assert!(!list.reorder(0, Some(2)));
        assert_eq!(ids(&list), before);
    }

    #[test]
    fn move_up_and_down_stop_at_edges() {
        let mut list = BuilderList::new();
        let a = list.add(def("userName"), None);
        let b = list.add(def("email"), None);

        assert_eq!(list.move_up(&a), None);
        assert_eq!(list.move_down(&b), None);
        assert_eq!(list.move_down(&a), Some(1));
        assert_eq!(list.position(&a), Some(1));
        assert_eq!(list.move_up(&a), Some(0));
        assert!(list.swap(0, 1));
        assert!(!list.swap(0, 2));
    }
}
