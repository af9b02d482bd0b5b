//! Property-based invariant tests for the builder list and markup generator.
//!
//! 1. Adding N palette entries yields N fields with N distinct ids.
//! 2. Reordering preserves length and the id set.
//! 3. Editing preserves id and position and applies the kind rules.
//! 4. Removing an absent id is a no-op; a present id shrinks the list by one.
//! 5. Markup is a pure function of the list.
//! 6. User text never reaches the markup unescaped.

use std::collections::BTreeSet;

use formloom_core::{BuilderList, EditorDraft, FieldId, PALETTE, markup};
use proptest::prelude::*;

// ── Strategies ────────────────────────────────────────────────────────────

fn palette_indices(max: usize) -> impl Strategy<Value = Vec<usize>> {
    prop::collection::vec(0..PALETTE.len(), 0..max)
}

fn build(indices: &[usize]) -> BuilderList {
    let mut list = BuilderList::new();
    for &i in indices {
        list.add(&PALETTE[i], None);
    }
    list
}

fn id_set(list: &BuilderList) -> BTreeSet<String> {
    list.iter().map(|f| f.id.to_string()).collect()
}

/// Text that is likely to contain markup-significant characters.
fn hostile_text() -> impl Strategy<Value = String> {
    "[a-z<>\"'& ]{1,12}"
}

/// Like [`hostile_text`] but never blank, so it is always a valid option.
fn option_text() -> impl Strategy<Value = String> {
    "[a-z<>&][a-z<>\"'& ]{0,11}"
}

proptest! {
    #[test]
    fn adding_n_entries_yields_n_distinct_ids(indices in palette_indices(40)) {
        let list = build(&indices);
        prop_assert_eq!(list.len(), indices.len());
        prop_assert_eq!(id_set(&list).len(), indices.len());
    }

    #[test]
    fn reorder_preserves_length_and_ids(
        indices in palette_indices(20).prop_filter("non-empty", |v| !v.is_empty()),
        source in any::<prop::sample::Index>(),
        destination in any::<prop::sample::Index>(),
    ) {
        let mut list = build(&indices);
        let before = id_set(&list);
        let source = source.index(list.len());
        let destination = destination.index(list.len());
        let moved = list.fields()[source].id.clone();

        prop_assert!(list.reorder(source, Some(destination)));
        prop_assert_eq!(list.len(), indices.len());
        prop_assert_eq!(id_set(&list), before);
        prop_assert_eq!(list.position(&moved), Some(destination));
    }

    #[test]
    fn reorder_without_target_changes_nothing(
        indices in palette_indices(20),
        source in 0usize..25,
    ) {
        let mut list = build(&indices);
        let before: Vec<_> = list.iter().cloned().collect();
        prop_assert!(!list.reorder(source, None));
        prop_assert_eq!(list.fields(), before.as_slice());
    }

    #[test]
    fn edit_preserves_id_and_position(
        indices in palette_indices(12).prop_filter("non-empty", |v| !v.is_empty()),
        pick in any::<prop::sample::Index>(),
        label in hostile_text(),
        placeholder in hostile_text(),
        options in prop::collection::vec(option_text(), 0..4),
    ) {
        let mut list = build(&indices);
        let index = pick.index(list.len());
        let target = list.fields()[index].clone();
        let others: Vec<_> = list
            .iter()
            .filter(|f| f.id != target.id)
            .cloned()
            .collect();

        let mut draft = EditorDraft::from_field(&target);
        draft.set_label(label.clone());
        draft.set_placeholder(placeholder.clone());
        for option in &options {
            draft.push_option(option.clone()).unwrap();
        }
        list.apply_draft(&target.id, &draft).unwrap();

        let saved = &list.fields()[index];
        prop_assert_eq!(&saved.id, &target.id);
        prop_assert_eq!(saved.kind, target.kind);
        prop_assert_eq!(&saved.label, &label);
        prop_assert_eq!(&saved.options, &options);
        if target.kind.accepts_placeholder() {
            prop_assert_eq!(saved.placeholder.as_deref(), Some(placeholder.as_str()));
        } else {
            prop_assert_eq!(saved.placeholder.as_deref(), None);
        }
        let after: Vec<_> = list
            .iter()
            .filter(|f| f.id != target.id)
            .cloned()
            .collect();
        prop_assert_eq!(after, others);
    }

    #[test]
    fn remove_absent_is_noop_and_present_shrinks_by_one(
        indices in palette_indices(20).prop_filter("non-empty", |v| !v.is_empty()),
        pick in any::<prop::sample::Index>(),
    ) {
        let mut list = build(&indices);
        prop_assert!(list.remove(&FieldId::new("absent-0")).is_none());
        prop_assert_eq!(list.len(), indices.len());

        let id = list.fields()[pick.index(list.len())].id.clone();
        prop_assert!(list.remove(&id).is_some());
        prop_assert_eq!(list.len(), indices.len() - 1);
        prop_assert!(list.get(&id).is_none());
    }

    #[test]
    fn markup_is_pure(indices in palette_indices(20)) {
        let a = build(&indices);
        let b = build(&indices);
        prop_assert_eq!(markup::generate(&a), markup::generate(&b));
        prop_assert_eq!(markup::generate(&a), markup::generate(&a));
        prop_assert_eq!(markup::generate(&a).is_empty(), indices.is_empty());
    }

    #[test]
    fn user_text_is_always_escaped(
        index in 0..PALETTE.len(),
        label in hostile_text(),
        option in hostile_text(),
    ) {
        let mut list = BuilderList::new();
        let id = list.add(&PALETTE[index], None);
        let mut draft = EditorDraft::from_field(list.get(&id).unwrap());
        // No generated tag or attribute value starts with `z`.
        let raw_label = format!("<z{label}>");
        let raw_option = format!("<z{option}>");
        let raw_placeholder = format!("\"z{label}\"");
        draft.set_label(raw_label.clone());
        draft.set_placeholder(raw_placeholder.clone());
        draft.push_option(raw_option.clone()).unwrap();
        list.apply_draft(&id, &draft).unwrap();

        let out = markup::generate(&list);
        prop_assert!(!out.contains(&raw_label));
        prop_assert!(!out.contains(&raw_option));
        prop_assert!(!out.contains(&raw_placeholder));
    }
}

#[test]
fn text_then_select_example() {
    let mut list = BuilderList::new();
    list.add(&PALETTE[0], None);
    let dropdown = formloom_core::FieldDefinition::by_key("dropdown").unwrap();
    let id = list.add(dropdown, None);

    let mut draft = EditorDraft::from_field(list.get(&id).unwrap());
    draft.push_option("A").unwrap();
    draft.push_option("B").unwrap();
    list.apply_draft(&id, &draft).unwrap();

    let out = markup::generate(&list);
    let input = out.find("<input type=\"text\"").expect("text input fragment");
    let select = out.find("<select").expect("select fragment");
    let a = out.find("<option value=\"A\">A</option>").expect("option A");
    let b = out.find("<option value=\"B\">B</option>").expect("option B");
    assert!(input < select && select < a && a < b);
    assert_eq!(out.matches("<input").count(), 1);
    assert_eq!(out.matches("<select").count(), 1);
    assert_eq!(out.matches("<option").count(), 2);
}
