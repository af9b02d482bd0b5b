#![forbid(unsafe_code)]

//! Placed field instances and their identifiers.

use std::fmt;

use crate::kind::FieldKind;
use crate::palette::FieldDefinition;

/// Unique identifier of a placed field, rendered as `<palette key>-<serial>`.
///
/// Only uniqueness matters; nothing orders fields by id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct FieldId(String);

impl FieldId {
    /// Wrap an existing id string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Monotonic id source. Serials start at 1 and are never reused.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    next: u64,
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the next id for a field instantiated from `definition`.
    pub fn next_for(&mut self, definition: &FieldDefinition) -> FieldId {
        let serial = self.next;
        self.next += 1;
        FieldId(format!("{}-{serial}", definition.key))
    }
}

/// A field placed on the canvas.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FieldInstance {
    pub id: FieldId,
    pub label: String,
    pub kind: FieldKind,
    /// `Some` exactly when `kind.accepts_placeholder()`.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub placeholder: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub options: Vec<String>,
}

impl FieldInstance {
    /// Instantiate `definition` with its default label and empty properties.
    pub fn from_definition(id: FieldId, definition: &FieldDefinition) -> Self {
        Self {
            id,
            label: definition.label.to_string(),
            kind: definition.kind,
            placeholder: definition.kind.accepts_placeholder().then(String::new),
            options: Vec::new(),
        }
    }

    /// Placeholder text, or empty for kinds without one.
    #[must_use]
    pub fn placeholder_text(&self) -> &str {
        self.placeholder.as_deref().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::PALETTE;

    #[test]
    fn ids_are_prefixed_and_sequential() {
        let mut ids = IdGenerator::new();
        assert_eq!(ids.next_for(&PALETTE[0]).as_str(), "userName-1");
        assert_eq!(ids.next_for(&PALETTE[3]).as_str(), "dropdown-2");
        assert_eq!(ids.next_for(&PALETTE[0]).as_str(), "userName-3");
    }

    #[test]
    fn from_definition_applies_kind_rules() {
        let text = FieldInstance::from_definition(FieldId::new("a"), &PALETTE[0]);
        assert_eq!(text.label, "User Name");
        assert_eq!(text.placeholder.as_deref(), Some(""));

        let button = FieldInstance::from_definition(FieldId::new("b"), &PALETTE[7]);
        assert_eq!(button.placeholder, None);
        assert_eq!(button.placeholder_text(), "");
        assert!(button.options.is_empty());
    }
}
