#![forbid(unsafe_code)]

//! The static field palette.

use crate::kind::FieldKind;

/// A palette entry: the archetype a placed field is instantiated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDefinition {
    /// Stable key, also used as the id prefix of placed fields.
    pub key: &'static str,
    /// Default label.
    pub label: &'static str,
    pub kind: FieldKind,
}

impl FieldDefinition {
    pub const fn new(key: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self { key, label, kind }
    }

    /// Look up a palette entry by key.
    #[must_use]
    pub fn by_key(key: &str) -> Option<&'static FieldDefinition> {
        PALETTE.iter().find(|def| def.key == key)
    }
}

/// Field archetypes offered to the user, in display order.
pub const PALETTE: [FieldDefinition; 8] = [
    FieldDefinition::new("userName", "User Name", FieldKind::Text),
    FieldDefinition::new("email", "Email", FieldKind::Email),
    FieldDefinition::new("number", "Phone Number", FieldKind::Tel),
    FieldDefinition::new("dropdown", "Dropdown", FieldKind::Select),
    FieldDefinition::new("radio", "Radio Button", FieldKind::Radio),
    FieldDefinition::new("checkbox", "Checkbox", FieldKind::Checkbox),
    FieldDefinition::new("textarea", "Text Area", FieldKind::Textarea),
    FieldDefinition::new("cta", "CTA Button", FieldKind::Button),
];
