#![forbid(unsafe_code)]

//! Field kinds and the property rules attached to each.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// The kind of a form field.
///
/// Determines which properties the editor exposes and which markup fragment
/// the generator emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum FieldKind {
    Text,
    Email,
    Tel,
    Textarea,
    Select,
    Radio,
    Checkbox,
    Button,
}

impl FieldKind {
    /// Every kind, in palette order of first appearance.
    pub const ALL: [FieldKind; 8] = [
        Self::Text,
        Self::Email,
        Self::Tel,
        Self::Select,
        Self::Radio,
        Self::Checkbox,
        Self::Textarea,
        Self::Button,
    ];

    /// The HTML type string for this kind.
    #[must_use]
    pub const fn input_type(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Email => "email",
            Self::Tel => "tel",
            Self::Textarea => "textarea",
            Self::Select => "select",
            Self::Radio => "radio",
            Self::Checkbox => "checkbox",
            Self::Button => "button",
        }
    }

    /// Free-text kinds carry a placeholder; choice and button kinds never do.
    #[must_use]
    pub const fn accepts_placeholder(self) -> bool {
        matches!(self, Self::Text | Self::Email | Self::Tel | Self::Textarea)
    }

    /// Only `select` renders its option list.
    #[must_use]
    pub const fn accepts_options(self) -> bool {
        matches!(self, Self::Select)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.input_type())
    }
}

/// Returned when a string names no known field kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown field kind `{0}`")]
pub struct ParseKindError(pub String);

impl FromStr for FieldKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.input_type() == s)
            .ok_or_else(|| ParseKindError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_kinds() {
        let with: Vec<_> = FieldKind::ALL
            .into_iter()
            .filter(|k| k.accepts_placeholder())
            .collect();
        assert_eq!(
            with,
            vec![
                FieldKind::Text,
                FieldKind::Email,
                FieldKind::Tel,
                FieldKind::Textarea
            ]
        );
    }

    #[test]
    fn only_select_accepts_options() {
        for kind in FieldKind::ALL {
            assert_eq!(kind.accepts_options(), kind == FieldKind::Select);
        }
    }

    #[test]
    fn parse_round_trips_input_type() {
        for kind in FieldKind::ALL {
            assert_eq!(kind.input_type().parse::<FieldKind>(), Ok(kind));
        }
    }

    #[test]
    fn parse_rejects_unknown() {
        let err = "password".parse::<FieldKind>().unwrap_err();
        assert_eq!(err, ParseKindError("password".into()));
        assert_eq!(err.to_string(), "unknown field kind `password`");
    }
}
