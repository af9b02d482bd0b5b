#![forbid(unsafe_code)]

//! Domain model for Formloom.
//!
//! # Role in Formloom
//! `formloom-core` owns everything that is not terminal plumbing: the static
//! field palette, placed field instances, the ordered builder list, the
//! editor draft that backs the modal, and the HTML markup generator.
//!
//! # How it fits in the system
//! The `formloom` application keeps a single [`BuilderList`] in its model and
//! mutates it from event handlers. Rendering reads the list; the preview pane
//! and the copy action call [`markup::generate`]. Nothing here performs I/O.

pub mod builder;
pub mod draft;
pub mod field;
pub mod kind;
pub mod markup;
pub mod palette;

pub use builder::{BuilderError, BuilderList};
pub use draft::{DraftError, EditorDraft};
pub use field::{FieldId, FieldInstance, IdGenerator};
pub use kind::{FieldKind, ParseKindError};
pub use palette::{FieldDefinition, PALETTE};
