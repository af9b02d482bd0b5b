#![forbid(unsafe_code)]

//! Terminal UI runtime for Formloom.
//!
//! This crate provides the pieces an interactive terminal application needs:
//!
//! - **Terminal lifecycle**: [`terminal_session::TerminalSession`] owns raw
//!   mode and every optional terminal feature, restoring them on drop, panic
//!   or termination signal.
//! - **Events**: [`event::Event`], a backend-independent input model.
//! - **Rendering**: [`buffer::Buffer`] of [`cell::Cell`]s, composed in a
//!   [`frame::Frame`] with a hit grid, and written by the diffing
//!   [`presenter::Presenter`].
//! - **Layout**: [`layout::Flex`] constraint solving over [`geometry::Rect`].
//! - **Widgets**: blocks, paragraphs and a text input.
//! - **Runtime**: the Elm-style [`program::Program`] and its headless twin
//!   [`simulator::ProgramSimulator`].

pub mod buffer;
pub mod cell;
pub mod clipboard;
pub mod event;
pub mod frame;
pub mod geometry;
pub mod layout;
pub mod presenter;
pub mod program;
pub mod simulator;
pub mod style;
pub mod terminal_session;
pub mod widgets;

pub use buffer::Buffer;
pub use cell::{Cell, PackedRgba, StyleFlags};
pub use event::{Event, KeyCode, KeyEvent, Modifiers, MouseButton, MouseEvent, MouseEventKind};
pub use frame::{Frame, HitId, HitRegion};
pub use geometry::Rect;
pub use layout::{Constraint, Flex};
pub use program::{Cmd, Model, Program, ProgramConfig, ScreenMode};
pub use simulator::ProgramSimulator;
pub use style::Style;
