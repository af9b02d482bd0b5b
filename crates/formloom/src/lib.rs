#![forbid(unsafe_code)]

//! Terminal form builder.
//!
//! Pick field archetypes from a palette, edit and reorder them on a canvas,
//! and copy the generated HTML through the terminal clipboard.

pub mod app;
pub mod cli;
pub mod editor;
pub mod error;
pub mod hit;
pub mod logging;
pub mod preview;
pub mod theme;

pub use app::FormBuilder;
pub use cli::run_from_env;
pub use error::{AppError, Result};
