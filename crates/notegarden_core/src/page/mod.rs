//! Page-level state containers.
//!
//! # Responsibility
//! - Hold the notes catalog page state explicitly so it can be driven
//!   without a rendering environment.

pub mod notes_page;
