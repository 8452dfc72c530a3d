//! Domain model for the notes catalog.
//!
//! # Responsibility
//! - Define the note record shape shared by store, catalog and overlay.
//! - Keep topic filtering vocabulary as a closed enumeration.
//!
//! # Invariants
//! - Every record is identified by a stable `NoteId` and a unique slug.

pub mod note;
