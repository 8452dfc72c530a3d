//! Record store adapters.
//!
//! # Responsibility
//! - Define the fetch contract the catalog page loads notes through.
//! - Provide a SQLite-backed adapter and an in-memory adapter.
//!
//! # Invariants
//! - Adapters apply no catalog filtering; view derivation lives in `catalog`.
//! - Fetch results are ordered newest first with undated records last.

pub mod memory;
pub mod note_store;
pub mod sqlite;
