//! Addressable-location synchronization.
//!
//! # Responsibility
//! - Parse and format listing and preview paths.
//! - Mirror overlay transitions into the location without a reload.
//!
//! # Invariants
//! - `Closed ⇔ {base}` and `Open(r) ⇔ {base}/{r.slug}` once a transition
//!   settles.
//! - Writes are skipped when the location already matches the target.

pub mod provider;
pub mod route;
pub mod sync;
