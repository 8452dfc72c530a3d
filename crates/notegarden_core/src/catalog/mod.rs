//! Notes catalog derivation.
//!
//! # Responsibility
//! - Derive the visible, ordered note list from loaded records and filters.
//! - Shape card projections consumed by renderers.
//!
//! # Invariants
//! - Nothing in this module mutates records or holds hidden state.

pub mod card;
pub mod view;
