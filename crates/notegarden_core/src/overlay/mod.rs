//! Preview overlay state machine.
//!
//! # Responsibility
//! - Track which note, if any, is being previewed.
//! - Report every transition so location sync and logging can react.
//!
//! # Invariants
//! - At most one record is open at a time.
//! - Opening while open replaces the record in one step.
//! - Transitions never fail.

pub mod state;
