//! Share-link action and transient notifications.
//!
//! # Responsibility
//! - Copy canonical deep links to the clipboard.
//! - Report the outcome as a notification that dismisses itself.
//!
//! # Invariants
//! - Clipboard failures are reported, never propagated as errors.
//! - At most one notification is visible; a newer one replaces it.

pub mod clipboard;
pub mod link;
pub mod toast;
