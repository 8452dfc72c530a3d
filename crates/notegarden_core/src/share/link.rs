//! Share-link action.

use super::clipboard::{Clipboard, ClipboardError};
use super::toast::{ToastKind, Toaster};
use log::{info, warn};

pub const LINK_COPIED_MESSAGE: &str = "Link copied";
pub const COPY_FAILED_MESSAGE: &str = "Copy failed";

/// Result of one share attempt, already reported as a notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareOutcome {
    Copied { url: String },
    Failed { url: String, error: ClipboardError },
}

impl ShareOutcome {
    pub fn is_copied(&self) -> bool {
        matches!(self, Self::Copied { .. })
    }
}

/// Copies `url` and shows "Link copied" or "Copy failed".
pub fn share_link(
    url: String,
    clipboard: &mut impl Clipboard,
    toaster: &mut Toaster,
    now_ms: i64,
) -> ShareOutcome {
    match clipboard.write_text(&url) {
        Ok(()) => {
            toaster.show(ToastKind::Success, LINK_COPIED_MESSAGE, now_ms);
            info!("event=share_link module=share status=ok");
            ShareOutcome::Copied { url }
        }
        Err(error) => {
            toaster.show(ToastKind::Failure, COPY_FAILED_MESSAGE, now_ms);
            warn!("event=share_link module=share status=error error={error}");
            ShareOutcome::Failed { url, error }
        }
    }
}
