//! Core logic for the notes garden catalog.
//! This crate owns catalog derivation, overlay state and deep-link sync.

pub mod catalog;
pub mod config;
pub mod db;
pub mod location;
pub mod logging;
pub mod model;
pub mod overlay;
pub mod page;
pub mod share;
pub mod store;

pub use catalog::card::{cards_for, date_label, reading_time_minutes, NoteCard};
pub use catalog::view::{
    compute_view, search_needle, topic_counts, CatalogQuery, CatalogView, TopicCounts,
};
pub use config::{ConfigError, ConfigResult, GardenConfig};
pub use location::provider::{LocationProvider, MemoryLocation};
pub use location::route::{deep_link, NotesRoute};
pub use location::sync::{HistoryPolicy, LocationSynchronizer};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::note::{parse_published_date, NoteId, NoteRecord, NoteValidationError, Topic};
pub use overlay::state::{Overlay, OverlayState, OverlayTransition};
pub use page::notes_page::{CloseReason, Key, LoadState, NotesPage, PageEvent, Propagation};
pub use share::clipboard::{Clipboard, ClipboardError, MemoryClipboard};
pub use share::link::{share_link, ShareOutcome, COPY_FAILED_MESSAGE, LINK_COPIED_MESSAGE};
pub use share::toast::{Clock, ManualClock, SystemClock, Toast, ToastKind, Toaster};
pub use store::memory::MemoryNoteStore;
pub use store::note_store::{NoteStore, StoreError, StoreResult, FEATURED_PREVIEW_LIMIT};
pub use store::sqlite::SqliteNoteStore;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
