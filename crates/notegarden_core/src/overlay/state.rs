//! Overlay states and transitions.

use crate::model::note::NoteRecord;

/// Current overlay occupancy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum OverlayState {
    #[default]
    Closed,
    Open(NoteRecord),
}

/// Outcome of one overlay transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlayTransition {
    /// `slug` is now open; `replaced` names the record it displaced.
    Opened {
        slug: String,
        replaced: Option<String>,
    },
    /// The overlay showing `slug` closed.
    Closed { slug: String },
    /// Nothing changed.
    Unchanged,
}

impl OverlayTransition {
    pub fn is_change(&self) -> bool {
        !matches!(self, Self::Unchanged)
    }
}

/// Single-occupancy overlay holding the previewed record.
#[derive(Debug, Clone, Default)]
pub struct Overlay {
    state: OverlayState,
}

impl Overlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &OverlayState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, OverlayState::Open(_))
    }

    /// Record currently previewed.
    pub fn active(&self) -> Option<&NoteRecord> {
        match &self.state {
            OverlayState::Open(record) => Some(record),
            OverlayState::Closed => None,
        }
    }

    pub fn active_slug(&self) -> Option<&str> {
        self.active().map(|record| record.slug.as_str())
    }

    /// Opens `record`, replacing any open record.
    ///
    /// Re-opening the record already shown is [`OverlayTransition::Unchanged`].
    pub fn open(&mut self, record: NoteRecord) -> OverlayTransition {
        if self.active_slug() == Some(record.slug.as_str()) {
            return OverlayTransition::Unchanged;
        }
        let slug = record.slug.clone();
        let previous = std::mem::replace(&mut self.state, OverlayState::Open(record));
        let replaced = match previous {
            OverlayState::Open(previous) => Some(previous.slug),
            OverlayState::Closed => None,
        };
        OverlayTransition::Opened { slug, replaced }
    }

    /// Closes the overlay; no-op when already closed.
    pub fn close(&mut self) -> OverlayTransition {
        match std::mem::take(&mut self.state) {
            OverlayState::Open(record) => OverlayTransition::Closed { slug: record.slug },
            OverlayState::Closed => OverlayTransition::Unchanged,
        }
    }
}
