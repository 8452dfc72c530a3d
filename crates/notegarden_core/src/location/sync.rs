//! Overlay-to-location synchronizer.

use super::provider::LocationProvider;
use super::route::{deep_link, NotesRoute};
use crate::overlay::state::OverlayTransition;
use log::debug;
use serde::Deserialize;

/// How overlay transitions are written into history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryPolicy {
    /// Opening from closed pushes one entry. Replacing one open note with
    /// another, and closing, rewrite the current entry.
    #[default]
    PushOnOpen,
    /// Every transition rewrites the current entry; history never grows.
    ReplaceAlways,
}

/// Keeps the location bound to the overlay state.
#[derive(Debug)]
pub struct LocationSynchronizer<L: LocationProvider> {
    location: L,
    base_path: String,
    policy: HistoryPolicy,
}

impl<L: LocationProvider> LocationSynchronizer<L> {
    pub fn new(location: L, base_path: impl Into<String>, policy: HistoryPolicy) -> Self {
        Self {
            location,
            base_path: base_path.into(),
            policy,
        }
    }

    pub fn location(&self) -> &L {
        &self.location
    }

    pub fn location_mut(&mut self) -> &mut L {
        &mut self.location
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    pub fn policy(&self) -> HistoryPolicy {
        self.policy
    }

    /// Parses the current location; `None` outside the notes page.
    pub fn current_route(&self) -> Option<NotesRoute> {
        NotesRoute::parse(&self.location.path(), &self.base_path)
    }

    /// Slug addressed by the current location, if any.
    pub fn current_slug_from_location(&self) -> Option<String> {
        match self.current_route()? {
            NotesRoute::Note(slug) => Some(slug),
            NotesRoute::Listing => None,
        }
    }

    /// Absolute deep link for `slug` under the current origin.
    pub fn share_url(&self, slug: &str) -> String {
        deep_link(&self.location.origin(), &self.base_path, slug)
    }

    /// Mirrors one overlay transition into the location.
    pub fn apply(&mut self, transition: &OverlayTransition) {
        match transition {
            OverlayTransition::Opened { slug, replaced } => {
                let target = NotesRoute::Note(slug.clone());
                let push = replaced.is_none() && self.policy == HistoryPolicy::PushOnOpen;
                self.write(&target, push);
            }
            OverlayTransition::Closed { .. } => self.write(&NotesRoute::Listing, false),
            OverlayTransition::Unchanged => {}
        }
    }

    /// Rewrites the current entry to the listing path.
    pub fn restore_listing(&mut self) {
        self.write(&NotesRoute::Listing, false);
    }

    fn write(&mut self, target: &NotesRoute, push: bool) {
        if self.current_route().as_ref() == Some(target) {
            return;
        }
        let path = target.to_path(&self.base_path);
        if push {
            self.location.push(&path);
        } else {
            self.location.replace(&path);
        }
        debug!(
            "event=location_sync module=location status=ok mode={} path={path}",
            if push { "push" } else { "replace" }
        );
    }
}
