//! Notes catalog page state container.
//!
//! # Responsibility
//! - Own the loaded records, catalog filters, overlay and location binding.
//! - Route UI events to exactly one state transition each.
//! - Resolve deep links once the record list has loaded.
//!
//! # Invariants
//! - Every close source goes through `close_overlay`.
//! - The Escape listener exists exactly while the overlay is open.
//! - Sharing never opens or closes the overlay.
//! - A failed load leaves an empty, not-loading catalog.

use crate::catalog::card::{cards_for, NoteCard};
use crate::catalog::view::{CatalogQuery, CatalogView};
use crate::config::GardenConfig;
use crate::location::provider::LocationProvider;
use crate::location::route::NotesRoute;
use crate::location::sync::LocationSynchronizer;
use crate::model::note::{NoteRecord, Topic};
use crate::overlay::state::{Overlay, OverlayState, OverlayTransition};
use crate::share::clipboard::Clipboard;
use crate::share::link::{share_link, ShareOutcome};
use crate::share::toast::{Clock, Toast, Toaster};
use crate::store::note_store::{NoteStore, StoreResult};
use log::{debug, info, warn};

/// Record-list lifecycle for one page visit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Loaded,
}

/// Keys the page reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Enter,
    Char(char),
}

/// Why the overlay closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    CloseControl,
    ClickOutside,
    EscapeKey,
    /// Back/forward navigation or deep-link correction.
    Navigation,
}

impl CloseReason {
    fn as_str(self) -> &'static str {
        match self {
            Self::CloseControl => "close_control",
            Self::ClickOutside => "click_outside",
            Self::EscapeKey => "escape_key",
            Self::Navigation => "navigation",
        }
    }
}

/// UI events delivered by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEvent {
    TopicSelected(Topic),
    SearchChanged(String),
    CardClicked { slug: String },
    ShareClicked { slug: String },
    CloseClicked,
    /// Click landing on the overlay surface itself.
    OverlaySurfaceClicked,
    /// Click landing outside the overlay surface.
    BackdropClicked,
    KeyPressed(Key),
    /// Back/forward navigation moved the location to this path.
    LocationChanged(String),
    Tick,
}

/// Whether an event keeps bubbling to outer handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Propagation {
    Continue,
    Stop,
}

/// Explicit state container for the notes catalog page.
pub struct NotesPage<L: LocationProvider, C: Clipboard, K: Clock> {
    records: Vec<NoteRecord>,
    load_state: LoadState,
    query: CatalogQuery,
    overlay: Overlay,
    sync: LocationSynchronizer<L>,
    clipboard: C,
    clock: K,
    toaster: Toaster,
    pending_deep_link: Option<String>,
    escape_listener: Option<u64>,
    listener_registrations: u64,
}

impl<L: LocationProvider, C: Clipboard, K: Clock> NotesPage<L, C, K> {
    pub fn new(config: &GardenConfig, location: L, clipboard: C, clock: K) -> Self {
        Self {
            records: Vec::new(),
            load_state: LoadState::Idle,
            query: CatalogQuery::default(),
            overlay: Overlay::new(),
            sync: LocationSynchronizer::new(
                location,
                config.base_path.clone(),
                config.history_policy,
            ),
            clipboard,
            clock,
            toaster: Toaster::new(config.toast_duration_ms),
            pending_deep_link: None,
            escape_listener: None,
            listener_registrations: 0,
        }
    }

    /// Starts the visit: captures any deep link and enters `Loading`.
    ///
    /// Returns `false` when the page was already mounted; the fetch is issued
    /// once per visit.
    pub fn mount(&mut self) -> bool {
        if self.load_state != LoadState::Idle {
            debug!("event=page_mount module=page status=skipped reason=already_mounted");
            return false;
        }
        self.pending_deep_link = self.sync.current_slug_from_location();
        self.load_state = LoadState::Loading;
        info!(
            "event=page_mount module=page status=ok deep_link={}",
            self.pending_deep_link.as_deref().unwrap_or("none")
        );
        true
    }

    /// Completes the record fetch started by [`NotesPage::mount`].
    ///
    /// A failed fetch leaves the catalog empty. Any pending deep link is
    /// resolved here and nowhere earlier.
    pub fn finish_load(&mut self, result: StoreResult<Vec<NoteRecord>>) {
        if self.load_state != LoadState::Loading {
            debug!("event=catalog_load module=page status=skipped reason=not_loading");
            return;
        }
        match result {
            Ok(records) => {
                info!(
                    "event=catalog_load module=page status=ok count={}",
                    records.len()
                );
                self.records = records;
            }
            Err(err) => {
                warn!("event=catalog_load module=page status=error error={err}");
                self.records = Vec::new();
            }
        }
        self.load_state = LoadState::Loaded;

        if let Some(slug) = self.pending_deep_link.take() {
            self.resolve_deep_link(&slug);
        }
    }

    /// Mounts and loads synchronously from `store`.
    pub fn load_from(&mut self, store: &impl NoteStore) {
        if self.mount() {
            self.finish_load(store.fetch_all_notes());
        }
    }

    pub fn load_state(&self) -> LoadState {
        self.load_state
    }

    pub fn is_loading(&self) -> bool {
        self.load_state == LoadState::Loading
    }

    pub fn records(&self) -> &[NoteRecord] {
        &self.records
    }

    pub fn query(&self) -> &CatalogQuery {
        &self.query
    }

    pub fn set_topic(&mut self, topic: Topic) {
        self.query.selected_topic = topic;
    }

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.query.search_text = text.into();
    }

    /// Current derived view, recomputed from records and filters.
    pub fn view(&self) -> CatalogView<'_> {
        CatalogView::build(&self.records, &self.query)
    }

    pub fn cards(&self) -> Vec<NoteCard> {
        cards_for(&self.view())
    }

    pub fn overlay(&self) -> &OverlayState {
        self.overlay.state()
    }

    pub fn active_note(&self) -> Option<&NoteRecord> {
        self.overlay.active()
    }

    pub fn location(&self) -> &L {
        self.sync.location()
    }

    pub fn location_mut(&mut self) -> &mut L {
        self.sync.location_mut()
    }

    pub fn clipboard(&self) -> &C {
        &self.clipboard
    }

    pub fn active_toast(&self) -> Option<&Toast> {
        self.toaster.active()
    }

    pub fn toasts_shown(&self) -> u64 {
        self.toaster.shown_count()
    }

    /// Whether the global Escape listener is registered.
    pub fn escape_listener_active(&self) -> bool {
        self.escape_listener.is_some()
    }

    /// Total Escape listener registrations over the visit.
    pub fn escape_listener_registrations(&self) -> u64 {
        self.listener_registrations
    }

    /// Opens the preview for `slug`; `false` when no loaded record matches.
    pub fn open_note(&mut self, slug: &str) -> bool {
        let Some(record) = self.find(slug).cloned() else {
            debug!("event=overlay_open module=page status=skipped reason=unknown_slug slug={slug}");
            return false;
        };
        let transition = self.overlay.open(record);
        if let OverlayTransition::Opened { slug, replaced } = &transition {
            info!(
                "event=overlay_open module=page status=ok slug={slug} replaced={}",
                replaced.as_deref().unwrap_or("none")
            );
        }
        self.sync.apply(&transition);
        self.register_escape_listener();
        true
    }

    /// Closes the preview; `false` when it was already closed.
    pub fn close_overlay(&mut self, reason: CloseReason) -> bool {
        let transition = self.overlay.close();
        self.sync.apply(&transition);
        self.unregister_escape_listener();
        match &transition {
            OverlayTransition::Closed { slug } => {
                info!(
                    "event=overlay_close module=page status=ok slug={slug} reason={}",
                    reason.as_str()
                );
                true
            }
            _ => false,
        }
    }

    /// Copies the deep link for `slug`; the overlay is left untouched.
    pub fn share(&mut self, slug: &str) -> Option<ShareOutcome> {
        let slug = self.find(slug)?.slug.clone();
        let url = self.sync.share_url(&slug);
        Some(share_link(
            url,
            &mut self.clipboard,
            &mut self.toaster,
            self.clock.now_ms(),
        ))
    }

    /// Expires the visible notification when its time is up.
    pub fn tick(&mut self) -> Option<Toast> {
        self.toaster.tick(self.clock.now_ms())
    }

    /// Reconciles the overlay after back/forward navigation to `path`.
    ///
    /// Writes no history unless the path names an unknown slug, which is
    /// corrected to the listing path.
    pub fn handle_location_change(&mut self, path: &str) {
        let Some(route) = NotesRoute::parse(path, self.sync.base_path()) else {
            return;
        };
        if self.load_state != LoadState::Loaded {
            self.pending_deep_link = route.slug().map(str::to_string);
            return;
        }
        match route {
            NotesRoute::Listing => {
                self.close_overlay(CloseReason::Navigation);
            }
            NotesRoute::Note(slug) => self.resolve_deep_link(&slug),
        }
    }

    /// Handles one event at one target.
    pub fn dispatch(&mut self, event: PageEvent) -> Propagation {
        match event {
            PageEvent::TopicSelected(topic) => self.set_topic(topic),
            PageEvent::SearchChanged(text) => self.set_search(text),
            PageEvent::CardClicked { slug } => {
                self.open_note(&slug);
            }
            PageEvent::ShareClicked { slug } => {
                self.share(&slug);
                return Propagation::Stop;
            }
            PageEvent::CloseClicked => {
                self.close_overlay(CloseReason::CloseControl);
                return Propagation::Stop;
            }
            PageEvent::OverlaySurfaceClicked => return Propagation::Stop,
            PageEvent::BackdropClicked => {
                self.close_overlay(CloseReason::ClickOutside);
            }
            PageEvent::KeyPressed(Key::Escape) if self.escape_listener_active() => {
                self.close_overlay(CloseReason::EscapeKey);
            }
            PageEvent::KeyPressed(_) => {}
            PageEvent::LocationChanged(path) => self.handle_location_change(&path),
            PageEvent::Tick => {
                self.tick();
            }
        }
        Propagation::Continue
    }

    /// Delivers events along a bubbling path, innermost target first,
    /// stopping at the first handler that stops propagation.
    pub fn dispatch_bubbling(&mut self, path: impl IntoIterator<Item = PageEvent>) -> Propagation {
        for event in path {
            if self.dispatch(event) == Propagation::Stop {
                return Propagation::Stop;
            }
        }
        Propagation::Continue
    }

    fn find(&self, slug: &str) -> Option<&NoteRecord> {
        self.records.iter().find(|record| record.slug == slug)
    }

    fn resolve_deep_link(&mut self, slug: &str) {
        if self.open_note(slug) {
            return;
        }
        info!("event=deep_link module=page status=miss slug={slug}");
        if !self.close_overlay(CloseReason::Navigation) {
            self.sync.restore_listing();
        }
    }

    fn register_escape_listener(&mut self) {
        if self.escape_listener.is_none() && self.overlay.is_open() {
            self.listener_registrations += 1;
            self.escape_listener = Some(self.listener_registrations);
        }
    }

    fn unregister_escape_listener(&mut self) {
        if !self.overlay.is_open() {
            self.escape_listener = None;
        }
    }
}
