//! Overlay transitions mirrored into the location.
//!
//! History policy under test: `PushOnOpen` pushes one entry per open from the
//! closed state and rewrites the current entry on replacement and on close.
//! `ReplaceAlways` never grows history.

use notegarden_core::{
    CloseReason, GardenConfig, HistoryPolicy, LocationProvider, ManualClock, MemoryClipboard,
    MemoryLocation, MemoryNoteStore, NoteRecord, NotesPage, OverlayState,
};

type TestPage = NotesPage<MemoryLocation, MemoryClipboard, ManualClock>;

fn records() -> Vec<NoteRecord> {
    vec![
        NoteRecord::new("x", "Alpha").with_category("AI"),
        NoteRecord::new("y", "Beta").with_category("AI").pinned(true),
        NoteRecord::new("z", "Gamma").with_category("Systems"),
    ]
}

fn loaded_page(policy: HistoryPolicy) -> TestPage {
    let config = GardenConfig {
        history_policy: policy,
        ..GardenConfig::default()
    };
    let mut page = NotesPage::new(
        &config,
        MemoryLocation::new("https://garden.dev", "/notes"),
        MemoryClipboard::new(),
        ManualClock::new(0),
    );
    page.load_from(&MemoryNoteStore::new(records()));
    page
}

#[test]
fn open_then_close_ends_at_listing_and_closed() {
    let mut page = loaded_page(HistoryPolicy::PushOnOpen);

    assert!(page.open_note("x"));
    assert_eq!(page.location().path(), "/notes/x");
    assert!(page.close_overlay(CloseReason::CloseControl));

    assert_eq!(page.location().path(), "/notes");
    assert_eq!(page.overlay(), &OverlayState::Closed);
}

#[test]
fn push_on_open_adds_one_entry_per_open_from_closed() {
    let mut page = loaded_page(HistoryPolicy::PushOnOpen);

    page.open_note("x");
    page.open_note("y");
    assert_eq!(page.location().path(), "/notes/y");
    assert_eq!(page.location().push_count(), 1);

    page.close_overlay(CloseReason::CloseControl);
    assert_eq!(page.location().entries(), ["/notes", "/notes"]);
}

#[test]
fn replace_always_keeps_history_flat() {
    let mut page = loaded_page(HistoryPolicy::ReplaceAlways);

    page.open_note("x");
    page.close_overlay(CloseReason::EscapeKey);
    page.open_note("z");

    assert_eq!(page.location().push_count(), 0);
    assert_eq!(page.location().history_len(), 1);
    assert_eq!(page.location().path(), "/notes/z");
}

#[test]
fn single_occupancy_and_location_hold_after_every_step() {
    let mut page = loaded_page(HistoryPolicy::PushOnOpen);
    let script: &[Option<&str>] = &[
        Some("x"),
        Some("y"),
        None,
        None,
        Some("z"),
        Some("z"),
        Some("x"),
        None,
        Some("y"),
    ];

    for step in script {
        match step {
            Some(slug) => {
                page.open_note(slug);
            }
            None => {
                page.close_overlay(CloseReason::ClickOutside);
            }
        }

        match page.overlay() {
            OverlayState::Open(record) => {
                assert_eq!(Some(record.slug.as_str()), *step);
                assert_eq!(page.location().path(), format!("/notes/{}", record.slug));
                assert!(page.escape_listener_active());
            }
            OverlayState::Closed => {
                assert_eq!(page.location().path(), "/notes");
                assert!(!page.escape_listener_active());
            }
        }
    }
}

#[test]
fn opening_unknown_slug_changes_nothing() {
    let mut page = loaded_page(HistoryPolicy::PushOnOpen);
    assert!(!page.open_note("missing"));
    assert_eq!(page.overlay(), &OverlayState::Closed);
    assert_eq!(page.location().push_count(), 0);
    assert!(!page.close_overlay(CloseReason::CloseControl));
    assert_eq!(page.location().replace_count(), 0);
}

#[test]
fn back_navigation_closes_and_forward_reopens_without_new_history() {
    let mut page = loaded_page(HistoryPolicy::PushOnOpen);
    page.open_note("x");

    let previous = page.location_mut().back().expect("listing entry");
    page.handle_location_change(&previous);
    assert_eq!(page.overlay(), &OverlayState::Closed);

    let next = page.location_mut().forward().expect("preview entry");
    page.handle_location_change(&next);
    assert_eq!(page.active_note().map(|record| record.slug.as_str()), Some("x"));

    assert_eq!(page.location().push_count(), 1);
    assert_eq!(page.location().replace_count(), 0);
    assert_eq!(page.location().history_len(), 2);
}

#[test]
fn navigation_to_unknown_slug_is_corrected_to_listing() {
    let mut page = loaded_page(HistoryPolicy::PushOnOpen);
    page.open_note("x");
    page.location_mut().push("/notes/ghost");
    page.handle_location_change("/notes/ghost");

    assert_eq!(page.overlay(), &OverlayState::Closed);
    assert_eq!(page.location().path(), "/notes");
}

#[test]
fn navigation_outside_notes_is_ignored() {
    let mut page = loaded_page(HistoryPolicy::PushOnOpen);
    page.open_note("x");
    page.handle_location_change("/about");
    assert_eq!(page.active_note().map(|record| record.slug.as_str()), Some("x"));
}
