//! Card projections for catalog renderers.
//!
//! # Responsibility
//! - Turn a record into display-ready card fields.
//! - Derive reading time from the rich-text body.

use crate::catalog::view::CatalogView;
use crate::model::note::NoteRecord;
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

const WORDS_PER_MINUTE: usize = 200;
/// Date label used for notes that were never given a publish date.
pub const UNDATED_LABEL: &str = "Thinking Lab";

static HTML_TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid tag regex"));

/// Display projection of one catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteCard {
    pub slug: String,
    pub title: String,
    pub blurb: Option<String>,
    pub date_label: String,
    pub reading_minutes: usize,
    pub is_pinned: bool,
    /// Badged "Latest" in the unfiltered catalog.
    pub is_latest: bool,
}

impl NoteCard {
    pub fn from_record(record: &NoteRecord, is_latest: bool) -> Self {
        Self {
            slug: record.slug.clone(),
            title: record.title.clone(),
            blurb: record.blurb().map(str::to_string),
            date_label: date_label(record.published_date),
            reading_minutes: reading_time_minutes(&record.content),
            is_pinned: record.is_pinned,
            is_latest,
        }
    }
}

/// Projects every visible item of `view` into a card, in view order.
pub fn cards_for(view: &CatalogView<'_>) -> Vec<NoteCard> {
    view.items
        .iter()
        .map(|record| {
            let is_latest = view.latest_slug == Some(record.slug.as_str());
            NoteCard::from_record(record, is_latest)
        })
        .collect()
}

/// Long-form date such as `January 1, 2024`, or [`UNDATED_LABEL`].
pub fn date_label(published: Option<DateTime<Utc>>) -> String {
    match published {
        Some(date) => date.format("%B %-d, %Y").to_string(),
        None => UNDATED_LABEL.to_string(),
    }
}

/// Estimated reading time at 200 words per minute, rounded up.
///
/// Markup tags are removed outright before counting, so `a</p><p>b` is
/// one word. Empty content reads in zero
/// minutes; any other body reads in at least one.
pub fn reading_time_minutes(content: &str) -> usize {
    if content.is_empty() {
        return 0;
    }
    let text = HTML_TAG_RE.replace_all(content, "");
    let words = text.split_whitespace().count().max(1);
    words.div_ceil(WORDS_PER_MINUTE)
}
