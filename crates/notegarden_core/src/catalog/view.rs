//! Derived catalog view.
//!
//! # Responsibility
//! - Filter the loaded records by topic and search text.
//! - Order the result pinned-first, newest-first.
//! - Project per-topic counts from the unfiltered records.
//!
//! # Invariants
//! - `compute_view` is a pure function of `(records, topic, search)`.
//! - No unpinned record precedes a pinned one.
//! - Counts ignore the current search text.

use crate::model::note::{NoteRecord, Topic};
use std::cmp::Ordering;

const TOPIC_SLOTS: usize = Topic::VALUES.len();

/// Transient filter state owned by the catalog page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogQuery {
    pub selected_topic: Topic,
    pub search_text: String,
}

impl CatalogQuery {
    pub fn new(selected_topic: Topic, search_text: impl Into<String>) -> Self {
        Self {
            selected_topic,
            search_text: search_text.into(),
        }
    }

    /// Returns whether neither topic nor search narrows the catalog.
    pub fn is_unfiltered(&self) -> bool {
        self.selected_topic == Topic::All && search_needle(&self.search_text).is_empty()
    }
}

/// Lowercased needle for `search_text`; empty when the text is only whitespace.
///
/// Any other text is matched as typed, surrounding spaces included.
pub fn search_needle(search_text: &str) -> String {
    if search_text.trim().is_empty() {
        String::new()
    } else {
        search_text.to_lowercase()
    }
}

/// Computes the ordered subset of `records` shown for the given filters.
///
/// Search is a case-insensitive substring of title or summary; whitespace-only
/// text does not filter.
/// Sorting is stable: records that tie keep their store order.
pub fn compute_view<'a>(
    records: &'a [NoteRecord],
    selected_topic: Topic,
    search_text: &str,
) -> Vec<&'a NoteRecord> {
    let needle = search_needle(search_text);
    let mut visible = records
        .iter()
        .filter(|record| selected_topic.admits(record.category.as_deref()))
        .filter(|record| record.matches_search(&needle))
        .collect::<Vec<_>>();
    visible.sort_by(|a, b| catalog_order(a, b));
    visible
}

/// Pinned first, then descending publish date with undated records last.
fn catalog_order(a: &NoteRecord, b: &NoteRecord) -> Ordering {
    b.is_pinned
        .cmp(&a.is_pinned)
        .then_with(|| b.published_date.cmp(&a.published_date))
}

/// Record counts per topic over the unfiltered list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TopicCounts {
    counts: [usize; TOPIC_SLOTS],
}

impl TopicCounts {
    /// Count for one topic; [`Topic::All`] counts every record.
    pub fn get(&self, topic: Topic) -> usize {
        self.counts[topic_index(topic)]
    }

    /// `(topic, count)` pairs in display order.
    pub fn iter(&self) -> impl Iterator<Item = (Topic, usize)> + '_ {
        Topic::VALUES.into_iter().map(|topic| (topic, self.get(topic)))
    }
}

/// Counts records per enumerated topic, independent of any search text.
pub fn topic_counts(records: &[NoteRecord]) -> TopicCounts {
    let mut counts = TopicCounts::default();
    for topic in Topic::VALUES {
        counts.counts[topic_index(topic)] = records
            .iter()
            .filter(|record| topic.admits(record.category.as_deref()))
            .count();
    }
    counts
}

fn topic_index(topic: Topic) -> usize {
    match topic {
        Topic::All => 0,
        Topic::Ai => 1,
        Topic::Systems => 2,
        Topic::Collaboration => 3,
    }
}

/// Everything a renderer needs for one catalog frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogView<'a> {
    pub items: Vec<&'a NoteRecord>,
    pub counts: TopicCounts,
    /// Size of the full loaded collection.
    pub total: usize,
    /// Slug of the item badged "Latest"; only set for an unfiltered view.
    pub latest_slug: Option<&'a str>,
}

impl<'a> CatalogView<'a> {
    pub fn build(records: &'a [NoteRecord], query: &CatalogQuery) -> Self {
        let items = compute_view(records, query.selected_topic, &query.search_text);
        let latest_slug = if query.is_unfiltered() {
            items.first().map(|record| record.slug.as_str())
        } else {
            None
        };
        Self {
            items,
            counts: topic_counts(records),
            total: records.len(),
            latest_slug,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn position_of(&self, slug: &str) -> Option<usize> {
        self.items.iter().position(|record| record.slug == slug)
    }
}
