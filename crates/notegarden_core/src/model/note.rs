//! Note record domain model.
//!
//! # Responsibility
//! - Define the immutable note record fetched from the remote store.
//! - Define the closed topic enumeration used by catalog filters.
//!
//! # Invariants
//! - `slug` is unique across records and stable for deep-linking.
//! - Records are never mutated after they leave the store.
//! - `Topic::All` is the unfiltered sentinel, never a record category.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Opaque identifier assigned by the store.
pub type NoteId = Uuid;

/// Fixed topic enumeration for catalog filtering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Topic {
    /// Sentinel that disables topic filtering.
    #[default]
    All,
    Ai,
    Systems,
    Collaboration,
}

impl Topic {
    /// Every topic in display order, sentinel first.
    pub const VALUES: [Topic; 4] = [Topic::All, Topic::Ai, Topic::Systems, Topic::Collaboration];

    /// Display label, also the exact category string stored on records.
    pub fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Ai => "AI",
            Self::Systems => "Systems",
            Self::Collaboration => "Collaboration",
        }
    }

    /// Parses a topic label case-insensitively.
    pub fn from_label(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        Self::VALUES
            .into_iter()
            .find(|topic| topic.label().eq_ignore_ascii_case(trimmed))
    }

    /// Parses a topic label, treating anything unknown as [`Topic::All`].
    pub fn parse_or_all(value: &str) -> Self {
        Self::from_label(value).unwrap_or_default()
    }

    /// Returns whether a record category passes this topic filter.
    pub fn admits(self, category: Option<&str>) -> bool {
        match self {
            Self::All => true,
            topic => category.is_some_and(|value| value.trim() == topic.label()),
        }
    }
}

impl Display for Topic {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Validation failures for records written into the bundled store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteValidationError {
    EmptySlug,
    /// Slug contains characters outside `[a-z0-9-]`.
    InvalidSlug(String),
    EmptyTitle,
}

impl Display for NoteValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptySlug => write!(f, "note slug cannot be empty"),
            Self::InvalidSlug(slug) => {
                write!(f, "note slug `{slug}` must only contain a-z, 0-9 and `-`")
            }
            Self::EmptyTitle => write!(f, "note title cannot be blank"),
        }
    }
}

impl Error for NoteValidationError {}

/// One catalog entry as delivered by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteRecord {
    #[serde(default = "Uuid::new_v4")]
    pub id: NoteId,
    /// URL-safe deep-link identity.
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub summary: Option<String>,
    /// Older one-line teaser; shown when `summary` is absent.
    #[serde(default)]
    pub short_description: Option<String>,
    /// Free-text category; matched against [`Topic::label`].
    #[serde(default)]
    pub category: Option<String>,
    /// Rich text body, opaque to the catalog.
    #[serde(default)]
    pub content: String,
    #[serde(default, with = "published_date_format")]
    pub published_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_pinned: bool,
    /// Surfaced by the featured-notes fetch.
    #[serde(default)]
    pub featured: bool,
}

impl NoteRecord {
    /// Creates a record with a generated id and all optional fields unset.
    pub fn new(slug: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            slug: slug.into(),
            title: title.into(),
            summary: None,
            short_description: None,
            category: None,
            content: String::new(),
            published_date: None,
            is_pinned: false,
            featured: false,
        }
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    pub fn with_short_description(mut self, text: impl Into<String>) -> Self {
        self.short_description = Some(text.into());
        self
    }

    /// Card teaser: the summary, else the short description.
    pub fn blurb(&self) -> Option<&str> {
        self.summary
            .as_deref()
            .or(self.short_description.as_deref())
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn with_published_date(mut self, published: DateTime<Utc>) -> Self {
        self.published_date = Some(published);
        self
    }

    pub fn pinned(mut self, is_pinned: bool) -> Self {
        self.is_pinned = is_pinned;
        self
    }

    pub fn featured(mut self, featured: bool) -> Self {
        self.featured = featured;
        self
    }

    /// Case-insensitive substring match on title and summary.
    ///
    /// `needle` must already be lowercased.
    pub fn matches_search(&self, needle: &str) -> bool {
        if needle.is_empty() {
            return true;
        }
        self.title.to_lowercase().contains(needle)
            || self
                .summary
                .as_deref()
                .is_some_and(|summary| summary.to_lowercase().contains(needle))
    }

    /// Checks the write-side invariants enforced by the bundled store.
    pub fn validate(&self) -> Result<(), NoteValidationError> {
        if self.slug.is_empty() {
            return Err(NoteValidationError::EmptySlug);
        }
        if !is_url_safe_slug(&self.slug) {
            return Err(NoteValidationError::InvalidSlug(self.slug.clone()));
        }
        if self.title.trim().is_empty() {
            return Err(NoteValidationError::EmptyTitle);
        }
        Ok(())
    }
}

/// Returns whether `slug` only uses `[a-z0-9-]`.
pub fn is_url_safe_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

/// Parses store timestamps: RFC 3339, naive `YYYY-MM-DDTHH:MM:SS[.f]` (UTC),
/// or a bare `YYYY-MM-DD` date (midnight UTC).
pub fn parse_published_date(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

mod published_date_format {
    use super::parse_published_date;
    use chrono::{DateTime, Utc};
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(date) => serializer.serialize_str(&date.to_rfc3339()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        match raw {
            None => Ok(None),
            Some(text) if text.trim().is_empty() => Ok(None),
            Some(text) => parse_published_date(&text)
                .map(Some)
                .ok_or_else(|| D::Error::custom(format!("invalid published_date `{text}`"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{is_url_safe_slug, parse_published_date, NoteRecord, NoteValidationError, Topic};
    use chrono::{Datelike, Timelike};

    #[test]
    fn topic_labels_parse_case_insensitively() {
        assert_eq!(Topic::from_label("ai"), Some(Topic::Ai));
        assert_eq!(Topic::from_label(" Systems "), Some(Topic::Systems));
        assert_eq!(Topic::from_label("gardening"), None);
        assert_eq!(Topic::parse_or_all("gardening"), Topic::All);
    }

    #[test]
    fn topic_admits_exact_category_only() {
        assert!(Topic::Ai.admits(Some("AI")));
        assert!(Topic::Ai.admits(Some(" AI ")));
        assert!(!Topic::Ai.admits(Some("Systems")));
        assert!(!Topic::Ai.admits(None));
        assert!(Topic::All.admits(None));
    }

    #[test]
    fn published_date_accepts_date_only_and_rfc3339() {
        let date_only = parse_published_date("2024-01-01").expect("date should parse");
        assert_eq!((date_only.year(), date_only.hour()), (2024, 0));

        let full = parse_published_date("2023-05-06T10:20:30+02:00").expect("rfc3339");
        assert_eq!(full.hour(), 8);

        let naive = parse_published_date("2023-05-06T10:20:30.123").expect("naive");
        assert_eq!(naive.minute(), 20);

        assert!(parse_published_date("yesterday").is_none());
    }

    #[test]
    fn validate_rejects_unsafe_slug_and_blank_title() {
        assert_eq!(
            NoteRecord::new("", "t").validate(),
            Err(NoteValidationError::EmptySlug)
        );
        assert!(matches!(
            NoteRecord::new("Has Space", "t").validate(),
            Err(NoteValidationError::InvalidSlug(_))
        ));
        assert_eq!(
            NoteRecord::new("ok-slug", "  ").validate(),
            Err(NoteValidationError::EmptyTitle)
        );
        assert!(is_url_safe_slug("systems-thinking-101"));
    }

    #[test]
    fn record_deserializes_store_shape_with_defaults() {
        let json = r#"{
            "slug": "beta",
            "title": "Beta",
            "category": "AI",
            "published_date": "2023-01-01",
            "is_pinned": true
        }"#;
        let record: NoteRecord = serde_json::from_str(json).expect("record should parse");
        assert_eq!(record.slug, "beta");
        assert!(record.is_pinned);
        assert!(!record.featured);
        assert!(record.summary.is_none());
        assert_eq!(record.published_date.map(|d| d.year()), Some(2023));
    }
}
