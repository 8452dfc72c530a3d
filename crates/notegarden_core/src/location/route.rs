//! Notes route parsing and formatting.

/// Default listing path.
pub const DEFAULT_BASE_PATH: &str = "/notes";

/// Location of the notes page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotesRoute {
    Listing,
    Note(String),
}

impl NotesRoute {
    /// Parses `path` relative to `base_path`.
    ///
    /// Query strings and fragments are ignored, and one trailing slash is
    /// tolerated. Returns `None` for paths outside the notes page or nested
    /// deeper than one slug segment.
    pub fn parse(path: &str, base_path: &str) -> Option<Self> {
        let path = path
            .split(['?', '#'])
            .next()
            .unwrap_or_default();
        let path = path.strip_suffix('/').unwrap_or(path);
        let rest = path.strip_prefix(base_path)?;

        if rest.is_empty() {
            return Some(Self::Listing);
        }
        let slug = rest.strip_prefix('/')?;
        if slug.is_empty() || slug.contains('/') {
            return None;
        }
        Some(Self::Note(slug.to_string()))
    }

    /// Formats this route under `base_path`.
    pub fn to_path(&self, base_path: &str) -> String {
        match self {
            Self::Listing => base_path.to_string(),
            Self::Note(slug) => note_path(base_path, slug),
        }
    }

    pub fn slug(&self) -> Option<&str> {
        match self {
            Self::Note(slug) => Some(slug),
            Self::Listing => None,
        }
    }
}

/// `{base}/{slug}`.
pub fn note_path(base_path: &str, slug: &str) -> String {
    format!("{base_path}/{slug}")
}

/// Absolute deep link `{origin}{base}/{slug}`.
pub fn deep_link(origin: &str, base_path: &str, slug: &str) -> String {
    format!(
        "{}{}",
        origin.trim_end_matches('/'),
        note_path(base_path, slug)
    )
}
