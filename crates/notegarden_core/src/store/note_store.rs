//! Note store contract and error type.

use crate::db::DbError;
use crate::model::note::{NoteId, NoteRecord, NoteValidationError};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Default number of records returned by the homepage featured fetch.
pub const FEATURED_PREVIEW_LIMIT: u32 = 2;

pub type StoreResult<T> = Result<T, StoreError>;

/// Store-layer error for fetch and write operations.
#[derive(Debug)]
pub enum StoreError {
    Validation(NoteValidationError),
    Db(DbError),
    /// A second record tried to claim an existing slug.
    DuplicateSlug(String),
    /// A second record tried to reuse an existing id.
    DuplicateId(NoteId),
    InvalidData(String),
    /// Remote store could not be reached or refused the query.
    Unavailable(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::DuplicateSlug(slug) => write!(f, "note slug already exists: {slug}"),
            Self::DuplicateId(id) => write!(f, "note id already exists: {id}"),
            Self::InvalidData(message) => write!(f, "invalid stored note data: {message}"),
            Self::Unavailable(message) => write!(f, "note store unavailable: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::DuplicateSlug(_)
            | Self::DuplicateId(_)
            | Self::InvalidData(_)
            | Self::Unavailable(_) => None,
        }
    }
}

impl From<NoteValidationError> for StoreError {
    fn from(value: NoteValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Read contract for the notes collection.
pub trait NoteStore {
    /// Fetches every note, newest first.
    fn fetch_all_notes(&self) -> StoreResult<Vec<NoteRecord>>;
    /// Fetches at most `limit` featured notes, newest first.
    fn fetch_featured_notes(&self, limit: u32) -> StoreResult<Vec<NoteRecord>>;
}

/// Orders records newest first, undated last, slug as tie-breaker.
pub(crate) fn sort_newest_first(records: &mut [NoteRecord]) {
    records.sort_by(|a, b| {
        b.published_date
            .cmp(&a.published_date)
            .then_with(|| a.slug.cmp(&b.slug))
    });
}
