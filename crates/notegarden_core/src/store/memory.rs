//! In-memory note store.

use super::note_store::{sort_newest_first, NoteStore, StoreError, StoreResult};
use crate::model::note::NoteRecord;

/// Store adapter over a fixed record list, optionally failing every fetch.
#[derive(Debug, Clone, Default)]
pub struct MemoryNoteStore {
    records: Vec<NoteRecord>,
    failure: Option<String>,
}

impl MemoryNoteStore {
    pub fn new(records: Vec<NoteRecord>) -> Self {
        Self {
            records,
            failure: None,
        }
    }

    /// Creates a store whose fetches all fail with `message`.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            records: Vec::new(),
            failure: Some(message.into()),
        }
    }

    fn check_available(&self) -> StoreResult<()> {
        match &self.failure {
            Some(message) => Err(StoreError::Unavailable(message.clone())),
            None => Ok(()),
        }
    }
}

impl NoteStore for MemoryNoteStore {
    fn fetch_all_notes(&self) -> StoreResult<Vec<NoteRecord>> {
        self.check_available()?;
        let mut records = self.records.clone();
        sort_newest_first(&mut records);
        Ok(records)
    }

    fn fetch_featured_notes(&self, limit: u32) -> StoreResult<Vec<NoteRecord>> {
        let mut featured = self
            .fetch_all_notes()?
            .into_iter()
            .filter(|record| record.featured)
            .collect::<Vec<_>>();
        featured.truncate(limit as usize);
        Ok(featured)
    }
}
