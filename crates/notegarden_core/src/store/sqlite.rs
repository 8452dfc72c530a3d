//! SQLite-backed note store.
//!
//! # Invariants
//! - Write paths call `NoteRecord::validate()` before SQL mutations.
//! - Read paths reject malformed persisted rows instead of masking them.
//! - `published_at` is stored as Unix epoch milliseconds.

use super::note_store::{NoteStore, StoreError, StoreResult};
use crate::db::{ConstraintKind, DbError};
use crate::model::note::{NoteId, NoteRecord};
use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use rusqlite::{params, Connection, Row};
use uuid::Uuid;

const NOTE_SELECT_SQL: &str = "SELECT
    id,
    slug,
    title,
    summary,
    short_description,
    category,
    content,
    published_at,
    is_pinned,
    featured
FROM notes";

const NEWEST_FIRST_SQL: &str = "ORDER BY published_at IS NULL, published_at DESC, slug ASC";

/// Note store over a migrated SQLite connection.
pub struct SqliteNoteStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteNoteStore<'conn> {
    /// Wraps a connection returned by `open_db`/`open_db_in_memory`.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Inserts one record, rejecting invalid data and duplicate slugs or ids.
    pub fn insert_note(&self, record: &NoteRecord) -> StoreResult<NoteId> {
        insert_into(self.conn, record)
    }

    /// Inserts every record in one transaction.
    ///
    /// The first rejected record rolls the whole batch back.
    pub fn insert_notes(&self, records: &[NoteRecord]) -> StoreResult<usize> {
        let tx = self.conn.unchecked_transaction()?;
        for record in records {
            insert_into(&tx, record)?;
        }
        tx.commit()?;
        info!(
            "event=note_import module=store status=ok count={}",
            records.len()
        );
        Ok(records.len())
    }

    fn query_notes(&self, sql: &str, limit: Option<u32>) -> StoreResult<Vec<NoteRecord>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = match limit {
            Some(limit) => stmt.query([i64::from(limit)])?,
            None => stmt.query([])?,
        };

        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            records.push(parse_note_row(row)?);
        }
        Ok(records)
    }
}

impl NoteStore for SqliteNoteStore<'_> {
    fn fetch_all_notes(&self) -> StoreResult<Vec<NoteRecord>> {
        self.query_notes(&format!("{NOTE_SELECT_SQL} {NEWEST_FIRST_SQL};"), None)
    }

    fn fetch_featured_notes(&self, limit: u32) -> StoreResult<Vec<NoteRecord>> {
        if limit == 0 {
            return Ok(Vec::new());
        }
        self.query_notes(
            &format!("{NOTE_SELECT_SQL} WHERE featured = 1 {NEWEST_FIRST_SQL} LIMIT ?1;"),
            Some(limit),
        )
    }
}

fn insert_into(conn: &Connection, record: &NoteRecord) -> StoreResult<NoteId> {
    record.validate()?;

    let result = conn.execute(
        "INSERT INTO notes (
            id,
            slug,
            title,
            summary,
            short_description,
            category,
            content,
            published_at,
            is_pinned,
            featured
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10);",
        params![
            record.id.to_string(),
            record.slug.as_str(),
            record.title.as_str(),
            record.summary.as_deref(),
            record.short_description.as_deref(),
            record.category.as_deref(),
            record.content.as_str(),
            record.published_date.map(|date| date.timestamp_millis()),
            bool_to_int(record.is_pinned),
            bool_to_int(record.featured),
        ],
    );

    let err = match result {
        Ok(_) => {
            debug!("event=note_insert module=store status=ok slug={}", record.slug);
            return Ok(record.id);
        }
        Err(err) => DbError::from(err),
    };
    let (error_code, mapped) = match err.constraint_kind() {
        Some(ConstraintKind::PrimaryKey) => ("duplicate_id", StoreError::DuplicateId(record.id)),
        Some(ConstraintKind::Unique) => (
            "duplicate_slug",
            StoreError::DuplicateSlug(record.slug.clone()),
        ),
        Some(ConstraintKind::Other) | None => ("db", StoreError::Db(err)),
    };
    warn!(
        "event=note_insert module=store status=error error_code={error_code} slug={}",
        record.slug
    );
    Err(mapped)
}

fn parse_note_row(row: &Row<'_>) -> StoreResult<NoteRecord> {
    let id_text: String = row.get("id")?;
    let id = Uuid::parse_str(&id_text)
        .map_err(|_| StoreError::InvalidData(format!("invalid id `{id_text}` in notes.id")))?;

    let published_date = match row.get::<_, Option<i64>>("published_at")? {
        Some(millis) => Some(DateTime::<Utc>::from_timestamp_millis(millis).ok_or_else(
            || StoreError::InvalidData(format!("invalid published_at `{millis}`")),
        )?),
        None => None,
    };

    Ok(NoteRecord {
        id,
        slug: row.get("slug")?,
        title: row.get("title")?,
        summary: row.get("summary")?,
        short_description: row.get("short_description")?,
        category: row.get("category")?,
        content: row.get("content")?,
        published_date,
        is_pinned: parse_flag(row, "is_pinned")?,
        featured: parse_flag(row, "featured")?,
    })
}

fn parse_flag(row: &Row<'_>, column: &str) -> StoreResult<bool> {
    match row.get::<_, i64>(column)? {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(StoreError::InvalidData(format!(
            "invalid {column} value `{other}` in notes.{column}"
        ))),
    }
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}
