//! Durable keyed storage for diary entries.
//!
//! Entries are keyed by `(user_id, date)`. Implementations must reject a
//! second `put` for an existing key with [`StoreError::Conflict`] rather
//! than overwrite it.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::models::diary::{DiaryEntry, DiaryPatch};

mod memory;
mod postgres;

pub use memory::MemoryDiaryStore;
pub use postgres::PgDiaryStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("entry already exists")]
    Conflict,

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Ascending,
    #[default]
    Descending,
}

/// Filter for [`DiaryStore::query`]. Both date bounds are inclusive and
/// an absent bound leaves that side open.
#[derive(Debug, Clone, Default)]
pub struct EntryQuery {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub order: SortOrder,
    pub limit: Option<i64>,
    pub offset: i64,
}

impl EntryQuery {
    pub fn ascending() -> Self {
        Self {
            order: SortOrder::Ascending,
            ..Default::default()
        }
    }

    pub fn between(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start = Some(start);
        self.end = Some(end);
        self
    }

    pub fn since(mut self, start: NaiveDate) -> Self {
        self.start = Some(start);
        self
    }

    pub fn matches(&self, date: NaiveDate) -> bool {
        self.start.map_or(true, |s| date >= s) && self.end.map_or(true, |e| date <= e)
    }
}

#[async_trait]
pub trait DiaryStore: Send + Sync {
    /// Insert a new entry, failing with [`StoreError::Conflict`] if one
    /// already exists for the same user and date.
    async fn put(&self, entry: &DiaryEntry) -> StoreResult<DiaryEntry>;

    async fn get(&self, user_id: Uuid, date: NaiveDate) -> StoreResult<Option<DiaryEntry>>;

    async fn query(&self, user_id: Uuid, query: &EntryQuery) -> StoreResult<Vec<DiaryEntry>>;

    /// Apply `patch` and stamp `updated_at`. Returns `None` if no entry exists.
    async fn merge(
        &self,
        user_id: Uuid,
        date: NaiveDate,
        patch: &DiaryPatch,
        updated_at: DateTime<Utc>,
    ) -> StoreResult<Option<DiaryEntry>>;

    /// Remove the entry if present. Returns whether a row was deleted.
    async fn remove(&self, user_id: Uuid, date: NaiveDate) -> StoreResult<bool>;

    async fn ping(&self) -> StoreResult<()>;
}
