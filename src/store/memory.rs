use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{DiaryStore, EntryQuery, SortOrder, StoreError, StoreResult};
use crate::models::diary::{DiaryEntry, DiaryPatch};

/// In-process store for single-instance deployments and tests.
/// Contents are lost on restart.
#[derive(Clone, Default)]
pub struct MemoryDiaryStore {
    entries: Arc<RwLock<BTreeMap<(Uuid, NaiveDate), DiaryEntry>>>,
}

impl MemoryDiaryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DiaryStore for MemoryDiaryStore {
    async fn put(&self, entry: &DiaryEntry) -> StoreResult<DiaryEntry> {
        let mut entries = self.entries.write().await;
        let key = (entry.user_id, entry.date);
        if entries.contains_key(&key) {
            return Err(StoreError::Conflict);
        }
        entries.insert(key, entry.clone());
        Ok(entry.clone())
    }

    async fn get(&self, user_id: Uuid, date: NaiveDate) -> StoreResult<Option<DiaryEntry>> {
        Ok(self.entries.read().await.get(&(user_id, date)).cloned())
    }

    async fn query(&self, user_id: Uuid, query: &EntryQuery) -> StoreResult<Vec<DiaryEntry>> {
        let entries = self.entries.read().await;
        let matching = entries
            .range((user_id, NaiveDate::MIN)..=(user_id, NaiveDate::MAX))
            .map(|(_, e)| e)
            .filter(|e| query.matches(e.date));

        let ordered: Vec<&DiaryEntry> = match query.order {
            SortOrder::Ascending => matching.collect(),
            SortOrder::Descending => matching.rev().collect(),
        };

        let offset = usize::try_from(query.offset).unwrap_or(0);
        let limit = query
            .limit
            .map_or(usize::MAX, |l| usize::try_from(l).unwrap_or(0));

        Ok(ordered
            .into_iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn merge(
        &self,
        user_id: Uuid,
        date: NaiveDate,
        patch: &DiaryPatch,
        updated_at: DateTime<Utc>,
    ) -> StoreResult<Option<DiaryEntry>> {
        let mut entries = self.entries.write().await;
        let Some(entry) = entries.get_mut(&(user_id, date)) else {
            return Ok(None);
        };
        patch.apply_to(entry);
        entry.updated_at = updated_at;
        Ok(Some(entry.clone()))
    }

    async fn remove(&self, user_id: Uuid, date: NaiveDate) -> StoreResult<bool> {
        Ok(self.entries.write().await.remove(&(user_id, date)).is_some())
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}
