use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::{DiaryStore, EntryQuery, SortOrder, StoreError, StoreResult};
use crate::models::diary::{DiaryEntry, DiaryPatch};

const QUERY_ASC: &str = r#"
    SELECT * FROM diaries
    WHERE user_id = $1
      AND ($2::date IS NULL OR entry_date >= $2)
      AND ($3::date IS NULL OR entry_date <= $3)
    ORDER BY entry_date ASC
    LIMIT $4 OFFSET $5
"#;

const QUERY_DESC: &str = r#"
    SELECT * FROM diaries
    WHERE user_id = $1
      AND ($2::date IS NULL OR entry_date >= $2)
      AND ($3::date IS NULL OR entry_date <= $3)
    ORDER BY entry_date DESC
    LIMIT $4 OFFSET $5
"#;

#[derive(Clone)]
pub struct PgDiaryStore {
    db: PgPool,
}

impl PgDiaryStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl DiaryStore for PgDiaryStore {
    async fn put(&self, entry: &DiaryEntry) -> StoreResult<DiaryEntry> {
        let result = sqlx::query_as::<_, DiaryEntry>(
            r#"
            INSERT INTO diaries (id, user_id, entry_date, rating, progress, wake_up_time, sleep_time, memo, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(entry.id)
        .bind(entry.user_id)
        .bind(entry.date)
        .bind(entry.rating)
        .bind(entry.progress)
        .bind(&entry.wake_up_time)
        .bind(&entry.sleep_time)
        .bind(&entry.memo)
        .bind(entry.created_at)
        .bind(entry.updated_at)
        .fetch_one(&self.db)
        .await;

        match result {
            Ok(row) => Ok(row),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Err(StoreError::Conflict),
            Err(e) => Err(e.into()),
        }
    }

    async fn get(&self, user_id: Uuid, date: NaiveDate) -> StoreResult<Option<DiaryEntry>> {
        let row = sqlx::query_as::<_, DiaryEntry>(
            "SELECT * FROM diaries WHERE user_id = $1 AND entry_date = $2",
        )
        .bind(user_id)
        .bind(date)
        .fetch_optional(&self.db)
        .await?;

        Ok(row)
    }

    async fn query(&self, user_id: Uuid, query: &EntryQuery) -> StoreResult<Vec<DiaryEntry>> {
        let sql = match query.order {
            SortOrder::Ascending => QUERY_ASC,
            SortOrder::Descending => QUERY_DESC,
        };

        // LIMIT NULL is LIMIT ALL in Postgres.
        let rows = sqlx::query_as::<_, DiaryEntry>(sql)
            .bind(user_id)
            .bind(query.start)
            .bind(query.end)
            .bind(query.limit)
            .bind(query.offset)
            .fetch_all(&self.db)
            .await?;

        Ok(rows)
    }

    async fn merge(
        &self,
        user_id: Uuid,
        date: NaiveDate,
        patch: &DiaryPatch,
        updated_at: DateTime<Utc>,
    ) -> StoreResult<Option<DiaryEntry>> {
        let row = sqlx::query_as::<_, DiaryEntry>(
            r#"
            UPDATE diaries SET
                rating = COALESCE($3, rating),
                progress = COALESCE($4, progress),
                wake_up_time = COALESCE($5, wake_up_time),
                sleep_time = COALESCE($6, sleep_time),
                memo = COALESCE($7, memo),
                updated_at = $8
            WHERE user_id = $1 AND entry_date = $2
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(date)
        .bind(patch.rating)
        .bind(patch.progress)
        .bind(&patch.wake_up_time)
        .bind(&patch.sleep_time)
        .bind(&patch.memo)
        .bind(updated_at)
        .fetch_optional(&self.db)
        .await?;

        Ok(row)
    }

    async fn remove(&self, user_id: Uuid, date: NaiveDate) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM diaries WHERE user_id = $1 AND entry_date = $2")
            .bind(user_id)
            .bind(date)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> StoreResult<()> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.db)
            .await?;
        Ok(())
    }
}
