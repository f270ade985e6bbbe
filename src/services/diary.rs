use std::sync::Arc;

use chrono::{Duration, NaiveDate, Utc};
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::models::diary::{CreateDiaryRequest, DiaryEntry, DiaryPatch, Progress, UpdateDiaryRequest};
use crate::models::summary::{CalendarMonth, CalendarRange, DatedRating, Statistics, TrendSeries};
use crate::services::{calendar, statistics, streak, trend};
use crate::services::statistics::StatsPeriod;
use crate::store::{DiaryStore, EntryQuery};

/// Row cap for the explicit date-range calendar query.
pub const CALENDAR_RANGE_LIMIT: i64 = 1000;

/// Parse an ISO `YYYY-MM-DD` calendar date. Only the zero-padded,
/// unsigned form is accepted.
pub fn parse_date(s: &str) -> AppResult<NaiveDate> {
    let invalid = || AppError::Validation(format!("Invalid date {s:?}, expected YYYY-MM-DD"));
    let bytes = s.as_bytes();
    let well_formed = bytes.len() == 10
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| if i == 4 || i == 7 { *b == b'-' } else { b.is_ascii_digit() });
    if !well_formed {
        return Err(invalid());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| invalid())
}

fn parse_progress(s: &str) -> AppResult<Progress> {
    s.parse::<Progress>()
        .map_err(|e| AppError::Validation(e.to_string()))
}

/// Diary operations for one store. Every call takes the owning user
/// explicitly; nothing is cached between calls.
#[derive(Clone)]
pub struct DiaryService {
    store: Arc<dyn DiaryStore>,
}

impl DiaryService {
    pub fn new(store: Arc<dyn DiaryStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &dyn DiaryStore {
        self.store.as_ref()
    }

    pub async fn create(&self, user_id: Uuid, req: &CreateDiaryRequest) -> AppResult<DiaryEntry> {
        req.validate()?;
        let date = parse_date(&req.date)?;
        let progress = parse_progress(&req.progress)?;

        let now = Utc::now();
        let entry = DiaryEntry {
            id: Uuid::new_v4(),
            user_id,
            date,
            rating: req.rating,
            progress,
            wake_up_time: req.wake_up_time.clone(),
            sleep_time: req.sleep_time.clone(),
            memo: req.memo.clone(),
            created_at: now,
            updated_at: now,
        };

        let created = self.store.put(&entry).await?;
        tracing::info!(user_id = %user_id, date = %date, "Diary entry created");
        Ok(created)
    }

    pub async fn get_by_date(&self, user_id: Uuid, date: NaiveDate) -> AppResult<Option<DiaryEntry>> {
        Ok(self.store.get(user_id, date).await?)
    }

    /// Entries newest first, optionally bounded on either side (inclusive).
    /// An inverted range simply matches nothing.
    pub async fn list(
        &self,
        user_id: Uuid,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        limit: i64,
        offset: i64,
    ) -> AppResult<Vec<DiaryEntry>> {
        if limit < 0 {
            return Err(AppError::Validation("limit must not be negative".into()));
        }
        if offset < 0 {
            return Err(AppError::Validation("offset must not be negative".into()));
        }

        let query = EntryQuery {
            start,
            end,
            limit: Some(limit),
            offset,
            ..Default::default()
        };
        let entries = self.store.query(user_id, &query).await?;
        tracing::debug!(user_id = %user_id, count = entries.len(), "Listed diary entries");
        Ok(entries)
    }

    /// Merge the supplied fields into the existing entry. An empty update
    /// returns the stored entry untouched.
    pub async fn update(
        &self,
        user_id: Uuid,
        date: NaiveDate,
        req: &UpdateDiaryRequest,
    ) -> AppResult<DiaryEntry> {
        req.validate()?;
        let patch = DiaryPatch {
            rating: req.rating,
            progress: req.progress.as_deref().map(parse_progress).transpose()?,
            wake_up_time: req.wake_up_time.clone(),
            sleep_time: req.sleep_time.clone(),
            memo: req.memo.clone(),
        };

        let existing = self
            .store
            .get(user_id, date)
            .await?
            .ok_or_else(|| AppError::NotFound("Diary not found".into()))?;

        if patch.is_empty() {
            return Ok(existing);
        }

        // Keep updated_at strictly monotonic even if the clock has not
        // ticked since the last write.
        let updated_at = Utc::now().max(existing.updated_at + Duration::microseconds(1));

        let updated = self
            .store
            .merge(user_id, date, &patch, updated_at)
            .await?
            .ok_or_else(|| AppError::NotFound("Diary not found".into()))?;

        tracing::info!(user_id = %user_id, date = %date, "Diary entry updated");
        Ok(updated)
    }

    /// Idempotent: deleting a missing entry succeeds.
    pub async fn delete(&self, user_id: Uuid, date: NaiveDate) -> AppResult<()> {
        let removed = self.store.remove(user_id, date).await?;
        if removed {
            tracing::info!(user_id = %user_id, date = %date, "Diary entry deleted");
        }
        Ok(())
    }

    pub async fn calendar_month(&self, user_id: Uuid, year: i32, month: u32) -> AppResult<CalendarMonth> {
        if !(1..=12).contains(&month) {
            return Err(AppError::Validation("Invalid month".into()));
        }
        let (first, last) = calendar::month_bounds(year, month)
            .ok_or_else(|| AppError::Validation("Invalid year".into()))?;
        let total_days = calendar::days_in_month(year, month)
            .ok_or_else(|| AppError::Validation("Invalid year".into()))?;

        let entries = self
            .store
            .query(user_id, &EntryQuery::ascending().between(first, last))
            .await?;

        Ok(calendar::summarize_month(year, month, total_days, &entries))
    }

    pub async fn calendar_range(
        &self,
        user_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<CalendarRange> {
        let entries = self
            .list(user_id, Some(start), Some(end), CALENDAR_RANGE_LIMIT, 0)
            .await?;

        Ok(CalendarRange {
            start_date: start,
            end_date: end,
            entries: entries.iter().map(DatedRating::from).collect(),
        })
    }

    pub async fn statistics(&self, user_id: Uuid, period: StatsPeriod) -> AppResult<Statistics> {
        self.statistics_on(user_id, period, Utc::now().date_naive())
            .await
    }

    pub async fn statistics_on(
        &self,
        user_id: Uuid,
        period: StatsPeriod,
        today: NaiveDate,
    ) -> AppResult<Statistics> {
        let (start, end) = period.bounds(today);
        let in_period = self
            .store
            .query(user_id, &EntryQuery::ascending().between(start, end))
            .await?;

        // Streaks look at the whole history, not just the period.
        let history = self.store.query(user_id, &EntryQuery::ascending()).await?;
        let dates: Vec<NaiveDate> = history.iter().map(|e| e.date).collect();
        let longest = streak::longest_streak(&dates);

        tracing::debug!(
            user_id = %user_id,
            period = period.label(),
            entries = in_period.len(),
            "Computed statistics"
        );
        Ok(statistics::summarize(period, (start, end), &in_period, longest))
    }

    pub async fn trend(&self, user_id: Uuid, days: u32) -> AppResult<TrendSeries> {
        self.trend_on(user_id, days, Utc::now().date_naive()).await
    }

    pub async fn trend_on(&self, user_id: Uuid, days: u32, today: NaiveDate) -> AppResult<TrendSeries> {
        let since = trend::window_start(today, days);
        let entries = self
            .store
            .query(user_id, &EntryQuery::ascending().since(since))
            .await?;
        Ok(trend::series(days, &entries))
    }
}
