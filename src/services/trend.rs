use chrono::{Duration, NaiveDate};

use crate::models::diary::DiaryEntry;
use crate::models::summary::{DatedRating, TrendSeries};

pub const DEFAULT_TREND_DAYS: u32 = 30;

/// Earliest date included in a trailing window of `days` days ending today.
/// The window has no upper bound.
pub fn window_start(today: NaiveDate, days: u32) -> NaiveDate {
    today
        .checked_sub_signed(Duration::days(i64::from(days)))
        .unwrap_or(NaiveDate::MIN)
}

/// `entries` must already be in ascending date order.
pub fn series(days: u32, entries: &[DiaryEntry]) -> TrendSeries {
    TrendSeries {
        period_days: days,
        data: entries.iter().map(DatedRating::from).collect(),
    }
}
