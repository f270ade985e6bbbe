use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::diary::DiaryEntry;

/// A `(date, rating)` pair as rendered in calendar and trend views.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatedRating {
    pub date: NaiveDate,
    pub rating: i32,
}

impl From<&DiaryEntry> for DatedRating {
    fn from(e: &DiaryEntry) -> Self {
        Self {
            date: e.date,
            rating: e.rating,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarSummary {
    pub total_days: u32,
    pub recorded_days: usize,
    pub average_rating: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CalendarMonth {
    pub year: i32,
    pub month: u32,
    pub entries: Vec<DatedRating>,
    pub summary: CalendarSummary,
}

#[derive(Debug, Clone, Serialize)]
pub struct CalendarRange {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub entries: Vec<DatedRating>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Statistics {
    pub period: String,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub total_entries: usize,
    pub average_rating: f64,
    pub rating_distribution: BTreeMap<String, usize>,
    pub progress_distribution: BTreeMap<String, usize>,
    pub average_wake_up_time: Option<String>,
    pub average_sleep_time: Option<String>,
    pub longest_streak: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrendSeries {
    pub period_days: u32,
    pub data: Vec<DatedRating>,
}
