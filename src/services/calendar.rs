use chrono::NaiveDate;

use crate::models::diary::DiaryEntry;
use crate::models::summary::{CalendarMonth, CalendarSummary, DatedRating};

/// First and last day of `year`-`month`, or `None` if the month is out of
/// range or the year is not representable.
pub fn month_bounds(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year.checked_add(1)?, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some((first, next.pred_opt()?))
}

pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    month_bounds(year, month).map(|(first, last)| (last - first).num_days() as u32 + 1)
}

/// Project one month of entries onto a calendar summary.
pub fn summarize_month(year: i32, month: u32, total_days: u32, entries: &[DiaryEntry]) -> CalendarMonth {
    let rating_sum: i64 = entries.iter().map(|e| i64::from(e.rating)).sum();
    let average_rating = if entries.is_empty() {
        0.0
    } else {
        rating_sum as f64 / entries.len() as f64
    };

    CalendarMonth {
        year,
        month,
        entries: entries.iter().map(DatedRating::from).collect(),
        summary: CalendarSummary {
            total_days,
            recorded_days: entries.len(),
            average_rating,
        },
    }
}
