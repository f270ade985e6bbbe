use std::collections::BTreeMap;
use std::f64::consts::TAU;

use chrono::{Datelike, Duration, NaiveDate, NaiveTime, Timelike};

use crate::models::diary::{DiaryEntry, Progress, MAX_RATING, MIN_RATING};
use crate::models::summary::Statistics;
use crate::services::calendar::month_bounds;

const MINUTES_PER_DAY: f64 = 24.0 * 60.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatsPeriod {
    Week,
    #[default]
    Month,
    Year,
}

impl StatsPeriod {
    /// Anything other than `week` or `year` falls back to `month`.
    pub fn parse_lenient(s: &str) -> Self {
        match s {
            "week" => StatsPeriod::Week,
            "year" => StatsPeriod::Year,
            _ => StatsPeriod::Month,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StatsPeriod::Week => "week",
            StatsPeriod::Month => "month",
            StatsPeriod::Year => "year",
        }
    }

    /// Inclusive `(start, end)` bounds relative to `today`.
    pub fn bounds(&self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        match self {
            StatsPeriod::Week => (today - Duration::days(7), today),
            StatsPeriod::Month => month_bounds(today.year(), today.month())
                .unwrap_or((today, today)),
            StatsPeriod::Year => (
                today.with_ordinal(1).unwrap_or(today),
                NaiveDate::from_ymd_opt(today.year(), 12, 31).unwrap_or(today),
            ),
        }
    }
}

/// Aggregate the entries of one period. `longest_streak` is passed in
/// because it is computed over the whole history, not the period.
pub fn summarize(
    period: StatsPeriod,
    bounds: (NaiveDate, NaiveDate),
    entries: &[DiaryEntry],
    longest_streak: u32,
) -> Statistics {
    let mut rating_distribution: BTreeMap<String, usize> = (MIN_RATING..=MAX_RATING)
        .map(|r| (r.to_string(), 0))
        .collect();
    let mut progress_distribution: BTreeMap<String, usize> = Progress::ALL
        .iter()
        .map(|p| (p.to_string(), 0))
        .collect();

    let mut rating_sum = 0i64;
    for entry in entries {
        rating_sum += i64::from(entry.rating);
        if let Some(count) = rating_distribution.get_mut(&entry.rating.to_string()) {
            *count += 1;
        }
        if let Some(count) = progress_distribution.get_mut(entry.progress.as_str()) {
            *count += 1;
        }
    }

    let average_rating = if entries.is_empty() {
        0.0
    } else {
        rating_sum as f64 / entries.len() as f64
    };

    Statistics {
        period: period.label().to_string(),
        period_start: bounds.0,
        period_end: bounds.1,
        total_entries: entries.len(),
        average_rating,
        rating_distribution,
        progress_distribution,
        average_wake_up_time: mean_clock_time(entries.iter().map(|e| e.wake_up_time.as_str())),
        average_sleep_time: mean_clock_time(entries.iter().map(|e| e.sleep_time.as_str())),
        longest_streak,
    }
}

/// Circular mean of `HH:MM` clock times on the 24-hour dial, so that
/// 23:00 and 01:00 average to 00:00. Unparsable values are skipped.
/// Returns `None` when nothing parses or the times cancel out.
pub fn mean_clock_time<'a>(times: impl IntoIterator<Item = &'a str>) -> Option<String> {
    let (mut sin, mut cos, mut n) = (0.0f64, 0.0f64, 0usize);
    for t in times {
        let Ok(time) = NaiveTime::parse_from_str(t.trim(), "%H:%M") else {
            continue;
        };
        let minutes = f64::from(time.hour() * 60 + time.minute());
        let angle = minutes / MINUTES_PER_DAY * TAU;
        sin += angle.sin();
        cos += angle.cos();
        n += 1;
    }

    if n == 0 || sin.hypot(cos) / (n as f64) < 1e-9 {
        return None;
    }

    let angle = sin.atan2(cos).rem_euclid(TAU);
    let minutes = (angle / TAU * MINUTES_PER_DAY).round() as u32 % 1440;
    Some(format!("{:02}:{:02}", minutes / 60, minutes % 60))
}
