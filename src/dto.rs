//! # Diary API — Request/Response DTOs
//!
//! Query-string and envelope types that exist only at the HTTP boundary.
//! Entity bodies (`DiaryEntry`, `Statistics`, ...) live in `models`.
//!
//! Conventions:
//! - `*Query`    → deserialized from query params; numbers arrive as strings
//!   so that unparsable values can fall back to defaults instead of 400ing
//! - `*Response` → serialized to client JSON

use serde::{Deserialize, Serialize};

use crate::models::diary::DiaryEntry;

pub const DEFAULT_LIST_LIMIT: i64 = 30;
pub const MAX_LIST_LIMIT: i64 = 1000;

// ============================================================================
// Diaries
// ============================================================================

/// GET /api/v1/diaries
#[derive(Debug, Default, Deserialize)]
pub struct DiaryListQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct DiaryListResponse {
    pub diaries: Vec<DiaryEntry>,
    pub pagination: Pagination,
}

#[derive(Debug, Serialize)]
pub struct Pagination {
    /// Number of entries on this page.
    pub total: usize,
    pub limit: i64,
    pub offset: i64,
}

// ============================================================================
// Calendar
// ============================================================================

/// GET /api/v1/calendar?start_date=..&end_date=..
#[derive(Debug, Default, Deserialize)]
pub struct CalendarRangeQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

// ============================================================================
// Statistics
// ============================================================================

/// GET /api/v1/statistics/summary
#[derive(Debug, Default, Deserialize)]
pub struct StatisticsQuery {
    pub period: Option<String>,
}

/// GET /api/v1/statistics/trend
#[derive(Debug, Default, Deserialize)]
pub struct TrendQuery {
    pub days: Option<String>,
}

impl TrendQuery {
    /// Non-positive or unparsable values mean the default window.
    pub fn days_or_default(&self, default: u32) -> u32 {
        self.days
            .as_deref()
            .and_then(|d| d.trim().parse::<i64>().ok())
            .filter(|&d| d > 0)
            .map_or(default, |d| u32::try_from(d).unwrap_or(u32::MAX))
    }
}
