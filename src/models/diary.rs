use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct DiaryEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    #[sqlx(rename = "entry_date")]
    pub date: NaiveDate,
    pub rating: i32,
    pub progress: Progress,
    pub wake_up_time: String,
    pub sleep_time: String,
    pub memo: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Self-assessed progress for the day, best to worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "diary_progress")]
pub enum Progress {
    A,
    B,
    C,
}

impl Progress {
    pub const ALL: [Progress; 3] = [Progress::A, Progress::B, Progress::C];

    pub fn as_str(&self) -> &'static str {
        match self {
            Progress::A => "A",
            Progress::B => "B",
            Progress::C => "C",
        }
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Progress must be one of A, B, C (got {0:?})")]
pub struct InvalidProgress(pub String);

impl FromStr for Progress {
    type Err = InvalidProgress;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A" => Ok(Progress::A),
            "B" => Ok(Progress::B),
            "C" => Ok(Progress::C),
            other => Err(InvalidProgress(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateDiaryRequest {
    pub date: String,
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: i32,
    pub progress: String,
    #[validate(length(min = 1, max = 5, message = "wake_up_time must be HH:MM"))]
    pub wake_up_time: String,
    #[validate(length(min = 1, max = 5, message = "sleep_time must be HH:MM"))]
    pub sleep_time: String,
    pub memo: Option<String>,
}

/// Partial update body. Absent fields keep their stored value.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateDiaryRequest {
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: Option<i32>,
    pub progress: Option<String>,
    #[validate(length(min = 1, max = 5, message = "wake_up_time must be HH:MM"))]
    pub wake_up_time: Option<String>,
    #[validate(length(min = 1, max = 5, message = "sleep_time must be HH:MM"))]
    pub sleep_time: Option<String>,
    pub memo: Option<String>,
}

/// Validated field mask applied to a stored entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiaryPatch {
    pub rating: Option<i32>,
    pub progress: Option<Progress>,
    pub wake_up_time: Option<String>,
    pub sleep_time: Option<String>,
    pub memo: Option<String>,
}

impl DiaryPatch {
    pub fn is_empty(&self) -> bool {
        self.rating.is_none()
            && self.progress.is_none()
            && self.wake_up_time.is_none()
            && self.sleep_time.is_none()
            && self.memo.is_none()
    }

    /// Overlay the present fields onto `entry`.
    pub fn apply_to(&self, entry: &mut DiaryEntry) {
        if let Some(rating) = self.rating {
            entry.rating = rating;
        }
        if let Some(progress) = self.progress {
            entry.progress = progress;
        }
        if let Some(wake) = &self.wake_up_time {
            entry.wake_up_time = wake.clone();
        }
        if let Some(sleep) = &self.sleep_time {
            entry.sleep_time = sleep.clone();
        }
        if let Some(memo) = &self.memo {
            entry.memo = Some(memo.clone());
        }
    }
}
