//! Diary aggregation and query engine.
//!
//! `diary` owns the store-facing operations; `calendar`, `statistics`,
//! `streak` and `trend` are pure projections over fetched entries.

pub mod calendar;
pub mod diary;
pub mod statistics;
pub mod streak;
pub mod trend;

pub use diary::{parse_date, DiaryService};
pub use statistics::StatsPeriod;
