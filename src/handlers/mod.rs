pub mod calendar;
pub mod diaries;
pub mod health;
pub mod statistics;
