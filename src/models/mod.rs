pub mod diary;
pub mod summary;
