use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Extension, Json,
};

use crate::auth::middleware::AuthUser;
use crate::dto::{DiaryListQuery, DiaryListResponse, Pagination, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use crate::error::{AppError, AppResult};
use crate::models::diary::{CreateDiaryRequest, DiaryEntry, UpdateDiaryRequest};
use crate::services::parse_date;
use crate::AppState;

/// Empty query values mean "no bound".
fn optional_date(value: Option<&str>) -> AppResult<Option<chrono::NaiveDate>> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => parse_date(s).map(Some),
    }
}

pub async fn create_diary(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    payload: Result<Json<CreateDiaryRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<DiaryEntry>)> {
    let Json(body) = payload?;
    let entry = state.diaries.create(auth_user.id, &body).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

pub async fn list_diaries(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    query: Result<Query<DiaryListQuery>, QueryRejection>,
) -> AppResult<Json<DiaryListResponse>> {
    let Query(query) = query?;
    let start = optional_date(query.start_date.as_deref())?;
    let end = optional_date(query.end_date.as_deref())?;
    let limit = query.limit.unwrap_or(DEFAULT_LIST_LIMIT).min(MAX_LIST_LIMIT);
    let offset = query.offset.unwrap_or(0);

    let diaries = state
        .diaries
        .list(auth_user.id, start, end, limit, offset)
        .await?;

    Ok(Json(DiaryListResponse {
        pagination: Pagination {
            total: diaries.len(),
            limit,
            offset,
        },
        diaries,
    }))
}

pub async fn get_diary(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(date): Path<String>,
) -> AppResult<Json<DiaryEntry>> {
    let date = parse_date(&date)?;
    let entry = state
        .diaries
        .get_by_date(auth_user.id, date)
        .await?
        .ok_or(AppError::NotFound("Diary not found".into()))?;

    Ok(Json(entry))
}

pub async fn update_diary(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(date): Path<String>,
    payload: Result<Json<UpdateDiaryRequest>, JsonRejection>,
) -> AppResult<Json<DiaryEntry>> {
    let date = parse_date(&date)?;
    let Json(body) = payload?;
    let entry = state.diaries.update(auth_user.id, date, &body).await?;
    Ok(Json(entry))
}

pub async fn delete_diary(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(date): Path<String>,
) -> AppResult<StatusCode> {
    let date = parse_date(&date)?;
    state.diaries.delete(auth_user.id, date).await?;
    Ok(StatusCode::NO_CONTENT)
}
