use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    Extension, Json,
};

use crate::auth::middleware::AuthUser;
use crate::dto::CalendarRangeQuery;
use crate::error::{AppError, AppResult};
use crate::models::summary::{CalendarMonth, CalendarRange};
use crate::services::parse_date;
use crate::AppState;

pub async fn get_month(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path((year, month)): Path<(String, String)>,
) -> AppResult<Json<CalendarMonth>> {
    let year: i32 = year
        .parse()
        .map_err(|_| AppError::Validation("Invalid year".into()))?;
    let month: u32 = month
        .parse()
        .map_err(|_| AppError::Validation("Invalid month".into()))?;

    let calendar = state
        .diaries
        .calendar_month(auth_user.id, year, month)
        .await?;

    Ok(Json(calendar))
}

pub async fn get_range(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    query: Result<Query<CalendarRangeQuery>, QueryRejection>,
) -> AppResult<Json<CalendarRange>> {
    let Query(query) = query?;
    let (Some(start), Some(end)) = (
        query.start_date.as_deref().filter(|s| !s.is_empty()),
        query.end_date.as_deref().filter(|s| !s.is_empty()),
    ) else {
        return Err(AppError::Validation(
            "start_date and end_date are required".into(),
        ));
    };

    let range = state
        .diaries
        .calendar_range(auth_user.id, parse_date(start)?, parse_date(end)?)
        .await?;

    Ok(Json(range))
}
