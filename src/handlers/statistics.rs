use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Extension, Json,
};

use crate::auth::middleware::AuthUser;
use crate::dto::{StatisticsQuery, TrendQuery};
use crate::error::AppResult;
use crate::models::summary::{Statistics, TrendSeries};
use crate::services::trend::DEFAULT_TREND_DAYS;
use crate::services::StatsPeriod;
use crate::AppState;

pub async fn get_summary(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    query: Result<Query<StatisticsQuery>, QueryRejection>,
) -> AppResult<Json<Statistics>> {
    let Query(query) = query?;
    let period = StatsPeriod::parse_lenient(query.period.as_deref().unwrap_or("month"));
    let stats = state.diaries.statistics(auth_user.id, period).await?;
    Ok(Json(stats))
}

pub async fn get_trend(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    query: Result<Query<TrendQuery>, QueryRejection>,
) -> AppResult<Json<TrendSeries>> {
    let Query(query) = query?;
    let days = query.days_or_default(DEFAULT_TREND_DAYS);
    let trend = state.diaries.trend(auth_user.id, days).await?;
    Ok(Json(trend))
}
