use std::sync::Arc;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use chrono::{Datelike, Duration, Utc};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use diary_api::config::Config;
use diary_api::store::MemoryDiaryStore;
use diary_api::{build_router, AppState};

fn app() -> Router {
    build_router(AppState::new(
        Arc::new(MemoryDiaryStore::new()),
        Config::default(),
    ))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(b) => builder
            .header("content-type", "application/json")
            .body(Body::from(b.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn diary(date: &str, rating: i64) -> Value {
    json!({
        "date": date,
        "rating": rating,
        "progress": "A",
        "wake_up_time": "06:30",
        "sleep_time": "22:45",
        "memo": "quiet day",
    })
}

#[tokio::test]
async fn test_health() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, body) = send(&app, Method::GET, "/readyz", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["checks"]["database"], "ok");
}

#[tokio::test]
async fn test_diary_lifecycle() {
    let app = app();

    let (status, created) = send(&app, Method::POST, "/api/v1/diaries", Some(diary("2024-01-10", 4))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["date"], "2024-01-10");
    assert_eq!(created["rating"], 4);
    assert_eq!(created["progress"], "A");
    assert_eq!(created["memo"], "quiet day");
    assert!(created["id"].is_string());

    let (status, fetched) = send(&app, Method::GET, "/api/v1/diaries/2024-01-10", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (status, updated) = send(
        &app,
        Method::PUT,
        "/api/v1/diaries/2024-01-10",
        Some(json!({ "memo": "actually a busy day" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["memo"], "actually a busy day");
    assert_eq!(updated["rating"], 4);
    assert_eq!(updated["wake_up_time"], "06:30");
    assert_ne!(updated["updated_at"], created["updated_at"]);

    let (status, _) = send(&app, Method::DELETE, "/api/v1/diaries/2024-01-10", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, Method::DELETE, "/api/v1/diaries/2024-01-10", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&app, Method::GET, "/api/v1/diaries/2024-01-10", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_duplicate_create_is_conflict() {
    let app = app();
    let (status, _) = send(&app, Method::POST, "/api/v1/diaries", Some(diary("2024-02-01", 3))).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, Method::POST, "/api/v1/diaries", Some(diary("2024-02-01", 5))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "CONFLICT");
}

#[tokio::test]
async fn test_validation_errors() {
    let app = app();

    let (status, body) = send(&app, Method::POST, "/api/v1/diaries", Some(diary("2024-02-01", 7))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

    let mut bad = diary("2024-02-01", 3);
    bad["progress"] = json!("Z");
    let (status, body) = send(&app, Method::POST, "/api/v1/diaries", Some(bad)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

    let (status, body) = send(&app, Method::POST, "/api/v1/diaries", Some(json!({ "date": "2024-02-01" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

    let (status, body) = send(&app, Method::GET, "/api/v1/diaries/not-a-date", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

    let (status, body) = send(&app, Method::GET, "/api/v1/calendar/2024/13", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], "Invalid month");

    let (status, _) = send(&app, Method::GET, "/api/v1/calendar?start_date=2024-01-01", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_missing_is_not_found() {
    let app = app();
    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/v1/diaries/2024-03-03",
        Some(json!({ "rating": 2 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_list_filters_and_paginates() {
    let app = app();
    for day in 1..=6 {
        let date = format!("2024-01-{day:02}");
        send(&app, Method::POST, "/api/v1/diaries", Some(diary(&date, 3))).await;
    }

    let (status, body) = send(&app, Method::GET, "/api/v1/diaries", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pagination"]["limit"], 30);
    assert_eq!(body["pagination"]["offset"], 0);
    assert_eq!(body["pagination"]["total"], 6);
    assert_eq!(body["diaries"][0]["date"], "2024-01-06");

    let (_, body) = send(
        &app,
        Method::GET,
        "/api/v1/diaries?start_date=2024-01-02&end_date=2024-01-05&limit=2&offset=1",
        None,
    )
    .await;
    let dates: Vec<&str> = body["diaries"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["date"].as_str().unwrap())
        .collect();
    assert_eq!(dates, vec!["2024-01-04", "2024-01-03"]);

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/v1/diaries?start_date=2024-01-10&end_date=2024-01-05",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["diaries"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_calendar_month_and_range() {
    let app = app();
    send(&app, Method::POST, "/api/v1/diaries", Some(diary("2024-02-10", 2))).await;
    send(&app, Method::POST, "/api/v1/diaries", Some(diary("2024-02-29", 4))).await;
    send(&app, Method::POST, "/api/v1/diaries", Some(diary("2024-03-01", 5))).await;

    let (status, body) = send(&app, Method::GET, "/api/v1/calendar/2024/2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["year"], 2024);
    assert_eq!(body["month"], 2);
    assert_eq!(body["summary"]["total_days"], 29);
    assert_eq!(body["summary"]["recorded_days"], 2);
    assert_eq!(body["summary"]["average_rating"], 3.0);
    assert_eq!(body["entries"][0], json!({ "date": "2024-02-10", "rating": 2 }));

    let (_, body) = send(&app, Method::GET, "/api/v1/calendar/2023/2", None).await;
    assert_eq!(body["summary"]["total_days"], 28);
    assert_eq!(body["summary"]["average_rating"], 0.0);

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/v1/calendar?start_date=2024-02-15&end_date=2024-03-31",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["start_date"], "2024-02-15");
    assert_eq!(body["end_date"], "2024-03-31");
    assert_eq!(
        body["entries"],
        json!([
            { "date": "2024-03-01", "rating": 5 },
            { "date": "2024-02-29", "rating": 4 },
        ])
    );
}

#[tokio::test]
async fn test_statistics_summary_current_month() {
    let app = app();
    let today = Utc::now().date_naive();
    let first = today.with_day(1).unwrap();
    for (offset, rating) in [(0, 3), (1, 4), (2, 5)] {
        let date = first + Duration::days(offset);
        send(
            &app,
            Method::POST,
            "/api/v1/diaries",
            Some(diary(&date.format("%Y-%m-%d").to_string(), rating)),
        )
        .await;
    }

    let (status, body) = send(&app, Method::GET, "/api/v1/statistics/summary?period=month", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["period"], "month");
    assert_eq!(body["total_entries"], 3);
    assert_eq!(body["average_rating"], 4.0);
    assert_eq!(
        body["rating_distribution"],
        json!({ "1": 0, "2": 0, "3": 1, "4": 1, "5": 1 })
    );
    assert_eq!(body["progress_distribution"], json!({ "A": 3, "B": 0, "C": 0 }));
    assert_eq!(body["longest_streak"], 3);
    assert_eq!(body["average_wake_up_time"], "06:30");
    assert_eq!(body["average_sleep_time"], "22:45");

    let (_, body) = send(&app, Method::GET, "/api/v1/statistics/summary?period=fortnight", None).await;
    assert_eq!(body["period"], "month");
}

#[tokio::test]
async fn test_trend_window() {
    let app = app();
    let today = Utc::now().date_naive();
    for (ago, rating) in [(8, 1), (7, 2), (0, 3)] {
        let date = today - Duration::days(ago);
        send(
            &app,
            Method::POST,
            "/api/v1/diaries",
            Some(diary(&date.format("%Y-%m-%d").to_string(), rating)),
        )
        .await;
    }

    let (status, body) = send(&app, Method::GET, "/api/v1/statistics/trend?days=7", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["period_days"], 7);
    let ratings: Vec<i64> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["rating"].as_i64().unwrap())
        .collect();
    assert_eq!(ratings, vec![2, 3]);

    let (_, body) = send(&app, Method::GET, "/api/v1/statistics/trend?days=-3", None).await;
    assert_eq!(body["period_days"], 30);
    assert_eq!(body["data"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_unpadded_dates_are_rejected() {
    let app = app();

    let (status, body) = send(&app, Method::POST, "/api/v1/diaries", Some(diary("2024-1-5", 3))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

    let (status, body) = send(&app, Method::GET, "/api/v1/diaries/2024-01-5", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/v1/calendar?start_date=2024-1-1&end_date=2024-01-31",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

    let (_, body) = send(&app, Method::GET, "/api/v1/diaries", None).await;
    assert!(body["diaries"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_malformed_query_uses_error_envelope() {
    let app = app();

    for uri in [
        "/api/v1/statistics/summary?period=week&period=year",
        "/api/v1/statistics/trend?days=7&days=14",
        "/api/v1/calendar?start_date=2024-01-01&start_date=2024-02-01&end_date=2024-03-01",
    ] {
        let (status, body) = send(&app, Method::GET, uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR", "{uri}");
        assert_eq!(body["error"]["status"], 400, "{uri}");
    }
}
