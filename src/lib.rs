use axum::{
    http::{header, HeaderValue, Method},
    middleware,
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod auth;
pub mod config;
pub mod db;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;
pub mod store;

use config::Config;
use services::DiaryService;
use store::DiaryStore;

#[derive(Clone)]
pub struct AppState {
    pub diaries: DiaryService,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(store: Arc<dyn DiaryStore>, config: Config) -> Self {
        Self {
            diaries: DiaryService::new(store),
            config: Arc::new(config),
        }
    }
}

fn cors_layer(config: &Config) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = std::iter::once(&config.frontend_url)
        .chain(config.cors_extra_origins.iter())
        .filter_map(|o| match o.parse::<HeaderValue>() {
            Ok(hv) => Some(hv),
            Err(_) => {
                tracing::warn!(origin = %o, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
}

pub fn build_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/readyz", get(handlers::health::readyz));

    let api_routes = Router::new()
        // Diaries
        .route(
            "/api/v1/diaries",
            get(handlers::diaries::list_diaries).post(handlers::diaries::create_diary),
        )
        .route(
            "/api/v1/diaries/:date",
            get(handlers::diaries::get_diary)
                .put(handlers::diaries::update_diary)
                .delete(handlers::diaries::delete_diary),
        )
        // Calendar
        .route("/api/v1/calendar", get(handlers::calendar::get_range))
        .route(
            "/api/v1/calendar/:year/:month",
            get(handlers::calendar::get_month),
        )
        // Statistics
        .route(
            "/api/v1/statistics/summary",
            get(handlers::statistics::get_summary),
        )
        .route(
            "/api/v1/statistics/trend",
            get(handlers::statistics::get_trend),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::middleware::resolve_user,
        ));

    let cors = cors_layer(&state.config);

    Router::new()
        .merge(public_routes)
        .merge(api_routes)
        .layer(cors)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
