use axum::extract::DefaultBodyLimit;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::{handlers, openapi, AppState};

/// Headroom for multipart boundaries and part headers on top of the file.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let body_limit = state
        .config
        .server
        .max_upload_size
        .saturating_add(MULTIPART_OVERHEAD);

    Router::new()
        .route("/", get(handlers::info::service_info))
        .route("/health", get(handlers::info::health_check))
        .route("/analyze", post(handlers::analysis::analyze_image))
        .route(
            "/analyze/recognition-only",
            post(handlers::analysis::recognition_only),
        )
        .route(
            "/nutrition/lookup",
            post(handlers::nutrition::lookup_nutrition),
        )
        .route("/openapi.json", get(openapi::openapi_json))
        .merge(openapi::redoc_router())
        .fallback(handlers::info::not_found)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
