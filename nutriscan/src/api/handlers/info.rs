use axum::extract::State;

use crate::api::dto::{HealthData, ServiceInfo};
use crate::api::response::ApiResponse;
use crate::api::state::AppState;
use crate::models::ComponentStatus;

/// `GET /`
#[utoipa::path(
    get,
    path = "/",
    tag = "health",
    operation_id = "service.info",
    responses(
        (status = 200, description = "Service name, version and configured collaborators", body = ServiceInfo),
    )
)]
pub async fn service_info(State(state): State<AppState>) -> ApiResponse<ServiceInfo> {
    ApiResponse::success(ServiceInfo {
        name: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        status: "running".to_string(),
        recognition_model: state.analysis.recognition_model().to_string(),
        nutrition_source: state.analysis.nutrition_source(),
    })
}

/// `GET /health`
///
/// Probes both collaborators. The endpoint itself always answers 200; a
/// `degraded` status means recognition is unreachable or the nutrient
/// database is down.
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    operation_id = "service.health",
    responses(
        (status = 200, description = "Service health status", body = HealthData),
    )
)]
pub async fn health_check(State(state): State<AppState>) -> ApiResponse<HealthData> {
    let health = state.analysis.health().await;

    let degraded = health.recognition.status == ComponentStatus::Unreachable
        || health.nutrition.status == ComponentStatus::Unreachable;

    ApiResponse::success(HealthData {
        status: if degraded { "degraded" } else { "ok" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        recognition: health.recognition,
        nutrition: health.nutrition,
    })
}

/// Fallback for unknown routes, so they answer with the standard envelope.
pub async fn not_found(uri: axum::http::Uri) -> ApiResponse<()> {
    crate::error::NutriError::NotFound(format!("No route for {}", uri.path())).into()
}
