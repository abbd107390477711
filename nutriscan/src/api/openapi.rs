use axum::Json;
use utoipa::OpenApi;
use utoipa_redoc::{Redoc, Servable};

use super::dto;
use super::handlers;
use super::response;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "NutriScan API",
        version = "1.0.0",
        description = "Food photo recognition with per-item nutrition from USDA FoodData Central, falling back to local estimates.",
    ),
    paths(
        handlers::info::service_info,
        handlers::info::health_check,
        handlers::analysis::analyze_image,
        handlers::analysis::recognition_only,
        handlers::nutrition::lookup_nutrition,
    ),
    components(schemas(
        // Response envelope
        response::ErrorCode,
        response::ApiError,
        response::ErrorBody,
        // Service metadata
        dto::ServiceInfo,
        dto::HealthData,
        models::ComponentStatus,
        models::RecognitionHealth,
        models::NutritionHealth,
        // Analysis
        models::AnalysisResult,
        models::RecognitionOutput,
        models::FoodItem,
        models::EnrichedFoodItem,
        models::ScaledNutrition,
        models::NutritionTotals,
        models::Provenance,
        models::NutritionSource,
        // Lookup
        dto::LookupItemRequest,
        models::NutritionReport,
    )),
    tags(
        (name = "health", description = "Service info and health"),
        (name = "analysis", description = "Food photo analysis"),
        (name = "nutrition", description = "Nutrition lookup for known foods"),
    )
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn redoc_router<S: Clone + Send + Sync + 'static>() -> axum::Router<S> {
    Redoc::with_url("/docs", ApiDoc::openapi()).into()
}
