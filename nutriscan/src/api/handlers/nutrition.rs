use axum::extract::State;

use crate::api::dto::{lookup_items, LookupItemRequest};
use crate::api::extractors::AppJson;
use crate::api::response::{ApiResponse, ErrorBody};
use crate::api::state::AppState;
use crate::models::NutritionReport;

/// `POST /nutrition/lookup`
///
/// Nutrition for a caller-supplied list of foods, skipping recognition.
#[utoipa::path(
    post,
    path = "/nutrition/lookup",
    tag = "nutrition",
    operation_id = "nutrition.lookup",
    request_body = Vec<LookupItemRequest>,
    responses(
        (status = 200, description = "Per-item and total nutrition", body = NutritionReport),
        (status = 400, description = "Invalid request", body = ErrorBody),
    )
)]
pub async fn lookup_nutrition(
    State(state): State<AppState>,
    AppJson(request): AppJson<Vec<LookupItemRequest>>,
) -> ApiResponse<NutritionReport> {
    let items = match lookup_items(request) {
        Ok(items) => items,
        Err(e) => return e.into(),
    };

    ApiResponse::success(state.analysis.lookup(items).await)
}
