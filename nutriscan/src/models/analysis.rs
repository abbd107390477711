use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{EnrichedFoodItem, NutritionSource, NutritionTotals};

/// Full outcome of analysing one photo.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct AnalysisResult {
    #[schema(value_type = String)]
    pub analysis_id: Uuid,
    #[schema(value_type = String)]
    pub analysis_timestamp: DateTime<Utc>,
    /// Unmodified model output, kept for debugging recognition quality.
    pub raw_result: String,
    pub foods: Vec<EnrichedFoodItem>,
    pub food_count: usize,
    pub total_nutrition: NutritionTotals,
    pub nutrition_source: NutritionSource,
    pub recognition_model: String,
}

/// Nutrition for a caller-supplied list of foods, no recognition involved.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct NutritionReport {
    pub foods: Vec<EnrichedFoodItem>,
    pub total_nutrition: NutritionTotals,
    pub nutrition_source: NutritionSource,
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct RecognitionOutput {
    pub raw_result: String,
    pub recognition_model: String,
    #[schema(value_type = String)]
    pub analysis_timestamp: DateTime<Utc>,
}

/// Reachability of a collaborator as reported by `/health`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ComponentStatus {
    Available,
    Unreachable,
    /// No remote database configured; local estimates are served
    Fallback,
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct RecognitionHealth {
    pub status: ComponentStatus,
    pub model: String,
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct NutritionHealth {
    pub status: ComponentStatus,
    pub source: NutritionSource,
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct ServiceHealth {
    pub recognition: RecognitionHealth,
    pub nutrition: NutritionHealth,
}
