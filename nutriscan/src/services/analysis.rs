use std::time::Instant;

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::Result;
use crate::models::{
    AnalysisResult, ComponentStatus, FoodItem, NutritionHealth, NutritionReport, NutritionSource,
    RecognitionHealth, RecognitionOutput, ServiceHealth, UploadedImage,
};
use crate::nutrition::{totalize, NutritionEnricher};
use crate::recognition::{self, RecognitionProvider};

/// Photo in, nutrition report out.
///
/// Recognition failures are returned to the caller. Nutrition failures never
/// are: the enricher degrades per item to local estimates.
#[derive(Clone)]
pub struct AnalysisService {
    recognizer: RecognitionProvider,
    enricher: NutritionEnricher,
}

impl AnalysisService {
    pub fn new(recognizer: RecognitionProvider, enricher: NutritionEnricher) -> Self {
        Self {
            recognizer,
            enricher,
        }
    }

    pub fn recognition_model(&self) -> &str {
        self.recognizer.model_name()
    }

    pub fn recognition_available(&self) -> bool {
        self.recognizer.is_available()
    }

    pub fn nutrition_source(&self) -> NutritionSource {
        self.enricher.nutrition_source()
    }

    pub async fn analyze(&self, image: &UploadedImage) -> Result<AnalysisResult> {
        let analysis_id = Uuid::new_v4();
        let started = Instant::now();

        let raw_result = self.recognizer.recognize(image).await.map_err(|e| {
            warn!(%analysis_id, error = %e, "Recognition failed");
            e
        })?;
        let recognized_ms = started.elapsed().as_millis() as u64;

        let items = recognition::parse(&raw_result);
        if items.is_empty() {
            info!(%analysis_id, "No foods recognized in image");
        }

        let foods = self.enricher.enrich(items).await;
        let total_nutrition = totalize(&foods);

        info!(
            %analysis_id,
            food_count = foods.len(),
            total_calories = total_nutrition.calories,
            recognition_ms = recognized_ms,
            total_ms = started.elapsed().as_millis() as u64,
            "Analysis complete"
        );

        Ok(AnalysisResult {
            analysis_id,
            analysis_timestamp: Utc::now(),
            raw_result,
            food_count: foods.len(),
            foods,
            total_nutrition,
            nutrition_source: self.nutrition_source(),
            recognition_model: self.recognition_model().to_string(),
        })
    }

    pub async fn recognize_only(&self, image: &UploadedImage) -> Result<RecognitionOutput> {
        let raw_result = self.recognizer.recognize(image).await?;

        Ok(RecognitionOutput {
            raw_result,
            recognition_model: self.recognition_model().to_string(),
            analysis_timestamp: Utc::now(),
        })
    }

    /// Nutrition for caller-supplied items, skipping recognition.
    pub async fn lookup(&self, items: Vec<FoodItem>) -> NutritionReport {
        let foods = self.enricher.enrich(items).await;
        let total_nutrition = totalize(&foods);

        info!(
            food_count = foods.len(),
            total_calories = total_nutrition.calories,
            "Nutrition lookup complete"
        );

        NutritionReport {
            foods,
            total_nutrition,
            nutrition_source: self.nutrition_source(),
        }
    }

    pub async fn health(&self) -> ServiceHealth {
        let recognition_probe = self.recognizer.probe();
        let nutrition_probe = async {
            let Some(remote) = self.enricher.remote() else {
                return ComponentStatus::Fallback;
            };
            if remote.probe().await {
                ComponentStatus::Available
            } else {
                ComponentStatus::Unreachable
            }
        };
        let (recognition_up, nutrition_status) = tokio::join!(recognition_probe, nutrition_probe);

        ServiceHealth {
            recognition: RecognitionHealth {
                status: if recognition_up {
                    ComponentStatus::Available
                } else {
                    ComponentStatus::Unreachable
                },
                model: self.recognition_model().to_string(),
            },
            nutrition: NutritionHealth {
                status: nutrition_status,
                source: self.nutrition_source(),
            },
        }
    }
}
