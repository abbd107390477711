//! Wire types that exist only at the HTTP boundary.
//!
//! Domain results (`AnalysisResult`, `NutritionReport`, ...) are serialized
//! as they are; this module holds the request shapes and the service
//! metadata payloads.

use serde::{Deserialize, Serialize};

use crate::error::{NutriError, Result};
use crate::models::{
    FoodItem, NutritionHealth, NutritionSource, RecognitionHealth, DEFAULT_CONFIDENCE,
    DEFAULT_METHOD,
};

/// Upper bound on items accepted by one `POST /nutrition/lookup`.
pub const MAX_LOOKUP_ITEMS: usize = 50;

/// `GET /` payload.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct ServiceInfo {
    pub name: String,
    pub version: String,
    pub status: String,
    pub recognition_model: String,
    pub nutrition_source: NutritionSource,
}

/// `GET /health` payload.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct HealthData {
    pub status: String,
    pub version: String,
    pub recognition: RecognitionHealth,
    pub nutrition: NutritionHealth,
}

/// One element of the `POST /nutrition/lookup` array.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct LookupItemRequest {
    #[serde(alias = "en_name")]
    pub name: String,
    #[serde(alias = "estimated_weight_grams")]
    pub weight_grams: f64,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub method: Option<String>,
}

impl LookupItemRequest {
    pub fn into_food_item(self, index: usize) -> Result<FoodItem> {
        if !self.weight_grams.is_finite() || self.weight_grams < 0.0 {
            return Err(NutriError::Validation(format!(
                "items[{index}]: weight_grams must be a non-negative number"
            )));
        }

        Ok(FoodItem::new(
            self.name,
            self.weight_grams,
            self.confidence.unwrap_or(DEFAULT_CONFIDENCE),
            self.method.unwrap_or_else(|| DEFAULT_METHOD.to_string()),
        ))
    }
}

/// Validates a lookup request and converts it to domain items.
pub fn lookup_items(request: Vec<LookupItemRequest>) -> Result<Vec<FoodItem>> {
    if request.len() > MAX_LOOKUP_ITEMS {
        return Err(NutriError::Validation(format!(
            "At most {MAX_LOOKUP_ITEMS} items can be looked up at once, got {}",
            request.len()
        )));
    }

    request
        .into_iter()
        .enumerate()
        .map(|(index, item)| item.into_food_item(index))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, weight_grams: f64) -> LookupItemRequest {
        LookupItemRequest {
            name: name.to_string(),
            weight_grams,
            confidence: None,
            method: None,
        }
    }

    #[test]
    fn test_lookup_request_accepts_both_key_styles() {
        let request: Vec<LookupItemRequest> = serde_json::from_str(
            r#"[{"name":"apple","weight_grams":150},{"en_name":"rice","estimated_weight_grams":200,"confidence":0.6,"method":"steamed"}]"#,
        )
        .unwrap();

        let items = lookup_items(request).unwrap();
        assert_eq!(items[0], FoodItem::new("apple", 150.0, DEFAULT_CONFIDENCE, DEFAULT_METHOD));
        assert_eq!(items[1], FoodItem::new("rice", 200.0, 0.6, "steamed"));
    }

    #[test]
    fn test_negative_weight_is_rejected() {
        let err = lookup_items(vec![item("apple", 100.0), item("pear", -1.0)]).unwrap_err();
        match err {
            NutriError::Validation(msg) => assert!(msg.starts_with("items[1]")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_non_finite_weight_is_rejected() {
        assert!(lookup_items(vec![item("apple", f64::NAN)]).is_err());
        assert!(lookup_items(vec![item("apple", f64::INFINITY)]).is_err());
    }

    #[test]
    fn test_item_limit() {
        let at_limit: Vec<_> = (0..MAX_LOOKUP_ITEMS).map(|_| item("apple", 1.0)).collect();
        assert_eq!(lookup_items(at_limit).unwrap().len(), MAX_LOOKUP_ITEMS);

        let over: Vec<_> = (0..=MAX_LOOKUP_ITEMS).map(|_| item("apple", 1.0)).collect();
        assert!(matches!(lookup_items(over), Err(NutriError::Validation(_))));
    }

    #[test]
    fn test_empty_request_is_fine() {
        assert!(lookup_items(Vec::new()).unwrap().is_empty());
    }
}
