use serde::Serialize;

pub const DEFAULT_WEIGHT_GRAMS: f64 = 100.0;
pub const DEFAULT_CONFIDENCE: f64 = 0.8;
pub const DEFAULT_METHOD: &str = "unknown";

/// A recognized food candidate.
///
/// Built through [`FoodItem::new`], which enforces `weight_grams >= 0` and
/// `confidence` in `[0, 1]`. Non-finite inputs take the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, utoipa::ToSchema)]
pub struct FoodItem {
    pub name: String,
    #[serde(rename = "estimated_weight_grams")]
    pub weight_grams: f64,
    pub confidence: f64,
    pub method: String,
}

impl FoodItem {
    pub fn new(
        name: impl Into<String>,
        weight_grams: f64,
        confidence: f64,
        method: impl Into<String>,
    ) -> Self {
        let weight_grams = if weight_grams.is_finite() {
            weight_grams.max(0.0)
        } else {
            DEFAULT_WEIGHT_GRAMS
        };
        let confidence = if confidence.is_finite() {
            confidence.clamp(0.0, 1.0)
        } else {
            DEFAULT_CONFIDENCE
        };

        Self {
            name: name.into().trim().to_string(),
            weight_grams,
            confidence,
            method: method.into(),
        }
    }

    /// A record recovered from loosely structured text: only the name and
    /// weight are known.
    pub fn named(name: impl Into<String>, weight_grams: f64) -> Self {
        Self::new(name, weight_grams, DEFAULT_CONFIDENCE, DEFAULT_METHOD)
    }
}
