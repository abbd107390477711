use serde::{Deserialize, Serialize};

use super::FoodItem;

/// Round to one decimal place, the display precision for every nutrient value.
pub fn round1(value: f64) -> f64 {
    let rounded = (value * 10.0).round() / 10.0;
    // Avoid serializing "-0.0"
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Nutrient amounts per 100 grams of food.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, utoipa::ToSchema)]
pub struct NutrientProfile {
    pub calories: f64,
    pub protein: f64,
    pub fat: f64,
    pub carbs: f64,
    pub fiber: f64,
    pub sugar: f64,
}

impl NutrientProfile {
    pub const fn new(
        calories: f64,
        protein: f64,
        fat: f64,
        carbs: f64,
        fiber: f64,
        sugar: f64,
    ) -> Self {
        Self {
            calories,
            protein,
            fat,
            carbs,
            fiber,
            sugar,
        }
    }

    /// Scale the per-100g profile linearly to `weight_grams`.
    pub fn scale(&self, weight_grams: f64) -> ScaledNutrition {
        let weight_grams = weight_grams.max(0.0);
        let multiplier = weight_grams / 100.0;

        ScaledNutrition {
            calories: round1(self.calories * multiplier),
            protein: round1(self.protein * multiplier),
            fat: round1(self.fat * multiplier),
            carbs: round1(self.carbs * multiplier),
            fiber: round1(self.fiber * multiplier),
            sugar: round1(self.sugar * multiplier),
            weight_grams,
            usda_name: None,
            fdc_id: None,
        }
    }
}

/// Where a nutrient profile came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    /// USDA FoodData Central
    Authoritative,
    /// Local estimate table
    Estimated,
}

impl std::fmt::Display for Provenance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Authoritative => write!(f, "authoritative"),
            Self::Estimated => write!(f, "estimated"),
        }
    }
}

/// Which database backs the nutrition figures of a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub enum NutritionSource {
    #[serde(rename = "USDA")]
    Usda,
    Estimated,
}

impl std::fmt::Display for NutritionSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Usda => write!(f, "USDA"),
            Self::Estimated => write!(f, "Estimated"),
        }
    }
}

/// A hit in the remote nutrient database.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutrientMatch {
    pub fdc_id: u64,
    pub description: String,
    pub profile: NutrientProfile,
}

/// Nutrient values for an actual portion, rounded for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ScaledNutrition {
    pub calories: f64,
    pub protein: f64,
    pub fat: f64,
    pub carbs: f64,
    pub fiber: f64,
    pub sugar: f64,
    pub weight_grams: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usda_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fdc_id: Option<u64>,
}

/// A food item paired with its scaled nutrition.
#[derive(Debug, Clone, PartialEq, Serialize, utoipa::ToSchema)]
pub struct EnrichedFoodItem {
    #[serde(flatten)]
    pub food: FoodItem,
    pub nutrition: ScaledNutrition,
    pub provenance: Provenance,
    /// Same as `provenance == authoritative`, kept for older clients.
    pub usda_source: bool,
}

impl EnrichedFoodItem {
    pub fn authoritative(food: FoodItem, hit: &NutrientMatch) -> Self {
        let mut nutrition = hit.profile.scale(food.weight_grams);
        nutrition.usda_name = Some(hit.description.clone());
        nutrition.fdc_id = Some(hit.fdc_id);

        Self {
            food,
            nutrition,
            provenance: Provenance::Authoritative,
            usda_source: true,
        }
    }

    pub fn estimated(food: FoodItem, profile: &NutrientProfile) -> Self {
        let nutrition = profile.scale(food.weight_grams);

        Self {
            food,
            nutrition,
            provenance: Provenance::Estimated,
            usda_source: false,
        }
    }
}

/// Sum of every item in one request.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, utoipa::ToSchema)]
pub struct NutritionTotals {
    pub calories: f64,
    pub protein: f64,
    pub fat: f64,
    pub carbs: f64,
    pub fiber: f64,
    pub sugar: f64,
    pub total_weight: f64,
    pub food_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHICKEN: NutrientProfile = NutrientProfile::new(165.0, 31.0, 3.6, 0.0, 0.0, 0.0);

    #[test]
    fn test_round1() {
        assert_eq!(round1(1.25), 1.3);
        assert_eq!(round1(1.24), 1.2);
        assert_eq!(round1(0.04), 0.0);
        assert_eq!(round1(-0.04), 0.0);
        assert!(round1(-0.04).is_sign_positive());
    }

    #[test]
    fn test_scale_is_linear() {
        let scaled = CHICKEN.scale(150.0);
        assert_eq!(scaled.calories, 247.5);
        assert_eq!(scaled.protein, 46.5);
        assert_eq!(scaled.fat, 5.4);
        assert_eq!(scaled.carbs, 0.0);
        assert_eq!(scaled.weight_grams, 150.0);
    }

    #[test]
    fn test_scale_matches_formula_for_many_weights() {
        let profile = NutrientProfile::new(52.0, 0.3, 0.2, 14.0, 2.4, 10.0);
        for weight in [0.0, 1.0, 33.3, 100.0, 150.0, 275.5, 1000.0] {
            let scaled = profile.scale(weight);
            let m = weight / 100.0;
            assert_eq!(scaled.calories, round1(52.0 * m));
            assert_eq!(scaled.protein, round1(0.3 * m));
            assert_eq!(scaled.fat, round1(0.2 * m));
            assert_eq!(scaled.carbs, round1(14.0 * m));
            assert_eq!(scaled.fiber, round1(2.4 * m));
            assert_eq!(scaled.sugar, round1(10.0 * m));
        }
    }

    #[test]
    fn test_scale_zero_weight() {
        let scaled = CHICKEN.scale(0.0);
        assert_eq!(scaled.calories, 0.0);
        assert_eq!(scaled.protein, 0.0);
    }

    #[test]
    fn test_nutrition_source_wire_format() {
        assert_eq!(serde_json::to_value(NutritionSource::Usda).unwrap(), "USDA");
        assert_eq!(
            serde_json::to_value(NutritionSource::Estimated).unwrap(),
            "Estimated"
        );
        assert_eq!(NutritionSource::Usda.to_string(), "USDA");
    }

    #[test]
    fn test_authoritative_carries_usda_fields() {
        let hit = NutrientMatch {
            fdc_id: 171_477,
            description: "Chicken, breast, meat only, cooked, roasted".to_string(),
            profile: CHICKEN,
        };
        let item = EnrichedFoodItem::authoritative(FoodItem::named("chicken breast", 100.0), &hit);
        assert!(item.usda_source);
        assert_eq!(item.provenance, Provenance::Authoritative);
        assert_eq!(item.nutrition.fdc_id, Some(171_477));

        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["name"], "chicken breast");
        assert_eq!(json["provenance"], "authoritative");
        assert_eq!(json["nutrition"]["usda_name"], hit.description);
    }

    #[test]
    fn test_estimated_omits_usda_fields() {
        let item = EnrichedFoodItem::estimated(FoodItem::named("chicken", 200.0), &CHICKEN);
        assert!(!item.usda_source);

        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["provenance"], "estimated");
        assert_eq!(json["nutrition"]["calories"], 330.0);
        assert!(json["nutrition"].get("fdc_id").is_none());
    }
}
