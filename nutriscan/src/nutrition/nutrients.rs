//! USDA nutrient identifiers.
//!
//! FoodData Central reports the same nutrient under different identifiers
//! depending on the data set: current ids (e.g. 1008 for energy) and the
//! legacy SR "nutrient numbers" (e.g. 208). Each logical nutrient therefore
//! maps to an ordered list of candidates; the first candidate present with a
//! non-zero amount wins.

use std::collections::HashMap;

use crate::models::NutrientProfile;

/// Energy (kcal): current, legacy, Atwater general, Atwater specific
pub const CALORIE_IDS: &[u32] = &[1008, 208, 2047, 2048];
/// Protein
pub const PROTEIN_IDS: &[u32] = &[1003, 203];
/// Total lipid (fat)
pub const FAT_IDS: &[u32] = &[1004, 204];
/// Carbohydrate, by difference
pub const CARB_IDS: &[u32] = &[1005, 205];
/// Fiber, total dietary
pub const FIBER_IDS: &[u32] = &[1079, 291];
/// Sugars: total including NLEA, legacy, total
pub const SUGAR_IDS: &[u32] = &[2000, 269, 1063];

/// First non-zero amount among `candidates`, in priority order.
pub fn resolve(amounts: &HashMap<u32, f64>, candidates: &[u32]) -> f64 {
    candidates
        .iter()
        .filter_map(|id| amounts.get(id).copied())
        .find(|amount| amount.is_finite() && *amount > 0.0)
        .unwrap_or(0.0)
}

/// Build a profile from `(nutrient id, amount per 100 g)` pairs.
///
/// Duplicate ids keep their first non-zero amount.
pub fn profile_from_amounts<I>(pairs: I) -> NutrientProfile
where
    I: IntoIterator<Item = (u32, f64)>,
{
    let mut amounts: HashMap<u32, f64> = HashMap::new();
    for (id, amount) in pairs {
        let entry = amounts.entry(id).or_insert(0.0);
        if *entry <= 0.0 {
            *entry = amount;
        }
    }

    NutrientProfile {
        calories: resolve(&amounts, CALORIE_IDS),
        protein: resolve(&amounts, PROTEIN_IDS),
        fat: resolve(&amounts, FAT_IDS),
        carbs: resolve(&amounts, CARB_IDS),
        fiber: resolve(&amounts, FIBER_IDS),
        sugar: resolve(&amounts, SUGAR_IDS),
    }
}
