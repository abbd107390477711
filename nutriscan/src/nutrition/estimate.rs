//! Local per-100g estimates for common food categories.
//!
//! Matching is case-insensitive substring matching in both directions: a key
//! matches when it occurs in the food name ("chicken" in "grilled chicken
//! breast") or when the food name occurs in the key. When several keys match,
//! the longest key wins; keys of equal length resolve in table order. An empty
//! name or a name with no match gets [`DEFAULT_PROFILE`].

use crate::models::NutrientProfile;

pub const DEFAULT_KEY: &str = "default";

pub const DEFAULT_PROFILE: NutrientProfile = NutrientProfile::new(150.0, 5.0, 5.0, 20.0, 2.0, 5.0);

pub static ESTIMATE_TABLE: &[(&str, NutrientProfile)] = &[
    // Fruit
    ("apple", NutrientProfile::new(52.0, 0.3, 0.2, 14.0, 2.4, 10.0)),
    ("banana", NutrientProfile::new(89.0, 1.1, 0.3, 23.0, 2.6, 12.0)),
    ("orange", NutrientProfile::new(47.0, 0.9, 0.1, 12.0, 2.4, 9.0)),
    // Vegetables
    ("broccoli", NutrientProfile::new(34.0, 2.8, 0.4, 7.0, 2.6, 1.5)),
    ("carrot", NutrientProfile::new(41.0, 0.9, 0.2, 10.0, 2.8, 4.7)),
    ("tomato", NutrientProfile::new(18.0, 0.9, 0.2, 3.9, 1.2, 2.6)),
    // Meat and fish
    ("chicken", NutrientProfile::new(165.0, 31.0, 3.6, 0.0, 0.0, 0.0)),
    ("beef", NutrientProfile::new(250.0, 26.0, 15.0, 0.0, 0.0, 0.0)),
    ("pork", NutrientProfile::new(242.0, 27.0, 14.0, 0.0, 0.0, 0.0)),
    ("fish", NutrientProfile::new(206.0, 22.0, 12.0, 0.0, 0.0, 0.0)),
    // Staples
    ("rice", NutrientProfile::new(130.0, 2.7, 0.3, 28.0, 0.4, 0.1)),
    ("bread", NutrientProfile::new(265.0, 9.0, 3.2, 49.0, 2.7, 5.0)),
    ("pasta", NutrientProfile::new(131.0, 5.0, 1.1, 25.0, 1.8, 0.6)),
];

/// The matched table key (or [`DEFAULT_KEY`]) and its profile.
pub fn estimate_entry(food_name: &str) -> (&'static str, NutrientProfile) {
    let name = food_name.trim().to_lowercase();
    if name.is_empty() {
        return (DEFAULT_KEY, DEFAULT_PROFILE);
    }

    let mut best: Option<(&'static str, NutrientProfile)> = None;
    for (key, profile) in ESTIMATE_TABLE {
        if !(name.contains(key) || key.contains(name.as_str())) {
            continue;
        }
        // Strictly longer only, so the earlier key keeps equal-length ties
        if best.map_or(true, |(current, _)| key.len() > current.len()) {
            best = Some((*key, *profile));
        }
    }

    best.unwrap_or((DEFAULT_KEY, DEFAULT_PROFILE))
}

/// Approximate per-100g profile for `food_name`. Never fails.
pub fn estimate(food_name: &str) -> NutrientProfile {
    estimate_entry(food_name).1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile_for(key: &str) -> NutrientProfile {
        ESTIMATE_TABLE
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, p)| *p)
            .unwrap()
    }

    #[test]
    fn test_exact_key() {
        assert_eq!(estimate("apple"), profile_for("apple"));
    }

    #[test]
    fn test_key_inside_name() {
        let profile = estimate("chicken breast");
        assert_eq!(profile.calories, 165.0);
        assert_eq!(profile.protein, 31.0);
        assert_eq!(profile.fat, 3.6);
        assert_eq!(profile.carbs, 0.0);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(estimate("Grilled BEEF Steak"), profile_for("beef"));
        assert_eq!(estimate_entry("  Brown Rice ").0, "rice");
    }

    #[test]
    fn test_name_inside_key() {
        assert_eq!(estimate_entry("carr").0, "carrot");
        assert_eq!(estimate_entry("banan").0, "banana");
    }

    #[test]
    fn test_longest_key_wins() {
        assert_eq!(estimate_entry("chicken fried rice").0, "chicken");
        assert_eq!(estimate_entry("rice with broccoli").0, "broccoli");
    }

    #[test]
    fn test_equal_length_resolves_in_table_order() {
        // "beef" and "pork" are both four letters; beef comes first
        assert_eq!(estimate_entry("pork and beef dumplings").0, "beef");
        // "apple" and "pasta" are both five letters; apple comes first
        assert_eq!(estimate_entry("pasta with apple").0, "apple");
    }

    #[test]
    fn test_unknown_food_gets_default() {
        assert_eq!(estimate_entry("quinoa"), (DEFAULT_KEY, DEFAULT_PROFILE));
    }

    #[test]
    fn test_empty_name_gets_default() {
        assert_eq!(estimate(""), DEFAULT_PROFILE);
        assert_eq!(estimate("   "), DEFAULT_PROFILE);
    }

    #[test]
    fn test_table_values_are_non_negative() {
        for (key, p) in ESTIMATE_TABLE {
            for v in [p.calories, p.protein, p.fat, p.carbs, p.fiber, p.sugar] {
                assert!(v >= 0.0, "negative value in '{key}'");
            }
        }
    }
}
