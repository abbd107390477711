//! Nutrition lookup and enrichment
//!
//! Per-100g nutrient profiles come from two sources:
//! - `UsdaClient`: USDA FoodData Central, authoritative
//! - `estimate`: a static table of coarse food categories, used whenever the
//!   remote lookup is disabled, misses, fails or times out
//!
//! `NutritionEnricher` combines them, scales each profile to the portion
//! weight and totals the batch. The remote side is injected as an
//! `Arc<dyn NutrientLookup>` so it can be replaced in tests.

mod cache;
mod enrichment;
pub mod estimate;
mod lookup;
pub mod nutrients;
mod usda;

pub use cache::CachedLookup;
pub use enrichment::{scale, totalize, NutritionEnricher};
pub use lookup::NutrientLookup;
pub use usda::UsdaClient;
