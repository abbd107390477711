use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::future::join_all;
use tracing::{debug, info, warn};

use super::{estimate, CachedLookup, NutrientLookup, UsdaClient};
use crate::config::NutritionConfig;
use crate::error::Result;
use crate::models::{
    round1, EnrichedFoodItem, FoodItem, NutrientProfile, NutritionSource, NutritionTotals,
    ScaledNutrition,
};

/// Scale a per-100g profile to `weight_grams`.
pub fn scale(profile: &NutrientProfile, weight_grams: f64) -> ScaledNutrition {
    profile.scale(weight_grams)
}

/// Sum the already-rounded item values; round once at the end.
pub fn totalize(items: &[EnrichedFoodItem]) -> NutritionTotals {
    let mut totals = items
        .iter()
        .fold(NutritionTotals::default(), |mut acc, item| {
            let n = &item.nutrition;
            acc.calories += n.calories;
            acc.protein += n.protein;
            acc.fat += n.fat;
            acc.carbs += n.carbs;
            acc.fiber += n.fiber;
            acc.sugar += n.sugar;
            acc.total_weight += n.weight_grams;
            acc
        });

    totals.calories = round1(totals.calories);
    totals.protein = round1(totals.protein);
    totals.fat = round1(totals.fat);
    totals.carbs = round1(totals.carbs);
    totals.fiber = round1(totals.fiber);
    totals.sugar = round1(totals.sugar);
    totals.total_weight = round1(totals.total_weight);
    totals.food_count = items.len();
    totals
}

/// Attaches nutrition facts to recognized food items.
///
/// Each item is looked up in the remote database when one is configured.
/// Anything short of a hit (a miss, an error, a timeout) degrades that single
/// item to the local estimate table; enrichment as a whole cannot fail.
#[derive(Clone)]
pub struct NutritionEnricher {
    remote: Option<Arc<dyn NutrientLookup>>,
    lookup_timeout: Duration,
}

impl NutritionEnricher {
    pub fn new(remote: Option<Arc<dyn NutrientLookup>>, lookup_timeout: Duration) -> Self {
        Self {
            remote,
            lookup_timeout,
        }
    }

    /// Estimate-only enricher, no network access.
    pub fn offline() -> Self {
        Self::new(None, Duration::from_secs(1))
    }

    pub fn from_config(config: &NutritionConfig) -> Result<Self> {
        // A lookup is a search followed by a detail fetch
        let lookup_timeout = Duration::from_secs(config.timeout_secs.saturating_mul(2));

        if config.offline {
            info!("Nutrition lookups disabled, using local estimates only");
            return Ok(Self::new(None, lookup_timeout));
        }

        let client: Arc<dyn NutrientLookup> = Arc::new(UsdaClient::new(config)?);
        let remote: Arc<dyn NutrientLookup> = match NonZeroUsize::new(config.cache_size) {
            Some(capacity) => Arc::new(CachedLookup::new(client, capacity)),
            None => client,
        };

        info!(
            base_url = %config.base_url,
            cache_size = config.cache_size,
            "USDA nutrient lookups enabled"
        );
        Ok(Self::new(Some(remote), lookup_timeout))
    }

    pub fn remote(&self) -> Option<&Arc<dyn NutrientLookup>> {
        self.remote.as_ref()
    }

    pub fn nutrition_source(&self) -> NutritionSource {
        if self.remote.is_some() {
            NutritionSource::Usda
        } else {
            NutritionSource::Estimated
        }
    }

    /// Enrich a single item. Never fails.
    pub async fn enrich_item(&self, item: FoodItem) -> EnrichedFoodItem {
        if let Some(remote) = &self.remote {
            let started = Instant::now();
            match tokio::time::timeout(self.lookup_timeout, remote.lookup(&item.name)).await {
                Ok(Ok(Some(hit))) => {
                    debug!(
                        food = %item.name,
                        fdc_id = hit.fdc_id,
                        elapsed_ms = started.elapsed().as_millis() as u64,
                        "Nutrient lookup hit"
                    );
                    return EnrichedFoodItem::authoritative(item, &hit);
                }
                Ok(Ok(None)) => {
                    debug!(food = %item.name, "No nutrient match, using estimate");
                }
                Ok(Err(e)) => {
                    warn!(food = %item.name, error = %e, "Nutrient lookup failed, using estimate");
                }
                Err(_) => {
                    warn!(
                        food = %item.name,
                        timeout_ms = self.lookup_timeout.as_millis() as u64,
                        "Nutrient lookup timed out, using estimate"
                    );
                }
            }
        }

        let (key, profile) = estimate::estimate_entry(&item.name);
        debug!(food = %item.name, estimate_key = key, "Estimated nutrition");
        EnrichedFoodItem::estimated(item, &profile)
    }

    /// Enrich every item concurrently. Output order matches input order.
    pub async fn enrich(&self, items: Vec<FoodItem>) -> Vec<EnrichedFoodItem> {
        join_all(items.into_iter().map(|item| self.enrich_item(item))).await
    }
}
