use async_trait::async_trait;

use crate::error::Result;
use crate::models::NutrientMatch;

/// A remote nutrient database.
///
/// `Ok(None)` means the database has no usable entry for the name; `Err` is
/// reserved for transport and protocol failures. Callers treat both as a
/// miss and fall back to the local estimate.
#[async_trait]
pub trait NutrientLookup: Send + Sync {
    /// Short label for logs and the health endpoint.
    fn name(&self) -> &str;

    async fn lookup(&self, food_name: &str) -> Result<Option<NutrientMatch>>;

    /// Whether the database currently answers requests.
    async fn probe(&self) -> bool;
}
