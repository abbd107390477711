use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{de::DeserializeOwned, Deserialize};
use tracing::{debug, warn};

use super::{nutrients, NutrientLookup};
use crate::{
    config::NutritionConfig,
    error::{NutriError, Result},
    models::NutrientMatch,
};

const SEARCH_DATA_TYPES: &str = "Foundation,SR Legacy";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    foods: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    #[serde(rename = "fdcId")]
    fdc_id: Option<u64>,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct FoodDetailsResponse {
    #[serde(default)]
    description: String,
    #[serde(rename = "foodNutrients", default)]
    food_nutrients: Vec<FoodNutrientEntry>,
}

/// One nutrient row. Full records nest the identifier under `nutrient` and
/// report `amount`; abridged records use flat `nutrientId` / `value`.
#[derive(Debug, Deserialize)]
struct FoodNutrientEntry {
    nutrient: Option<NutrientRef>,
    amount: Option<f64>,
    #[serde(rename = "nutrientId")]
    nutrient_id: Option<u32>,
    value: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct NutrientRef {
    id: Option<u32>,
}

impl FoodNutrientEntry {
    fn pair(&self) -> Option<(u32, f64)> {
        let id = self
            .nutrient
            .as_ref()
            .and_then(|n| n.id)
            .or(self.nutrient_id)?;
        let amount = self.amount.or(self.value)?;
        Some((id, amount))
    }
}

/// USDA FoodData Central client.
#[derive(Debug, Clone)]
pub struct UsdaClient {
    client: Client,
    base_url: String,
    api_key: String,
    page_size: u32,
}

impl UsdaClient {
    pub fn new(config: &NutritionConfig) -> Result<Self> {
        let api_key = config.api_key.clone().ok_or_else(|| {
            NutriError::Config("API key required for USDA FoodData Central".to_string())
        })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| NutriError::NutrientLookup(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
            page_size: config.page_size,
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str, query: &[(&str, &str)]) -> Result<T> {
        let response = self
            .client
            .get(url)
            .query(query)
            .query(&[("api_key", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    NutriError::NutrientLookup("Request timeout".to_string())
                } else {
                    NutriError::NutrientLookup(format!("Request failed: {e}"))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error response".to_string());
            return Err(map_http_error(status, &body));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| NutriError::NutrientLookup(format!("Failed to parse USDA response: {e}")))
    }

    async fn search(&self, query: &str) -> Result<Option<SearchHit>> {
        let url = format!("{}/foods/search", self.base_url);
        let page_size = self.page_size.to_string();

        let response: SearchResponse = self
            .get_json(
                &url,
                &[
                    ("query", query),
                    ("pageSize", page_size.as_str()),
                    ("dataType", SEARCH_DATA_TYPES),
                    ("sortBy", "dataType.keyword"),
                    ("sortOrder", "asc"),
                ],
            )
            .await?;

        Ok(response.foods.into_iter().next())
    }

    async fn details(&self, fdc_id: u64) -> Result<FoodDetailsResponse> {
        let url = format!("{}/food/{fdc_id}", self.base_url);
        self.get_json(&url, &[]).await
    }
}

fn map_http_error(status: StatusCode, body: &str) -> NutriError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => NutriError::NutrientLookup(format!(
            "Authentication failed ({status}): check USDA_API_KEY. Error: {body}"
        )),
        StatusCode::TOO_MANY_REQUESTS => NutriError::NutrientLookup(format!(
            "Rate limit exceeded (429). Error: {body}"
        )),
        _ => NutriError::NutrientLookup(format!("USDA API error ({status}): {body}")),
    }
}

#[async_trait]
impl NutrientLookup for UsdaClient {
    fn name(&self) -> &str {
        "usda"
    }

    async fn lookup(&self, food_name: &str) -> Result<Option<NutrientMatch>> {
        let query = food_name.trim();
        if query.is_empty() {
            return Ok(None);
        }

        let Some(hit) = self.search(query).await? else {
            debug!(food = query, "No USDA search results");
            return Ok(None);
        };
        let Some(fdc_id) = hit.fdc_id else {
            warn!(food = query, "First USDA search result has no fdcId");
            return Ok(None);
        };

        let details = self.details(fdc_id).await?;
        let profile = nutrients::profile_from_amounts(
            details
                .food_nutrients
                .iter()
                .filter_map(FoodNutrientEntry::pair),
        );
        let description = if details.description.is_empty() {
            hit.description
        } else {
            details.description
        };

        debug!(food = query, fdc_id, usda_name = %description, "USDA match");

        Ok(Some(NutrientMatch {
            fdc_id,
            description,
            profile,
        }))
    }

    async fn probe(&self) -> bool {
        let url = format!("{}/foods/search", self.base_url);
        match self
            .get_json::<SearchResponse>(&url, &[("query", "apple"), ("pageSize", "1")])
            .await
        {
            Ok(_) => true,
            Err(e) => {
                warn!("USDA probe failed: {}", e);
                false
            }
        }
    }
}
