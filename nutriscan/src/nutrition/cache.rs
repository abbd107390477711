use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use lru::LruCache;
use tracing::debug;

use super::NutrientLookup;
use crate::error::Result;
use crate::models::NutrientMatch;

/// LRU memo in front of another [`NutrientLookup`].
///
/// Keys are the lower-cased, trimmed food name. Both hits and confirmed
/// misses are remembered; errors are not, so a transient failure is retried
/// on the next request.
#[derive(Clone)]
pub struct CachedLookup {
    inner: Arc<dyn NutrientLookup>,
    cache: Arc<Mutex<LruCache<String, Option<NutrientMatch>>>>,
}

impl CachedLookup {
    pub fn new(inner: Arc<dyn NutrientLookup>, capacity: NonZeroUsize) -> Self {
        Self {
            inner,
            cache: Arc::new(Mutex::new(LruCache::new(capacity))),
        }
    }

    fn cache_key(food_name: &str) -> String {
        food_name.trim().to_lowercase()
    }

    fn get(&self, key: &str) -> Option<Option<NutrientMatch>> {
        let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        cache.get(key).cloned()
    }

    fn put(&self, key: String, value: Option<NutrientMatch>) {
        let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        cache.put(key, value);
    }

    pub fn len(&self) -> usize {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl NutrientLookup for CachedLookup {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn lookup(&self, food_name: &str) -> Result<Option<NutrientMatch>> {
        let key = Self::cache_key(food_name);
        if let Some(cached) = self.get(&key) {
            debug!(food = %key, hit = cached.is_some(), "Nutrient cache hit");
            return Ok(cached);
        }

        let result = self.inner.lookup(food_name).await?;
        self.put(key, result.clone());
        Ok(result)
    }

    async fn probe(&self) -> bool {
        self.inner.probe().await
    }
}
