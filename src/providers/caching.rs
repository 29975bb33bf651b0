use crate::core::CurrencyRateProvider;
use crate::core::cache::Cache;
use crate::store::memory::MemoryCache;
use anyhow::Result;
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// Reuses successful rates for `ttl`; failures are never cached so the next
/// session start gets a fresh attempt.
pub struct CachingCurrencyRateProvider<T: CurrencyRateProvider> {
    inner: T,
    cache: MemoryCache<String, f64>,
    ttl: Duration,
}

impl<T: CurrencyRateProvider> CachingCurrencyRateProvider<T> {
    pub fn new(inner: T, ttl: Duration) -> Self {
        Self {
            inner,
            cache: MemoryCache::new(),
            ttl,
        }
    }
}

#[async_trait]
impl<T: CurrencyRateProvider> CurrencyRateProvider for CachingCurrencyRateProvider<T> {
    async fn get_rate(&self, from: &str, to: &str) -> Result<f64> {
        let key = format!("{from}-{to}");
        if let Some(rate) = self.cache.get(&key).await {
            debug!("Cache hit for currency rate: {}", key);
            return Ok(rate);
        }
        debug!("Cache miss for currency rate: {}", key);
        let rate = self.inner.get_rate(from, to).await?;
        self.cache.put(key, rate, Some(self.ttl)).await;
        Ok(rate)
    }
}
