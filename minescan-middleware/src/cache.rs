//! Response caching keyed by requested symbol.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use minescan_core::{
    CacheConfig, HistoryProvider, Middleware, PriceConnector, PriceSeries, ResolvedSymbol,
    ResponseCache, ScanError,
};
use tokio::time::Instant;

#[derive(Clone)]
struct Entry {
    value: PriceSeries,
    expires_at: Instant,
}

/// In-memory [`ResponseCache`] bounded by entry count, with per-entry expiry.
pub struct MemoryCache {
    inner: moka::future::Cache<String, Entry>,
}

impl MemoryCache {
    /// Create a cache holding at most `capacity` symbols.
    #[must_use]
    pub fn new(capacity: u64) -> Self {
        Self {
            inner: moka::future::Cache::new(capacity.max(1)),
        }
    }
}

#[async_trait]
impl ResponseCache for MemoryCache {
    async fn get(&self, key: &str) -> Option<PriceSeries> {
        let entry = self.inner.get(key).await?;
        if Instant::now() <= entry.expires_at {
            return Some(entry.value);
        }
        self.inner.invalidate(key).await;
        None
    }

    async fn put(&self, key: String, value: PriceSeries, ttl: Duration) {
        let expires_at = Instant::now() + ttl;
        self.inner.insert(key, Entry { value, expires_at }).await;
    }
}

/// [`ResponseCache`] that stores nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopCache;

#[async_trait]
impl ResponseCache for NoopCache {
    async fn get(&self, _key: &str) -> Option<PriceSeries> {
        None
    }

    async fn put(&self, _key: String, _value: PriceSeries, _ttl: Duration) {}
}

/// Declarative wrapper that applies caching when building a connector stack.
pub struct CacheMiddleware {
    store: Arc<dyn ResponseCache>,
    ttl: Duration,
}

impl CacheMiddleware {
    /// Build from configuration, backed by a fresh [`MemoryCache`].
    #[must_use]
    pub fn new(cfg: &CacheConfig) -> Self {
        Self::with_store(Arc::new(MemoryCache::new(cfg.capacity)), cfg.ttl())
    }

    /// Build around an injected cache collaborator.
    #[must_use]
    pub fn with_store(store: Arc<dyn ResponseCache>, ttl: Duration) -> Self {
        Self { store, ttl }
    }
}

impl Middleware for CacheMiddleware {
    fn apply(self: Box<Self>, inner: Arc<dyn PriceConnector>) -> Arc<dyn PriceConnector> {
        let Self { store, ttl } = *self;
        Arc::new(CachingConnector::new(inner, store, ttl))
    }

    fn name(&self) -> &'static str {
        "CachingMiddleware"
    }

    fn config_json(&self) -> serde_json::Value {
        serde_json::json!({
            "ttl_ms": u64::try_from(self.ttl.as_millis()).unwrap_or(u64::MAX),
        })
    }
}

/// Connector wrapper that serves repeated history requests from a [`ResponseCache`].
///
/// Successful responses are stored, empty ones included, so a wrong suffix is not
/// asked for twice within the TTL. Errors are never cached.
pub struct CachingConnector {
    inner: Arc<dyn PriceConnector>,
    store: Arc<dyn ResponseCache>,
    ttl: Duration,
}

impl CachingConnector {
    /// Wrap `inner`, caching through `store` for `ttl`.
    #[must_use]
    pub fn new(
        inner: Arc<dyn PriceConnector>,
        store: Arc<dyn ResponseCache>,
        ttl: Duration,
    ) -> Self {
        Self { inner, store, ttl }
    }

    /// Access the inner connector.
    #[must_use]
    pub fn inner(&self) -> &Arc<dyn PriceConnector> {
        &self.inner
    }
}

impl PriceConnector for CachingConnector {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    fn vendor(&self) -> &'static str {
        self.inner.vendor()
    }

    fn as_history_provider(&self) -> Option<&dyn HistoryProvider> {
        self.inner
            .as_history_provider()
            .map(|_| self as &dyn HistoryProvider)
    }
}

#[async_trait]
impl HistoryProvider for CachingConnector {
    async fn daily_history(&self, symbol: &ResolvedSymbol) -> Result<PriceSeries, ScanError> {
        if self.ttl.is_zero() {
            return fetch(&self.inner, symbol).await;
        }
        if let Some(hit) = self.store.get(symbol.as_str()).await {
            #[cfg(feature = "tracing")]
            tracing::trace!(target: "minescan::cache", %symbol, "cache hit");
            return Ok(hit);
        }
        let fresh = fetch(&self.inner, symbol).await?;
        self.store
            .put(symbol.to_string(), fresh.clone(), self.ttl)
            .await;
        Ok(fresh)
    }
}

pub(crate) async fn fetch(
    inner: &Arc<dyn PriceConnector>,
    symbol: &ResolvedSymbol,
) -> Result<PriceSeries, ScanError> {
    let hp = inner
        .as_history_provider()
        .ok_or_else(|| ScanError::connector(inner.name(), "missing history capability"))?;
    hp.daily_history(symbol).await
}
