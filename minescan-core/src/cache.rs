//! Cache collaborator contract used by the caching middleware.

use std::time::Duration;

use async_trait::async_trait;

use crate::PriceSeries;

/// Session-scoped store for provider responses, keyed by requested symbol.
///
/// Implementations decide how expiry is enforced; `get` must never return an entry
/// older than the TTL it was stored with.
#[async_trait]
pub trait ResponseCache: Send + Sync {
    /// Look up a live entry.
    async fn get(&self, key: &str) -> Option<PriceSeries>;

    /// Store `value` under `key` for `ttl`.
    async fn put(&self, key: String, value: PriceSeries, ttl: Duration);
}
