//! Builder for composing connectors with middleware layers.
//!
//! # Middleware Ordering Convention
//!
//! Middleware layers form an "onion" around the raw connector:
//!
//! ```text
//! Scanner lookup
//!     ↓
//! Cache (answers repeated symbols without touching the provider)
//!     ↓
//! Pacing (sleeps after real provider calls only)
//!     ↓
//! Raw Connector (e.g., Yahoo Finance)
//! ```
//!
//! The `layers` vector stores middleware in **outermost-first** order and is applied
//! in reverse during `build()`. [`ConnectorBuilder::with_cache`] always inserts at the
//! front and [`ConnectorBuilder::with_pacing`] always appends, so the result is
//! `Cache(Pacing(Raw))` regardless of call order.

use std::sync::Arc;
use std::time::Duration;

use minescan_core::{CacheConfig, Middleware, PacingConfig, PriceConnector, ResponseCache};
use serde_json::json;

use crate::cache::CacheMiddleware;
use crate::pacing::PacingMiddleware;

const CACHE: &str = "CachingMiddleware";
const PACING: &str = "PacingMiddleware";

/// Generic middleware builder for composing a connector with layered wrappers.
///
/// See [module-level documentation](self) for details on middleware ordering.
pub struct ConnectorBuilder {
    raw: Arc<dyn PriceConnector>,
    /// Middleware layers in outermost-first order.
    layers: Vec<Box<dyn Middleware>>,
}

impl ConnectorBuilder {
    /// Create a new builder from a raw, unwrapped connector.
    #[must_use]
    pub fn new(raw: Arc<dyn PriceConnector>) -> Self {
        Self {
            raw,
            layers: Vec::new(),
        }
    }

    /// Add or replace the response cache, backed by an in-memory store.
    ///
    /// A zero TTL removes the cache layer instead.
    #[must_use]
    pub fn with_cache(self, cfg: &CacheConfig) -> Self {
        if !cfg.enabled() {
            return self.without_cache();
        }
        self.insert_cache(CacheMiddleware::new(cfg))
    }

    /// Add or replace the response cache with an injected store.
    #[must_use]
    pub fn with_cache_store(self, store: Arc<dyn ResponseCache>, ttl: Duration) -> Self {
        self.insert_cache(CacheMiddleware::with_store(store, ttl))
    }

    fn insert_cache(mut self, mw: CacheMiddleware) -> Self {
        self.layers.retain(|m| m.name() != CACHE);
        self.layers.insert(0, Box::new(mw));
        self
    }

    /// Remove the cache layer if present.
    #[must_use]
    pub fn without_cache(mut self) -> Self {
        self.layers.retain(|m| m.name() != CACHE);
        self
    }

    /// Add or replace request pacing at the innermost position.
    #[must_use]
    pub fn with_pacing(mut self, cfg: &PacingConfig) -> Self {
        self.layers.retain(|m| m.name() != PACING);
        self.layers.push(Box::new(PacingMiddleware::new(cfg.clone())));
        self
    }

    /// Remove pacing if present.
    #[must_use]
    pub fn without_pacing(mut self) -> Self {
        self.layers.retain(|m| m.name() != PACING);
        self
    }

    /// Describe the stack, outermost first, with the raw connector last.
    #[must_use]
    pub fn describe(&self) -> Vec<(String, serde_json::Value)> {
        let mut out: Vec<(String, serde_json::Value)> = self
            .layers
            .iter()
            .map(|l| (l.name().to_string(), l.config_json()))
            .collect();
        out.push((
            "RawConnector".to_string(),
            json!({ "name": self.raw.name() }),
        ));
        out
    }

    /// Build the wrapped connector.
    ///
    /// Layers are applied innermost first, so `[Cache, Pacing]` yields
    /// `Cache(Pacing(Raw))`.
    #[must_use]
    pub fn build(self) -> Arc<dyn PriceConnector> {
        let mut acc: Arc<dyn PriceConnector> = Arc::clone(&self.raw);
        for m in self.layers.into_iter().rev() {
            acc = m.apply(acc);
        }
        acc
    }
}
