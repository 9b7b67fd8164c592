//! Request pacing for rate-limited providers.
//!
//! Pacing is sequential: each call sleeps in the caller's task, so a scan that awaits
//! one lookup at a time never has two provider requests in flight.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use minescan_core::{
    HistoryProvider, Middleware, PacingConfig, PriceConnector, PriceSeries, ResolvedSymbol,
    ScanError,
};

use crate::cache::fetch;

/// Declarative wrapper that applies request pacing when building a connector stack.
pub struct PacingMiddleware {
    cfg: PacingConfig,
}

impl PacingMiddleware {
    /// Create pacing middleware from configuration.
    #[must_use]
    pub const fn new(cfg: PacingConfig) -> Self {
        Self { cfg }
    }
}

impl Middleware for PacingMiddleware {
    fn apply(self: Box<Self>, inner: Arc<dyn PriceConnector>) -> Arc<dyn PriceConnector> {
        Arc::new(PacingConnector::new(inner, self.cfg))
    }

    fn name(&self) -> &'static str {
        "PacingMiddleware"
    }

    fn config_json(&self) -> serde_json::Value {
        serde_json::json!({
            "delay_after_success_ms": self.cfg.delay_after_success_ms,
            "rate_limit_pause_ms": self.cfg.rate_limit_pause_ms,
        })
    }
}

/// Wrapper that sleeps after each provider call.
///
/// A call that returned data is followed by `delay_after_success`. A rate-limited
/// call is followed by `rate_limit_pause` before its error is surfaced. Empty
/// results and other failures return immediately.
pub struct PacingConnector {
    inner: Arc<dyn PriceConnector>,
    delay_after_success: Duration,
    rate_limit_pause: Duration,
}

impl PacingConnector {
    /// Wrap `inner` with the given pacing configuration.
    #[must_use]
    pub fn new(inner: Arc<dyn PriceConnector>, cfg: PacingConfig) -> Self {
        Self {
            inner,
            delay_after_success: cfg.delay_after_success(),
            rate_limit_pause: cfg.rate_limit_pause(),
        }
    }

    async fn pause(d: Duration) {
        if !d.is_zero() {
            tokio::time::sleep(d).await;
        }
    }
}

impl PriceConnector for PacingConnector {
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
impl HistoryProvider for PacingConnector {
    async fn daily_history(&self, symbol: &ResolvedSymbol) -> Result<PriceSeries, ScanError> {
        match fetch(&self.inner, symbol).await {
            Ok(series) => {
                if !series.is_empty() {
                    Self::pause(self.delay_after_success).await;
                }
                Ok(series)
            }
            Err(e @ ScanError::RateLimited { .. }) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(
                    target: "minescan::pacing",
                    %symbol,
                    pause_ms = u64::try_from(self.rate_limit_pause.as_millis()).unwrap_or(u64::MAX),
                    "rate limited; pausing"
                );
                Self::pause(self.rate_limit_pause).await;
                Err(e)
            }
            Err(e) => Err(e),
        }
    }
}
