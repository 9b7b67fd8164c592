//! minescan-yfinance
//!
//! Connector that implements `PriceConnector` on top of the `yfinance-rs` client
//! library. Only daily history is exposed; the scanner needs nothing else.
#![warn(missing_docs)]

/// Adapter definitions and the production adapter backed by `yfinance-rs`.
pub mod adapter;
mod builder;

use std::sync::Arc;

use adapter::{RealAdapter, YfHistory};
use async_trait::async_trait;
use minescan_core::{
    HistoryProvider, Interval, PriceConnector, PriceSeries, Range, ResolvedSymbol, ScanError,
};

pub use builder::YfConnectorBuilder;

pub(crate) const NAME: &str = "minescan-yfinance";

/// Public connector type. Production users construct it through [`YfConnector::rate_limited`].
pub struct YfConnector {
    history: Arc<dyn YfHistory>,
}

impl YfConnector {
    fn looks_like_not_found(msg: &str) -> bool {
        let m = msg.to_ascii_lowercase();
        m.contains("not found") || m.contains("no data") || m.contains("delisted")
    }

    fn looks_like_rate_limit(msg: &str) -> bool {
        let m = msg.to_ascii_lowercase();
        m.contains("too many requests") || m.contains("rate limit") || m.contains("429")
    }

    fn normalize_error(e: ScanError, what: &str) -> ScanError {
        match e {
            ScanError::Connector { msg, .. } | ScanError::Other(msg) => {
                if Self::looks_like_not_found(&msg) {
                    ScanError::not_found(what.to_string())
                } else if Self::looks_like_rate_limit(&msg) {
                    ScanError::rate_limited(NAME, what)
                } else {
                    ScanError::connector(NAME, msg)
                }
            }
            other => other,
        }
    }

    /// Build with a fresh `yfinance_rs::YfClient` inside.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn try_new_default() -> Result<Self, ScanError> {
        Ok(Self::from_real(RealAdapter::try_new_default()?))
    }

    /// Build from an existing `yfinance_rs::YfClient`.
    #[must_use]
    pub fn new_with_client(client: yfinance_rs::YfClient) -> Self {
        Self::from_real(RealAdapter::new(client))
    }

    /// Build from a provided `reqwest::Client`.
    ///
    /// # Errors
    /// Returns an error if the internal `YfClient` cannot be constructed.
    pub fn try_new_with_reqwest_client(http: reqwest::Client) -> Result<Self, ScanError> {
        Ok(Self::from_real(RealAdapter::try_with_http(http)?))
    }

    fn from_real(a: RealAdapter) -> Self {
        Self {
            history: Arc::new(a),
        }
    }

    /// For tests/injection (requires the `test-adapters` feature).
    #[cfg(feature = "test-adapters")]
    #[must_use]
    pub fn from_adapter(history: Arc<dyn YfHistory>) -> Self {
        Self { history }
    }

    fn one_year_daily() -> yfinance_rs::core::services::HistoryRequest {
        yfinance_rs::core::services::HistoryRequest {
            range: Some(Range::Y1),
            period: None,
            interval: Interval::D1,
            include_prepost: false,
            include_actions: false,
            auto_adjust: true,
            keepna: false,
        }
    }
}

impl PriceConnector for YfConnector {
    fn name(&self) -> &'static str {
        NAME
    }

    fn vendor(&self) -> &'static str {
        "Yahoo Finance"
    }

    fn as_history_provider(&self) -> Option<&dyn HistoryProvider> {
        Some(self as &dyn HistoryProvider)
    }
}

#[async_trait]
impl HistoryProvider for YfConnector {
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "minescan_yfinance::daily_history",
            skip(self),
            fields(symbol = %symbol),
        )
    )]
    async fn daily_history(&self, symbol: &ResolvedSymbol) -> Result<PriceSeries, ScanError> {
        let what = format!("history for {symbol}");
        let raw = self
            .history
            .fetch_full(symbol.as_str(), Self::one_year_daily())
            .await
            .map_err(|e| Self::normalize_error(e, &what))?;
        #[cfg(feature = "tracing")]
        tracing::debug!(candles = raw.candles.len(), "received history");
        Ok(PriceSeries::from_history(&raw))
    }
}
