//! Mock connectors for CI-safe tests.
#![warn(missing_docs)]

use async_trait::async_trait;
use minescan_core::{HistoryProvider, PriceConnector, PriceSeries, ResolvedSymbol, ScanError};

mod dynamic;
mod fixtures;

pub use dynamic::{DynamicMockConnector, DynamicMockController, MockBehavior};
pub use fixtures::history::SYMBOLS as FIXTURE_SYMBOLS;

/// Mock connector for CI-safe tests. Provides deterministic data from static fixtures.
pub struct MockConnector;

impl Default for MockConnector {
    fn default() -> Self {
        Self::new()
    }
}

impl MockConnector {
    /// Connector name reported in logs and errors.
    pub const NAME: &'static str = "minescan-mock";

    /// Create the fixture-backed connector.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn maybe_fail(symbol: &str) -> Result<(), ScanError> {
        if symbol.starts_with("RATELIMIT") {
            return Err(ScanError::rate_limited(
                Self::NAME,
                format!("history for {symbol}"),
            ));
        }
        if symbol.starts_with("FAIL") {
            return Err(ScanError::connector(
                Self::NAME,
                format!("forced failure: history for {symbol}"),
            ));
        }
        Ok(())
    }
}

impl PriceConnector for MockConnector {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn vendor(&self) -> &'static str {
        "Mock"
    }

    fn as_history_provider(&self) -> Option<&dyn HistoryProvider> {
        Some(self as &dyn HistoryProvider)
    }
}

#[async_trait]
impl HistoryProvider for MockConnector {
    async fn daily_history(&self, symbol: &ResolvedSymbol) -> Result<PriceSeries, ScanError> {
        let s = symbol.as_str();
        Self::maybe_fail(s)?;
        fixtures::history::by_symbol(s)
            .ok_or_else(|| ScanError::not_found(format!("history for {s}")))
    }
}
