use async_trait::async_trait;

use crate::{PriceSeries, ResolvedSymbol, ScanError};

/// Focused role trait for connectors that provide daily price history.
#[async_trait]
pub trait HistoryProvider: Send + Sync {
    /// Fetch the trailing one year of daily closes for `symbol`.
    ///
    /// An unknown symbol may be reported either as `Ok` with an empty series or as
    /// `ScanError::NotFound`; callers treat both the same way.
    async fn daily_history(&self, symbol: &ResolvedSymbol) -> Result<PriceSeries, ScanError>;
}

/// A market-data connector.
///
/// Capabilities are exposed through `as_*_provider` accessors so that middleware can
/// wrap a connector without knowing its concrete type.
pub trait PriceConnector: Send + Sync {
    /// Stable connector name used in logs and error messages.
    fn name(&self) -> &'static str;

    /// Data vendor behind the connector.
    fn vendor(&self) -> &'static str {
        "unknown"
    }

    /// Daily history capability, if supported.
    fn as_history_provider(&self) -> Option<&dyn HistoryProvider> {
        None
    }
}
