use std::sync::Arc;

use minescan_core::{CacheConfig, PacingConfig, PriceConnector, ScanError};
use minescan_middleware::ConnectorBuilder as GenericConnectorBuilder;

use crate::YfConnector;

/// Builder type alias specialized for yfinance connectors.
pub type YfConnectorBuilder = GenericConnectorBuilder;

impl YfConnector {
    /// Returns an unconfigured builder around the default connector.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn builder() -> Result<YfConnectorBuilder, ScanError> {
        let raw: Arc<dyn PriceConnector> = Arc::new(Self::try_new_default()?);
        Ok(GenericConnectorBuilder::new(raw))
    }

    /// Returns a builder with the response cache outside request pacing.
    ///
    /// Users can further customize before calling `.build()`.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn rate_limited(
        cache: &CacheConfig,
        pacing: &PacingConfig,
    ) -> Result<YfConnectorBuilder, ScanError> {
        Ok(Self::builder()?.with_pacing(pacing).with_cache(cache))
    }
}
