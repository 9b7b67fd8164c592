#[cfg(feature = "test-adapters")]
use std::sync::Arc;

use async_trait::async_trait;
use minescan_core::ScanError;
use yf::core::HistoryService;
use yfinance_rs as yf;

/// History abstraction (so we can inject mocks in tests).
#[async_trait]
pub trait YfHistory: Send + Sync {
    /// Fetch full history for a symbol using a provider-specific request.
    async fn fetch_full(
        &self,
        symbol: &str,
        req: yf::core::services::HistoryRequest,
    ) -> Result<yf::HistoryResponse, ScanError>;
}

/// Real adapter backed by a single `YfClient` instance.
/// `YfClient` is `Clone + Send + Sync`, so no external locking is needed.
#[derive(Clone)]
pub struct RealAdapter {
    client: yf::YfClient,
}

pub(crate) const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36";

impl RealAdapter {
    /// Build a `YfClient` with a cookie store and a browser user agent.
    ///
    /// # Errors
    /// Returns `ScanError::Connector` if the HTTP client cannot be constructed.
    pub fn try_new_default() -> Result<Self, ScanError> {
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .map_err(|e| ScanError::connector(crate::NAME, e.to_string()))?;
        Self::try_with_http(http)
    }

    /// Build around a caller-provided HTTP client.
    ///
    /// The client should enable a cookie store for the crumb flow.
    ///
    /// # Errors
    /// Returns `ScanError::Connector` if the `YfClient` cannot be constructed.
    pub fn try_with_http(http: reqwest::Client) -> Result<Self, ScanError> {
        let client = yf::YfClient::builder()
            .custom_client(http)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ScanError::connector(crate::NAME, e.to_string()))?;
        Ok(Self { client })
    }

    /// Wrap an existing `YfClient`.
    #[must_use]
    pub const fn new(client: yf::YfClient) -> Self {
        Self { client }
    }
}

fn map_yf_err(e: &yf::YfError, context: &str) -> ScanError {
    match e {
        yf::YfError::NotFound { .. } => ScanError::not_found(context.to_string()),
        yf::YfError::RateLimited { .. } => ScanError::rate_limited(crate::NAME, context),
        yf::YfError::ServerError { status, .. } => {
            ScanError::connector(crate::NAME, format!("server error {status}: {context}"))
        }
        yf::YfError::Status { status, .. } => {
            ScanError::connector(crate::NAME, format!("status {status}: {context}"))
        }
        other => ScanError::connector(crate::NAME, other.to_string()),
    }
}

#[async_trait]
impl YfHistory for RealAdapter {
    async fn fetch_full(
        &self,
        symbol: &str,
        req: yf::core::services::HistoryRequest,
    ) -> Result<yf::HistoryResponse, ScanError> {
        self.client
            .fetch_full_history(symbol, req)
            .await
            .map_err(|e| map_yf_err(&e, &format!("history for {symbol}")))
    }
}

#[cfg(feature = "test-adapters")]
impl dyn YfHistory {
    /// Build a `YfHistory` from a closure (tests only).
    pub fn from_fn<F>(f: F) -> Arc<dyn YfHistory>
    where
        F: Send
            + Sync
            + 'static
            + Fn(String, yf::core::services::HistoryRequest) -> Result<yf::HistoryResponse, ScanError>,
    {
        struct FnHist<F>(F);

        #[async_trait]
        impl<F> YfHistory for FnHist<F>
        where
            F: Send
                + Sync
                + 'static
                + Fn(
                    String,
                    yf::core::services::HistoryRequest,
                ) -> Result<yf::HistoryResponse, ScanError>,
        {
            async fn fetch_full(
                &self,
                symbol: &str,
                req: yf::core::services::HistoryRequest,
            ) -> Result<yf::HistoryResponse, ScanError> {
                (self.0)(symbol.to_string(), req)
            }
        }

        Arc::new(FnHist(f))
    }
}
