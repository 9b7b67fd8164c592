use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use minescan_core::{HistoryProvider, PriceConnector, PriceSeries, ResolvedSymbol, ScanError};

/// Instruction for how a method should behave for a given input.
#[derive(Debug, Clone)]
pub enum MockBehavior<T> {
    /// Return the provided value immediately.
    Return(T),
    /// Fail immediately with the provided error.
    Fail(ScanError),
}

#[derive(Default)]
struct InternalState {
    history_rules: HashMap<String, MockBehavior<PriceSeries>>,
    history_requests: Vec<String>,
}

/// Controller handle used by tests to drive the dynamic mock from the outside.
pub struct DynamicMockController {
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockController {
    /// Set the behavior for `daily_history` calls for a specific symbol.
    pub async fn set_history_behavior(
        &self,
        symbol: impl Into<String>,
        behavior: MockBehavior<PriceSeries>,
    ) {
        let mut guard = self.state.lock().await;
        guard.history_rules.insert(symbol.into(), behavior);
    }

    /// Symbols requested so far, in call order.
    pub async fn history_requests(&self) -> Vec<String> {
        self.state.lock().await.history_requests.clone()
    }

    /// Number of requests made for `symbol`.
    pub async fn request_count(&self, symbol: &str) -> usize {
        let guard = self.state.lock().await;
        guard
            .history_requests
            .iter()
            .filter(|s| s.as_str() == symbol)
            .count()
    }

    /// Clear all configured behaviors and the request log.
    pub async fn clear_all_behaviors(&self) {
        let mut guard = self.state.lock().await;
        guard.history_rules.clear();
        guard.history_requests.clear();
    }
}

/// A connector that defers all behavior to an external controller.
///
/// Symbols without a configured behavior fail with `ScanError::NotFound`.
pub struct DynamicMockConnector {
    name: &'static str,
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockConnector {
    /// Create a new dynamic mock connector and its controller.
    #[must_use]
    pub fn new_with_controller(
        name: &'static str,
    ) -> (Arc<dyn PriceConnector>, DynamicMockController) {
        let state = Arc::new(Mutex::new(InternalState::default()));
        let controller = DynamicMockController {
            state: Arc::clone(&state),
        };
        let me = Arc::new(Self { name, state });
        (me as Arc<dyn PriceConnector>, controller)
    }
}

impl PriceConnector for DynamicMockConnector {
    fn name(&self) -> &'static str {
        self.name
    }

    fn vendor(&self) -> &'static str {
        "DynamicMock"
    }

    fn as_history_provider(&self) -> Option<&dyn HistoryProvider> {
        Some(self as &dyn HistoryProvider)
    }
}

#[async_trait]
impl HistoryProvider for DynamicMockConnector {
    async fn daily_history(&self, symbol: &ResolvedSymbol) -> Result<PriceSeries, ScanError> {
        let behavior = {
            let mut guard = self.state.lock().await;
            guard.history_requests.push(symbol.to_string());
            guard.history_rules.get(symbol.as_str()).cloned()
        };

        match behavior {
            Some(MockBehavior::Return(series)) => Ok(series),
            Some(MockBehavior::Fail(e)) => Err(e),
            None => Err(ScanError::not_found(format!("history for {symbol}"))),
        }
    }
}
