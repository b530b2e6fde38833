use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use trendstitch_core::connector::{InterestOverTimeProvider, TrendsConnector};
use trendstitch_core::{RawSeries, Timeframe, TrendsError, TrendsRequest};

/// Instruction for how a call should behave for a given timeframe.
#[derive(Debug, Clone)]
pub enum MockBehavior<T> {
    /// Return the provided value immediately.
    Return(T),
    /// Fail immediately with the provided error.
    Fail(TrendsError),
    /// Fail with `RateLimited` for the given number of calls, then return the value.
    RateLimitTimes(u32, T),
}

#[derive(Default)]
struct InternalState {
    rules: HashMap<Timeframe, MockBehavior<RawSeries>>,
    fallback: Option<MockBehavior<RawSeries>>,
    requests: Vec<TrendsRequest>,
}

/// Controller handle used by tests to drive the dynamic mock from the outside.
pub struct DynamicMockController {
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockController {
    /// Set the behavior for calls with exactly this timeframe.
    pub async fn set_behavior(&self, timeframe: Timeframe, behavior: MockBehavior<RawSeries>) {
        let mut guard = self.state.lock().await;
        guard.rules.insert(timeframe, behavior);
    }

    /// Set the behavior for timeframes without a specific rule.
    pub async fn set_fallback(&self, behavior: MockBehavior<RawSeries>) {
        let mut guard = self.state.lock().await;
        guard.fallback = Some(behavior);
    }

    /// Copy of every request received, in call order.
    pub async fn requests(&self) -> Vec<TrendsRequest> {
        self.state.lock().await.requests.clone()
    }

    /// Number of calls received.
    pub async fn call_count(&self) -> usize {
        self.state.lock().await.requests.len()
    }

    /// Clear all configured behaviors and the request log.
    pub async fn clear_all_behaviors(&self) {
        let mut guard = self.state.lock().await;
        guard.rules.clear();
        guard.fallback = None;
        guard.requests.clear();
    }
}

/// A connector that defers all behavior to an external controller.
pub struct DynamicMockConnector {
    name: &'static str,
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockConnector {
    /// Create a new dynamic mock connector and its controller.
    #[must_use]
    pub fn new_with_controller(
        name: &'static str,
    ) -> (Arc<dyn TrendsConnector>, DynamicMockController) {
        let state = Arc::new(Mutex::new(InternalState::default()));
        let controller = DynamicMockController {
            state: Arc::clone(&state),
        };
        let me = Arc::new(Self { name, state });
        (me as Arc<dyn TrendsConnector>, controller)
    }
}

#[async_trait]
impl TrendsConnector for DynamicMockConnector {
    fn name(&self) -> &'static str {
        self.name
    }

    fn vendor(&self) -> &'static str {
        "DynamicMock"
    }

    fn as_interest_provider(&self) -> Option<&dyn InterestOverTimeProvider> {
        Some(self as &dyn InterestOverTimeProvider)
    }
}

#[async_trait]
impl InterestOverTimeProvider for DynamicMockConnector {
    async fn interest_over_time(&self, req: &TrendsRequest) -> Result<RawSeries, TrendsError> {
        let behavior = {
            let mut guard = self.state.lock().await;
            guard.requests.push(req.clone());
            let state = &mut *guard;
            let rule = match state.rules.get_mut(&req.timeframe) {
                Some(rule) => Some(rule),
                None => state.fallback.as_mut(),
            };
            match rule {
                Some(MockBehavior::RateLimitTimes(n, _)) if *n > 0 => {
                    *n -= 1;
                    Some(MockBehavior::Fail(TrendsError::RateLimited {
                        retry_after_ms: None,
                    }))
                }
                Some(rule) => Some(rule.clone()),
                None => None,
            }
        };

        match behavior {
            Some(MockBehavior::Return(series) | MockBehavior::RateLimitTimes(_, series)) => Ok(series),
            Some(MockBehavior::Fail(e)) => Err(e),
            None => Err(TrendsError::not_found(format!(
                "interest over time for {}",
                req.timeframe
            ))),
        }
    }
}
